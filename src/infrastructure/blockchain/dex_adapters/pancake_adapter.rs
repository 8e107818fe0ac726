use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use super::traits::PoolDataProvider;
use crate::domain::dex::ProtocolConfig;
use crate::domain::pool::Pool;
use crate::infrastructure::blockchain::pool_mapper::PoolResourceMapper;
use crate::infrastructure::blockchain::rpc_client::ResourceFetcher;
use crate::infrastructure::blockchain::token_metadata::TokenCatalog;
use crate::shared::errors::FetchError;

/// PancakeSwap adapter.
/// Every pair lives as a `swap::TokenPairReserve<X, Y>` resource under one
/// resource account, so one account read yields all pools. Forks with the
/// same layout can reuse it through a custom [`ProtocolConfig`].
pub struct PancakeAdapter {
    fetcher: Arc<dyn ResourceFetcher>,
    mapper: PoolResourceMapper,
}

impl PancakeAdapter {
    pub fn new(protocol: ProtocolConfig, fetcher: Arc<dyn ResourceFetcher>, catalog: Arc<dyn TokenCatalog>) -> Self {
        Self { fetcher, mapper: PoolResourceMapper::new(protocol, catalog) }
    }

    pub fn protocol(&self) -> &ProtocolConfig {
        self.mapper.protocol()
    }
}

#[async_trait]
impl PoolDataProvider for PancakeAdapter {
    fn protocol_name(&self) -> &str {
        &self.protocol().name
    }

    async fn fetch_pools(&self) -> Result<Vec<Pool>, FetchError> {
        let account = &self.protocol().pool_account;
        info!("🔍 {}: loading pools from {}", self.protocol_name(), account);

        let resources = self.fetcher.fetch(account).await.map_err(|e| {
            error!("❌ {}: resource fetch failed: {}", self.protocol_name(), e);
            e
        })?;

        let pools = self.mapper.map(&resources, account);
        info!("✅ {}: {} pools from {} resources", self.protocol_name(), pools.len(), resources.len());
        Ok(pools)
    }
}
