use std::sync::Arc;

use super::pancake_adapter::PancakeAdapter;
use super::traits::PoolDataProvider;
use crate::domain::dex::ProtocolConfig;
use crate::infrastructure::blockchain::rpc_client::ResourceFetcher;
use crate::infrastructure::blockchain::token_metadata::TokenCatalog;

/// Factory for creating pool providers
pub struct DexAdapterFactory {
    fetcher: Arc<dyn ResourceFetcher>,
    catalog: Arc<dyn TokenCatalog>,
}

impl DexAdapterFactory {
    pub fn new(fetcher: Arc<dyn ResourceFetcher>, catalog: Arc<dyn TokenCatalog>) -> Self {
        Self { fetcher, catalog }
    }

    /// Create a provider for the given protocol.
    /// All supported protocols store pairs as `TokenPairReserve` resources.
    pub fn create_adapter(&self, protocol: &ProtocolConfig) -> Box<dyn PoolDataProvider> {
        Box::new(PancakeAdapter::new(
            protocol.clone(),
            Arc::clone(&self.fetcher),
            Arc::clone(&self.catalog),
        ))
    }
}
