use async_trait::async_trait;

use crate::domain::pool::Pool;
use crate::shared::errors::FetchError;

/// Trait for DEX-specific pool providers
/// This provides a unified interface for different DEX implementations
#[async_trait]
pub trait PoolDataProvider: Send + Sync {
    /// Name of the protocol this provider reads
    fn protocol_name(&self) -> &str;

    /// Fetch and map every tracked pool of the protocol.
    /// A fetch failure fails the whole call; bad resources are skipped.
    async fn fetch_pools(&self) -> Result<Vec<Pool>, FetchError>;

    /// Get pool by pair name (`APT-USDC`), case-insensitive, either token order
    async fn get_pool_by_pair(&self, pair_name: &str) -> Result<Option<Pool>, FetchError> {
        let pools = self.fetch_pools().await?;
        Ok(find_pool_by_pair(pools, pair_name))
    }
}

pub(crate) fn find_pool_by_pair(pools: Vec<Pool>, pair_name: &str) -> Option<Pool> {
    let reversed = pair_name
        .split_once('-')
        .map(|(a, b)| format!("{b}-{a}"))
        .unwrap_or_default();

    let mut fallback = None;
    for pool in pools {
        let name = pool.pair().name();
        if name.eq_ignore_ascii_case(pair_name) {
            return Some(pool);
        }
        if fallback.is_none() && !reversed.is_empty() && name.eq_ignore_ascii_case(&reversed) {
            fallback = Some(pool);
        }
    }
    fallback
}
