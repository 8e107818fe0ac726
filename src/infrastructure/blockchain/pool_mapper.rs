//! Maps raw account resources to pool snapshots

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::account_parser::extract_type_args;
use super::dex_structures::{RawResource, TokenPairReserve};
use super::token_metadata::TokenCatalog;
use crate::domain::dex::ProtocolConfig;
use crate::domain::pool::{Pool, PoolPair};
use crate::shared::errors::ParseError;
use crate::shared::types::{AccountAddress, TokenAmount};

pub struct PoolResourceMapper {
    protocol: ProtocolConfig,
    catalog: Arc<dyn TokenCatalog>,
}

impl PoolResourceMapper {
    pub fn new(protocol: ProtocolConfig, catalog: Arc<dyn TokenCatalog>) -> Self {
        Self { protocol, catalog }
    }

    pub fn protocol(&self) -> &ProtocolConfig {
        &self.protocol
    }

    /// Build pools from the resources of `owner`, stamped with the current time
    pub fn map(&self, resources: &[RawResource], owner: &AccountAddress) -> Vec<Pool> {
        self.map_at(resources, owner, Utc::now())
    }

    /// Same as [`map`](Self::map) with an explicit snapshot time. Output keeps
    /// the input order and never has more entries than the input.
    pub fn map_at(&self, resources: &[RawResource], owner: &AccountAddress, fetched_at: DateTime<Utc>) -> Vec<Pool> {
        let mut pools = Vec::new();
        let mut malformed = 0usize;
        let mut untracked = 0usize;

        for resource in resources.iter().filter(|r| self.is_pool_resource(r)) {
            match self.map_one(resource, owner, fetched_at) {
                Ok(Some(pool)) => pools.push(pool),
                Ok(None) => untracked += 1,
                Err(e) => {
                    warn!("⚠️ Skipping pool resource: {}", e);
                    malformed += 1;
                }
            }
        }

        debug!(
            "Mapped {} {} pools ({} untracked, {} malformed) from {} resources",
            pools.len(),
            self.protocol.name,
            untracked,
            malformed,
            resources.len()
        );
        pools
    }

    fn is_pool_resource(&self, resource: &RawResource) -> bool {
        resource.resource_type.starts_with(&self.protocol.pool_type_prefix)
    }

    /// `Ok(None)` when either coin is missing from the catalog
    fn map_one(
        &self,
        resource: &RawResource,
        owner: &AccountAddress,
        fetched_at: DateTime<Utc>,
    ) -> Result<Option<Pool>, ParseError> {
        let (type_x, type_y) = extract_type_args(&resource.resource_type)?;

        let (token_x, token_y) = match (self.catalog.lookup(&type_x), self.catalog.lookup(&type_y)) {
            (Some(x), Some(y)) => (x, y),
            _ => {
                debug!("Dropping pool with untracked coin: {}", resource.resource_type);
                return Ok(None);
            }
        };

        let reserve = TokenPairReserve::from_resource(resource)?;
        let pair = PoolPair::new(
            TokenAmount::from_base_units(token_x, reserve.reserve_x),
            TokenAmount::from_base_units(token_y, reserve.reserve_y),
        );

        Ok(Some(Pool::new(
            &self.protocol.name,
            &resource.resource_type,
            owner.clone(),
            pair,
            self.protocol.curve.clone(),
            fetched_at,
        )
        .with_reserves_updated_at(reserve.updated_at())))
    }
}
