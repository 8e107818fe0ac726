//! Pool domain - liquidity pool snapshots and swap quotes

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::dex::{CurveModel, QuoteCalculator};
use crate::shared::errors::QuoteError;
use crate::shared::types::{AccountAddress, TokenAmount, TokenDescriptor};

/// The two reserves of a pool, in on-chain type-argument order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolPair {
    name: String,
    coin_x: TokenAmount,
    coin_y: TokenAmount,
}

impl PoolPair {
    pub fn new(coin_x: TokenAmount, coin_y: TokenAmount) -> Self {
        let name = format!("{}-{}", coin_x.token().symbol, coin_y.token().symbol);
        Self { name, coin_x, coin_y }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn coin_x(&self) -> &TokenAmount {
        &self.coin_x
    }

    pub fn coin_y(&self) -> &TokenAmount {
        &self.coin_y
    }

    /// Reserve held for `token`, if the pool trades it
    pub fn reserve_of(&self, token: &TokenDescriptor) -> Option<&TokenAmount> {
        if self.coin_x.token().as_ref() == token {
            Some(&self.coin_x)
        } else if self.coin_y.token().as_ref() == token {
            Some(&self.coin_y)
        } else {
            None
        }
    }
}

/// Read-only snapshot of one on-chain pool at fetch time
#[derive(Debug, Clone, Serialize)]
pub struct Pool {
    protocol_name: String,
    resource_type: String,
    owner_account: AccountAddress,
    pair: PoolPair,
    curve: CurveModel,
    fetched_at: DateTime<Utc>,
    /// Last on-chain reserve update, when the resource records one
    reserves_updated_at: Option<DateTime<Utc>>,
}

impl Pool {
    pub fn new(
        protocol_name: &str,
        resource_type: &str,
        owner_account: AccountAddress,
        pair: PoolPair,
        curve: CurveModel,
        fetched_at: DateTime<Utc>,
    ) -> Self {
        Self {
            protocol_name: protocol_name.to_string(),
            resource_type: resource_type.to_string(),
            owner_account,
            pair,
            curve,
            fetched_at,
            reserves_updated_at: None,
        }
    }

    pub fn with_reserves_updated_at(mut self, updated_at: Option<DateTime<Utc>>) -> Self {
        self.reserves_updated_at = updated_at;
        self
    }

    pub fn protocol_name(&self) -> &str {
        &self.protocol_name
    }

    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    pub fn owner_account(&self) -> &AccountAddress {
        &self.owner_account
    }

    pub fn pair(&self) -> &PoolPair {
        &self.pair
    }

    pub fn curve(&self) -> &CurveModel {
        &self.curve
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn reserves_updated_at(&self) -> Option<DateTime<Utc>> {
        self.reserves_updated_at
    }
}

impl QuoteCalculator for Pool {
    fn calc_output_amount(&self, source: &TokenAmount) -> Result<SwapQuote, QuoteError> {
        self.curve.quote(&self.pair, source)
    }
}

/// Result of quoting a swap against a pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwapQuote {
    pub output_coin_amount: TokenAmount,
    /// One entry per fee tier charged; constant product pools charge one.
    pub fees: Vec<TokenAmount>,
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_pair_name_follows_type_order() {
        let cake = Arc::new(TokenDescriptor::new("0x2::oft::CakeOFT", "CAKE", 8));
        let apt = Arc::new(TokenDescriptor::new("0x1::aptos_coin::AptosCoin", "APT", 8));

        let pair = PoolPair::new(
            TokenAmount::from_base_units(Arc::clone(&cake), 10),
            TokenAmount::from_base_units(Arc::clone(&apt), 20),
        );

        assert_eq!(pair.name(), "CAKE-APT");
        assert_eq!(pair.reserve_of(&apt).unwrap().to_base_units(), num_bigint::BigInt::from(20));
        assert!(pair.reserve_of(&TokenDescriptor::new("0x3::x::Y", "Y", 6)).is_none());
    }
}
