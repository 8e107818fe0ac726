//! Application services and use cases

use std::sync::Arc;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::domain::dex::QuoteCalculator;
use crate::domain::pool::Pool;
use crate::infrastructure::blockchain::{PoolDataProvider, TokenCatalog};
use crate::math::{min_out_with_slippage, price_impact_bps};
use crate::shared::errors::{AppError, QuoteError};
use crate::shared::types::{TokenAmount, TokenDescriptor};

/// A swap quote request as typed by a user
#[derive(Debug, Clone)]
pub struct QuoteRequest {
    /// Pair name such as `APT-USDC`; either order is accepted
    pub pair: String,
    /// Source token symbol or full Move type
    pub from: String,
    /// Human-scale input amount
    pub amount: BigDecimal,
    pub slippage_bps: u32,
}

/// Quote details for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteReport {
    pub protocol: String,
    pub pair: String,
    pub input: TokenAmount,
    pub output: TokenAmount,
    pub fees: Vec<TokenAmount>,
    pub price_impact_bps: Option<BigDecimal>,
    pub slippage_bps: u32,
    pub min_output: TokenAmount,
    pub pool_fetched_at: DateTime<Utc>,
}

/// Pool listing and quoting for one protocol
pub struct PoolService {
    provider: Box<dyn PoolDataProvider>,
    catalog: Arc<dyn TokenCatalog>,
}

impl PoolService {
    pub fn new(provider: Box<dyn PoolDataProvider>, catalog: Arc<dyn TokenCatalog>) -> Self {
        Self { provider, catalog }
    }

    pub fn protocol_name(&self) -> &str {
        self.provider.protocol_name()
    }

    pub async fn list_pools(&self) -> Result<Vec<Pool>, AppError> {
        Ok(self.provider.fetch_pools().await?)
    }

    pub async fn quote(&self, request: &QuoteRequest) -> Result<QuoteReport, AppError> {
        let pool = self
            .provider
            .get_pool_by_pair(&request.pair)
            .await?
            .ok_or_else(|| AppError::PoolNotFound(format!("{} on {}", request.pair, self.protocol_name())))?;
        let token = self.resolve_token(&request.from)?;

        info!("💱 Quoting {} {} on {} ({})", request.amount, token.symbol, pool.pair().name(), self.protocol_name());
        let source = TokenAmount::from_ui_amount(token, request.amount.clone()).map_err(QuoteError::from)?;
        build_report(&pool, source, request.slippage_bps)
    }

    /// Full Move types are looked up directly, anything else as a symbol
    fn resolve_token(&self, token: &str) -> Result<Arc<TokenDescriptor>, AppError> {
        let found = if token.contains("::") {
            self.catalog.lookup(token)
        } else {
            self.catalog.find_by_symbol(token)
        };
        found.ok_or_else(|| AppError::TokenNotFound(token.to_string()))
    }
}

/// Quote `source` against `pool` and derive impact and minimum output
pub fn build_report(pool: &Pool, source: TokenAmount, slippage_bps: u32) -> Result<QuoteReport, AppError> {
    let quote = pool.calc_output_amount(&source)?;

    let reserve_in = pool.pair().reserve_of(source.token()).map(|r| r.amount().clone());
    let reserve_out = pool.pair().reserve_of(quote.output_coin_amount.token()).map(|r| r.amount().clone());
    let impact = match (reserve_in, reserve_out) {
        (Some(reserve_in), Some(reserve_out)) => price_impact_bps(
            source.amount(),
            quote.output_coin_amount.amount(),
            &reserve_in,
            &reserve_out,
        ),
        _ => None,
    };

    let min_output = TokenAmount::new(
        Arc::clone(quote.output_coin_amount.token()),
        min_out_with_slippage(quote.output_coin_amount.amount(), slippage_bps),
    )
    .map_err(QuoteError::from)?;
    debug!("Quote {} -> {} (min {})", source, quote.output_coin_amount, min_output);

    Ok(QuoteReport {
        protocol: pool.protocol_name().to_string(),
        pair: pool.pair().name().to_string(),
        input: source,
        output: quote.output_coin_amount,
        fees: quote.fees,
        price_impact_bps: impact,
        slippage_bps,
        min_output,
        pool_fetched_at: pool.fetched_at(),
    })
}
