//! Pricing curves

use std::sync::Arc;

use bigdecimal::{BigDecimal, One, Zero};
use serde::Serialize;

use crate::domain::pool::{PoolPair, SwapQuote};
use crate::math::constant_product_output;
use crate::shared::errors::QuoteError;
use crate::shared::types::TokenAmount;

/// Curve and fee model a pool prices swaps with
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CurveModel {
    /// `x * y = k` with a flat fee taken from the input
    ConstantProduct { fee_rate: BigDecimal },
}

impl CurveModel {
    pub fn constant_product(fee_rate: BigDecimal) -> Result<Self, QuoteError> {
        validate_fee_rate(&fee_rate)?;
        Ok(CurveModel::ConstantProduct { fee_rate })
    }

    pub fn fee_rate(&self) -> &BigDecimal {
        match self {
            CurveModel::ConstantProduct { fee_rate } => fee_rate,
        }
    }

    pub fn quote(&self, pair: &PoolPair, source: &TokenAmount) -> Result<SwapQuote, QuoteError> {
        match self {
            CurveModel::ConstantProduct { fee_rate } => quote_constant_product(fee_rate, pair, source),
        }
    }
}

fn validate_fee_rate(fee_rate: &BigDecimal) -> Result<(), QuoteError> {
    if *fee_rate < BigDecimal::zero() || *fee_rate >= BigDecimal::one() {
        return Err(QuoteError::InvalidInput(format!("fee rate {fee_rate} outside [0, 1)")));
    }
    Ok(())
}

fn quote_constant_product(
    fee_rate: &BigDecimal,
    pair: &PoolPair,
    source: &TokenAmount,
) -> Result<SwapQuote, QuoteError> {
    validate_fee_rate(fee_rate)?;

    let (reserve_source, reserve_target) = if source.same_token(pair.coin_x()) {
        (pair.coin_x(), pair.coin_y())
    } else if source.same_token(pair.coin_y()) {
        (pair.coin_y(), pair.coin_x())
    } else {
        return Err(QuoteError::InvalidInput(format!(
            "{} is not traded by pool {}",
            source.token().type_tag,
            pair.name()
        )));
    };

    if reserve_source.is_zero() || reserve_target.is_zero() {
        return Err(QuoteError::InsufficientLiquidity(format!(
            "pool {} has an empty reserve",
            pair.name()
        )));
    }

    let fee = source.mul_rate(fee_rate)?;
    let net_input = source.checked_sub(&fee)?;

    let output = constant_product_output(net_input.amount(), reserve_source.amount(), reserve_target.amount())
        .ok_or_else(|| QuoteError::InsufficientLiquidity(format!("pool {} has an empty reserve", pair.name())))?;

    Ok(SwapQuote {
        output_coin_amount: TokenAmount::new(Arc::clone(reserve_target.token()), output)?,
        fees: vec![fee],
    })
}
