//! Quote interface shared by every protocol

use crate::domain::pool::SwapQuote;
use crate::shared::errors::QuoteError;
use crate::shared::types::TokenAmount;

/// Uniform quoting entry point, whatever curve or fee model sits behind it
pub trait QuoteCalculator: Send + Sync {
    fn calc_output_amount(&self, source: &TokenAmount) -> Result<SwapQuote, QuoteError>;
}
