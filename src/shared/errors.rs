//! Error handling for the application

use thiserror::Error;

/// Account address errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("Account address must start with 0x: {0}")]
    MissingPrefix(String),

    #[error("Account address has no hex digits")]
    Empty,

    #[error("Account address longer than 32 bytes: {0}")]
    TooLong(String),

    #[error("Account address is not valid hex: {0}")]
    InvalidHex(String),
}

/// Token amount errors
///
/// Mixing amounts of different tokens is a programming error; it is
/// rejected here instead of producing a meaningless number.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("Token mismatch: {left} vs {right}")]
    DescriptorMismatch { left: String, right: String },

    #[error("Negative amount of {token}: {amount}")]
    Negative { token: String, amount: String },
}

/// Resource fetch errors
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to parse URL: {0}. Error: {1}")]
    UrlParsing(String, String),

    #[error("Unexpected HTTP client error: {0}")]
    HttpClient(String, #[source] reqwest::Error),

    #[error("Node returned {status} for {url}: {body}")]
    Status { url: String, status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

/// Per-resource data-integrity errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Malformed type tag {tag}: {reason}")]
    TypeTag { tag: String, reason: String },

    #[error("Malformed payload for {resource_type}: {reason}")]
    Payload { resource_type: String, reason: String },
}

impl ParseError {
    pub fn type_tag(tag: &str, reason: impl ToString) -> Self {
        ParseError::TypeTag { tag: tag.to_string(), reason: reason.to_string() }
    }

    pub fn payload(resource_type: &str, reason: impl ToString) -> Self {
        ParseError::Payload { resource_type: resource_type.to_string(), reason: reason.to_string() }
    }
}

/// Swap quote errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuoteError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Insufficient liquidity: {0}")]
    InsufficientLiquidity(String),
}

impl From<AmountError> for QuoteError {
    fn from(err: AmountError) -> Self {
        QuoteError::InvalidInput(err.to_string())
    }
}

/// General application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unknown protocol: {0}")]
    UnknownProtocol(String),

    #[error("Pool not found: {0}")]
    PoolNotFound(String),

    #[error("Token not found: {0}")]
    TokenNotFound(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Quote(#[from] QuoteError),

    #[error(transparent)]
    Amount(#[from] AmountError),

    #[error(transparent)]
    Address(#[from] AddressError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_error_becomes_invalid_input() {
        let err: QuoteError = AmountError::Negative {
            token: "APT".to_string(),
            amount: "-1".to_string(),
        }
        .into();

        assert!(matches!(err, QuoteError::InvalidInput(ref msg) if msg.contains("APT")));
    }

    #[test]
    fn test_parse_error_carries_tag() {
        let err = ParseError::type_tag("0x1::swap::Pair", "missing type arguments");
        assert_eq!(
            err.to_string(),
            "Malformed type tag 0x1::swap::Pair: missing type arguments"
        );
    }
}
