//! Common types used across the application

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
    sync::Arc,
};

use bigdecimal::{BigDecimal, Zero};
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

use crate::shared::errors::{AddressError, AmountError};
use crate::shared::utils::format_units;

/// Account address on Aptos (`0x`-prefixed hex, at most 32 bytes).
///
/// Parsed addresses are kept in the node's standard form: `0x0` to `0xf`
/// stay short, every other address is zero-padded to 64 hex digits, which is
/// how they appear inside resource type tags.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountAddress(String);

impl AccountAddress {
    /// For compile-time constants only; the value is not validated.
    pub(crate) fn from_static(address: &'static str) -> Self {
        Self(address.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for AccountAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or_else(|| AddressError::MissingPrefix(trimmed.to_string()))?;

        if digits.is_empty() {
            return Err(AddressError::Empty);
        }
        if digits.len() > 64 {
            return Err(AddressError::TooLong(trimmed.to_string()));
        }

        // hex::decode wants whole bytes; short-form addresses like 0x1 are legal
        let padded = if digits.len() % 2 == 1 { format!("0{digits}") } else { digits.to_string() };
        hex::decode(&padded).map_err(|e| AddressError::InvalidHex(format!("{trimmed} ({e})")))?;

        let significant = digits.trim_start_matches('0').to_lowercase();
        let normalized = if significant.len() <= 1 {
            format!("0x{}", if significant.is_empty() { "0" } else { &significant })
        } else {
            format!("0x{significant:0>64}")
        };
        Ok(Self(normalized))
    }
}

impl TryFrom<String> for AccountAddress {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AccountAddress> for String {
    fn from(value: AccountAddress) -> Self {
        value.0
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Token (coin) metadata, identified by its canonical Move type
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct TokenDescriptor {
    #[serde(rename = "type")]
    pub type_tag: String,
    pub symbol: String,
    pub decimals: u8,
    #[serde(default)]
    pub name: Option<String>,
}

impl TokenDescriptor {
    pub fn new(type_tag: &str, symbol: &str, decimals: u8) -> Self {
        Self { type_tag: type_tag.to_string(), symbol: symbol.to_string(), decimals, name: None }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }
}

impl PartialEq for TokenDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.type_tag == other.type_tag
    }
}

impl Hash for TokenDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_tag.hash(state);
    }
}

/// A non-negative quantity of one token, in the token's base units.
///
/// Quantities are exact decimals: quoting can produce fractional base units,
/// which are only floored when converted with [`TokenAmount::to_base_units`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenAmount {
    token: Arc<TokenDescriptor>,
    amount: BigDecimal,
}

impl TokenAmount {
    pub fn new(token: Arc<TokenDescriptor>, amount: BigDecimal) -> Result<Self, AmountError> {
        if amount < BigDecimal::zero() {
            return Err(AmountError::Negative {
                token: token.symbol.clone(),
                amount: amount.to_string(),
            });
        }
        Ok(Self { token, amount })
    }

    pub fn from_base_units(token: Arc<TokenDescriptor>, units: u64) -> Self {
        Self { token, amount: BigDecimal::from(units) }
    }

    /// Build an amount from a human-scale value (`1.5` APT rather than `150000000`).
    pub fn from_ui_amount(token: Arc<TokenDescriptor>, ui_amount: BigDecimal) -> Result<Self, AmountError> {
        let amount = ui_amount * decimal_scale(token.decimals);
        Self::new(token, amount)
    }

    pub fn token(&self) -> &Arc<TokenDescriptor> {
        &self.token
    }

    pub fn amount(&self) -> &BigDecimal {
        &self.amount
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    pub fn same_token(&self, other: &TokenAmount) -> bool {
        self.token == other.token
    }

    pub fn checked_add(&self, other: &TokenAmount) -> Result<TokenAmount, AmountError> {
        self.ensure_same_token(other)?;
        Ok(Self { token: Arc::clone(&self.token), amount: &self.amount + &other.amount })
    }

    pub fn checked_sub(&self, other: &TokenAmount) -> Result<TokenAmount, AmountError> {
        self.ensure_same_token(other)?;
        Self::new(Arc::clone(&self.token), &self.amount - &other.amount)
    }

    /// Scale by a plain ratio (fee rates, weights). The token is kept.
    pub fn mul_rate(&self, rate: &BigDecimal) -> Result<TokenAmount, AmountError> {
        Self::new(Arc::clone(&self.token), &self.amount * rate)
    }

    /// Integer base units, rounded down.
    pub fn to_base_units(&self) -> BigInt {
        let (units, _) = self.amount.with_scale(0).into_bigint_and_exponent();
        units
    }

    /// Human-scale value, exact.
    pub fn to_ui_amount(&self) -> BigDecimal {
        let (digits, scale) = self.amount.as_bigint_and_exponent();
        BigDecimal::new(digits, scale + i64::from(self.token.decimals))
    }

    fn ensure_same_token(&self, other: &TokenAmount) -> Result<(), AmountError> {
        if self.same_token(other) {
            Ok(())
        } else {
            Err(AmountError::DescriptorMismatch {
                left: self.token.type_tag.clone(),
                right: other.token.type_tag.clone(),
            })
        }
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", format_units(&self.to_base_units(), self.token.decimals), self.token.symbol)
    }
}

/// `10^decimals` as an exact decimal.
pub fn decimal_scale(decimals: u8) -> BigDecimal {
    BigDecimal::new(BigInt::from(1), -i64::from(decimals))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apt() -> Arc<TokenDescriptor> {
        Arc::new(TokenDescriptor::new("0x1::aptos_coin::AptosCoin", "APT", 8))
    }

    fn usdc() -> Arc<TokenDescriptor> {
        Arc::new(TokenDescriptor::new(
            "0xf22bede237a07e121b56d91a491eb7bcdfd1f5907926a9e58338f964a01b17fa::asset::USDC",
            "USDC",
            6,
        ))
    }

    #[test]
    fn test_address_normalization() {
        let addr: AccountAddress = "0xC7EFB4076dbe143cbcd98cfaaa929ecfc8f299203dfff63b95ccb6bfe19850fa"
            .parse()
            .unwrap();
        assert_eq!(
            addr.as_str(),
            "0xc7efb4076dbe143cbcd98cfaaa929ecfc8f299203dfff63b95ccb6bfe19850fa"
        );

        let short: AccountAddress = "0x1".parse().unwrap();
        assert_eq!(short.to_string(), "0x1");
        assert_eq!("0x0000000000000000000000000000000000000000000000000000000000000001".parse::<AccountAddress>().unwrap(), short);
        assert_eq!("0x00".parse::<AccountAddress>().unwrap().as_str(), "0x0");
    }

    #[test]
    fn test_short_address_is_padded() {
        let addr: AccountAddress = "0xABC".parse().unwrap();
        assert_eq!(addr.as_str(), format!("0x{}abc", "0".repeat(61)));
        assert_eq!(addr.as_str().len(), 66);
    }

    #[test]
    fn test_address_rejects_garbage() {
        assert_eq!("1234".parse::<AccountAddress>(), Err(AddressError::MissingPrefix("1234".to_string())));
        assert_eq!("0x".parse::<AccountAddress>(), Err(AddressError::Empty));
        assert!(matches!("0xzz".parse::<AccountAddress>(), Err(AddressError::InvalidHex(_))));
        assert!(matches!(format!("0x{}", "a".repeat(65)).parse::<AccountAddress>(), Err(AddressError::TooLong(_))));
    }

    #[test]
    fn test_descriptor_equality_uses_type_only() {
        let a = TokenDescriptor::new("0x1::aptos_coin::AptosCoin", "APT", 8);
        let b = TokenDescriptor::new("0x1::aptos_coin::AptosCoin", "Aptos", 8).with_name("Aptos Coin");
        assert_eq!(a, b);
    }

    #[test]
    fn test_negative_amount_rejected() {
        let err = TokenAmount::new(apt(), BigDecimal::from(-5)).unwrap_err();
        assert!(matches!(err, AmountError::Negative { ref token, .. } if token == "APT"));
    }

    #[test]
    fn test_arithmetic_keeps_token() {
        let a = TokenAmount::from_base_units(apt(), 1_000);
        let b = TokenAmount::from_base_units(apt(), 250);

        let sum = a.checked_add(&b).unwrap();
        assert_eq!(sum.amount(), &BigDecimal::from(1_250));
        assert_eq!(sum.token().symbol, "APT");

        let diff = a.checked_sub(&b).unwrap();
        assert_eq!(diff.amount(), &BigDecimal::from(750));

        let fee = a.mul_rate(&BigDecimal::from_str("0.003").unwrap()).unwrap();
        assert_eq!(fee.amount(), &BigDecimal::from(3));
    }

    #[test]
    fn test_mixed_tokens_rejected() {
        let a = TokenAmount::from_base_units(apt(), 1_000);
        let b = TokenAmount::from_base_units(usdc(), 1_000);

        assert!(matches!(a.checked_add(&b), Err(AmountError::DescriptorMismatch { .. })));
        assert!(matches!(a.checked_sub(&b), Err(AmountError::DescriptorMismatch { .. })));
    }

    #[test]
    fn test_sub_below_zero_rejected() {
        let a = TokenAmount::from_base_units(apt(), 1);
        let b = TokenAmount::from_base_units(apt(), 2);
        assert!(matches!(a.checked_sub(&b), Err(AmountError::Negative { .. })));
    }

    #[test]
    fn test_ui_conversion() {
        let amount = TokenAmount::from_ui_amount(usdc(), BigDecimal::from_str("1.5").unwrap()).unwrap();
        assert_eq!(amount.amount(), &BigDecimal::from(1_500_000));
        assert_eq!(amount.to_ui_amount(), BigDecimal::from_str("1.5").unwrap());
    }

    #[test]
    fn test_base_units_round_down() {
        let amount = TokenAmount::new(usdc(), BigDecimal::from_str("1992.9999").unwrap()).unwrap();
        assert_eq!(amount.to_base_units(), BigInt::from(1992));
    }

    #[test]
    fn test_display() {
        let amount = TokenAmount::from_base_units(apt(), 150_000_000);
        assert_eq!(amount.to_string(), "1.5 APT");
    }
}
