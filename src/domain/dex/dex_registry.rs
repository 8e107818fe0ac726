//! Protocol registry for Aptos DEXes

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use super::CurveModel;
use crate::shared::types::AccountAddress;

/// PancakeSwap resource account; also the publisher of the `swap` module
pub const PANCAKE_ACCOUNT: &str = "0xc7efb4076dbe143cbcd98cfaaa929ecfc8f299203dfff63b95ccb6bfe19850fa";

/// PancakeSwap charges 0.25% to LPs and 0.05% to the treasury, in thousandths
pub const PANCAKE_FEE_PER_MILLE: u32 = 3;

/// Static description of one protocol: where its pools live and how they price
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolConfig {
    pub name: String,
    pub pool_account: AccountAddress,
    /// Struct tag prefix of pool resources, without type arguments
    pub pool_type_prefix: String,
    pub curve: CurveModel,
}

impl ProtocolConfig {
    pub fn pancake() -> Self {
        Self {
            name: "pancake".to_string(),
            pool_account: AccountAddress::from_static(PANCAKE_ACCOUNT),
            pool_type_prefix: format!("{PANCAKE_ACCOUNT}::swap::TokenPairReserve"),
            curve: CurveModel::ConstantProduct {
                fee_rate: BigDecimal::new(BigInt::from(PANCAKE_FEE_PER_MILLE), 3),
            },
        }
    }
}

/// Registry of known protocols, built once at startup and passed around by value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolBook {
    protocols: Vec<ProtocolConfig>,
}

impl Default for ProtocolBook {
    fn default() -> Self {
        Self { protocols: vec![ProtocolConfig::pancake()] }
    }
}

impl ProtocolBook {
    pub fn new(protocols: Vec<ProtocolConfig>) -> Self {
        let mut book = Self { protocols: Vec::with_capacity(protocols.len()) };
        for protocol in protocols {
            book = book.with_protocol(protocol);
        }
        book
    }

    /// Add a protocol, replacing any existing entry with the same name (case-insensitive)
    pub fn with_protocol(mut self, protocol: ProtocolConfig) -> Self {
        match self.protocols.iter_mut().find(|p| p.name.eq_ignore_ascii_case(&protocol.name)) {
            Some(existing) => *existing = protocol,
            None => self.protocols.push(protocol),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&ProtocolConfig> {
        self.protocols.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn names(&self) -> Vec<&str> {
        self.protocols.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn protocols(&self) -> &[ProtocolConfig] {
        &self.protocols
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_pancake_defaults() {
        let pancake = ProtocolConfig::pancake();

        assert_eq!(pancake.name, "pancake");
        assert_eq!(pancake.pool_account, PANCAKE_ACCOUNT.parse::<AccountAddress>().unwrap());
        assert_eq!(
            pancake.pool_type_prefix,
            "0xc7efb4076dbe143cbcd98cfaaa929ecfc8f299203dfff63b95ccb6bfe19850fa::swap::TokenPairReserve"
        );
        assert_eq!(pancake.curve.fee_rate(), &BigDecimal::from_str("0.003").unwrap());
    }

    #[test]
    fn test_book_lookup_and_override() {
        let book = ProtocolBook::default();
        assert_eq!(book.names(), vec!["pancake"]);
        assert!(book.get("Pancake").is_some());
        assert!(book.get("liquidswap").is_none());

        let mut cheaper = ProtocolConfig::pancake();
        cheaper.curve = CurveModel::constant_product(BigDecimal::from_str("0.001").unwrap()).unwrap();
        let book = book.with_protocol(cheaper.clone());

        assert_eq!(book.protocols().len(), 1);
        assert_eq!(book.get("pancake"), Some(&cheaper));

        let mut renamed = ProtocolConfig::pancake();
        renamed.name = "PANCAKE".to_string();
        let book = book.with_protocol(renamed.clone());
        assert_eq!(book.names(), vec!["PANCAKE"]);
        assert_eq!(book.get("pancake"), Some(&renamed));
    }
}
