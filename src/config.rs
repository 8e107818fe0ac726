use std::{fs, path::Path, str::FromStr};

use anyhow::{anyhow, Context, Result};
use bigdecimal::BigDecimal;
use serde::Deserialize;

use crate::domain::dex::{CurveModel, ProtocolBook, ProtocolConfig};
use crate::shared::types::{AccountAddress, TokenDescriptor};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RpcCfg {
    pub url: Option<String>,
    pub timeout_ms: Option<u64>,
    pub page_limit: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProtocolCfg {
    pub name: String,
    pub pool_account: AccountAddress,
    /// Defaults to `<pool_account>::swap::TokenPairReserve`
    pub pool_type_prefix: Option<String>,
    /// Decimal string, e.g. "0.003"
    pub fee_rate: String,
}

impl ProtocolCfg {
    pub fn to_protocol(&self) -> Result<ProtocolConfig> {
        let fee_rate = BigDecimal::from_str(self.fee_rate.trim())
            .with_context(|| format!("fee_rate of protocol {}", self.name))?;
        let curve = CurveModel::constant_product(fee_rate).map_err(|e| anyhow!("protocol {}: {e}", self.name))?;

        Ok(ProtocolConfig {
            name: self.name.clone(),
            pool_type_prefix: self
                .pool_type_prefix
                .clone()
                .unwrap_or_else(|| format!("{}::swap::TokenPairReserve", self.pool_account)),
            pool_account: self.pool_account.clone(),
            curve,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub rpc: RpcCfg,
    #[serde(default)]
    pub protocols: Vec<ProtocolCfg>,
    #[serde(default)]
    pub tokens: Vec<TokenDescriptor>,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = fs::read_to_string(path.as_ref())
            .with_context(|| format!("read {}", path.as_ref().display()))?;
        s.parse()
    }

    /// Built-in protocols, with configured entries added or replacing them by name
    pub fn protocol_book(&self) -> Result<ProtocolBook> {
        let mut book = ProtocolBook::default();
        for protocol in &self.protocols {
            book = book.with_protocol(protocol.to_protocol()?);
        }
        Ok(book)
    }
}

impl FromStr for Config {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parse Config.toml")
    }
}
