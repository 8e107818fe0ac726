// src/app.rs
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{error, info};

use crate::application::{CommandExecutor, Commands, PoolService};
use crate::config::Config;
use crate::domain::dex::ProtocolBook;
use crate::infrastructure::blockchain::rpc_client::APTOS_MAINNET_URL;
use crate::infrastructure::blockchain::{AptosRpcClient, DexAdapterFactory, StaticTokenCatalog};
use crate::shared::errors::AppError;
use crate::shared::types::TokenDescriptor;

#[derive(Debug, Clone)]
pub struct AppCfg {
    pub rpc_url: String,
    pub timeout: Duration,
    pub page_limit: u32,
    pub protocol: String,
    pub json: bool,
    pub protocols: ProtocolBook,
    /// Extra tokens on top of the built-in table
    pub tokens: Vec<TokenDescriptor>,
}

impl Default for AppCfg {
    fn default() -> Self {
        Self {
            rpc_url: APTOS_MAINNET_URL.to_string(),
            timeout: AptosRpcClient::DEFAULT_TIMEOUT,
            page_limit: AptosRpcClient::DEFAULT_PAGE_LIMIT,
            protocol: "pancake".to_string(),
            json: false,
            protocols: ProtocolBook::default(),
            tokens: Vec::new(),
        }
    }
}

impl AppCfg {
    pub fn from_config(cfg: Config) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            rpc_url: cfg.rpc.url.clone().unwrap_or(defaults.rpc_url),
            timeout: cfg.rpc.timeout_ms.map(Duration::from_millis).unwrap_or(defaults.timeout),
            page_limit: cfg.rpc.page_limit.unwrap_or(defaults.page_limit),
            protocols: cfg.protocol_book()?,
            tokens: cfg.tokens,
            ..defaults
        })
    }

    pub fn token_catalog(&self) -> StaticTokenCatalog {
        StaticTokenCatalog::with_known_tokens().extend(self.tokens.iter().cloned())
    }
}

/// Wire the chain client, catalog and protocol provider, then run `command`
pub async fn run(app_cfg: AppCfg, command: Commands) -> Result<()> {
    let protocol = app_cfg
        .protocols
        .get(&app_cfg.protocol)
        .ok_or_else(|| {
            AppError::UnknownProtocol(format!("{} (known: {})", app_cfg.protocol, app_cfg.protocols.names().join(", ")))
        })?
        .clone();

    info!("🚀 umi-pools v{}", env!("CARGO_PKG_VERSION"));
    info!("   RPC: {}", app_cfg.rpc_url);
    info!("   Protocol: {} ({})", protocol.name, protocol.pool_account);

    let fetcher = Arc::new(AptosRpcClient::new(&app_cfg.rpc_url, app_cfg.timeout, app_cfg.page_limit)?);
    let catalog = Arc::new(app_cfg.token_catalog());
    info!("   Tracked tokens: {}", catalog.len());

    let factory = DexAdapterFactory::new(fetcher, catalog.clone());
    let service = PoolService::new(factory.create_adapter(&protocol), catalog);

    if let Err(e) = CommandExecutor::execute(command, &service, app_cfg.json).await {
        error!("❌ {}", e);
        return Err(e.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::blockchain::TokenCatalog;

    #[test]
    fn test_from_config_keeps_defaults() {
        let cfg: Config = r#"
[rpc]
page_limit = 25

[[tokens]]
type = "0xabc::moon::MOON"
symbol = "MOON"
decimals = 6
"#
        .parse()
        .unwrap();

        let app_cfg = AppCfg::from_config(cfg).unwrap();

        assert_eq!(app_cfg.rpc_url, APTOS_MAINNET_URL);
        assert_eq!(app_cfg.page_limit, 25);
        assert_eq!(app_cfg.timeout, AptosRpcClient::DEFAULT_TIMEOUT);
        assert_eq!(app_cfg.protocol, "pancake");
        assert!(app_cfg.token_catalog().find_by_symbol("MOON").is_some());
        assert!(app_cfg.token_catalog().find_by_symbol("APT").is_some());
    }

    #[tokio::test]
    async fn test_unknown_protocol() {
        let app_cfg = AppCfg { protocol: "liquidswap".to_string(), ..AppCfg::default() };

        let err = run(app_cfg, Commands::Pools { limit: None }).await.unwrap_err();
        assert!(err.to_string().contains("liquidswap"));
    }
}
