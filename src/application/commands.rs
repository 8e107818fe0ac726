//! CLI commands and handlers
use bigdecimal::BigDecimal;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use crate::application::services::{PoolService, QuoteReport, QuoteRequest};
use crate::domain::pool::Pool;
use crate::shared::errors::AppError;

#[derive(Parser, Debug)]
#[command(name = "umi-pools")]
#[command(version, about = "PancakeSwap (Aptos) pool reader and swap quoter")]
pub struct Cli {
    /// Path to config file (optional)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Aptos fullnode REST endpoint (overrides config)
    #[arg(long, global = true)]
    pub rpc_url: Option<String>,

    /// Protocol to read pools from
    #[arg(long, global = true)]
    pub protocol: Option<String>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List pools of the selected protocol
    Pools {
        /// Limit number of pools to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Quote a swap against one pool
    Quote {
        /// Pair name, e.g. APT-USDC
        #[arg(long)]
        pair: String,

        /// Source token symbol or full coin type
        #[arg(long)]
        from: String,

        /// Input amount in whole tokens (1.5 = one and a half APT)
        #[arg(long)]
        amount: BigDecimal,

        /// Slippage tolerance in basis points
        #[arg(long, default_value_t = 50)]
        slippage_bps: u32,
    },
}

pub struct CommandExecutor;

impl CommandExecutor {
    /// Execute the selected command
    pub async fn execute(command: Commands, service: &PoolService, json: bool) -> Result<(), AppError> {
        match command {
            Commands::Pools { limit } => Self::execute_pools_command(service, limit, json).await,
            Commands::Quote { pair, from, amount, slippage_bps } => {
                let request = QuoteRequest { pair, from, amount, slippage_bps };
                Self::execute_quote_command(service, &request, json).await
            }
        }
    }

    /// Execute pools command
    async fn execute_pools_command(service: &PoolService, limit: Option<usize>, json: bool) -> Result<(), AppError> {
        info!("🔍 Loading {} pools...", service.protocol_name());
        let pools = service.list_pools().await?;
        let shown = &pools[..limit.unwrap_or(pools.len()).min(pools.len())];

        if json {
            println!("{}", to_json(&shown)?);
            return Ok(());
        }

        for line in render_pools(shown) {
            println!("{line}");
        }
        info!("✅ {} pools found (shown: {})", pools.len(), shown.len());
        Ok(())
    }

    /// Execute quote command
    async fn execute_quote_command(service: &PoolService, request: &QuoteRequest, json: bool) -> Result<(), AppError> {
        let report = service.quote(request).await?;

        if json {
            println!("{}", to_json(&report)?);
        } else {
            for line in render_quote(&report) {
                println!("{line}");
            }
        }
        Ok(())
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::ConfigError(format!("serialize output: {e}")))
}

pub fn render_pools(pools: &[Pool]) -> Vec<String> {
    pools
        .iter()
        .enumerate()
        .map(|(i, pool)| {
            let updated = pool
                .reserves_updated_at()
                .map(|t| format!(", updated {}", t.to_rfc3339()))
                .unwrap_or_default();
            format!(
                "{:>3}. {:<14} {} / {}  ({}{})",
                i + 1,
                pool.pair().name(),
                pool.pair().coin_x(),
                pool.pair().coin_y(),
                pool.resource_type(),
                updated,
            )
        })
        .collect()
}

pub fn render_quote(report: &QuoteReport) -> Vec<String> {
    let fees = report.fees.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
    let impact = report
        .price_impact_bps
        .as_ref()
        .map(|bps| format!("{} bps", bps.with_scale(2)))
        .unwrap_or_else(|| "n/a".to_string());

    vec![
        format!("📊 {} on {}", report.pair, report.protocol),
        format!("   In:           {}", report.input),
        format!("   Out:          {}", report.output),
        format!("   Fee:          {}", fees),
        format!("   Price impact: {}", impact),
        format!("   Min out:      {} ({} bps slippage)", report.min_output, report.slippage_bps),
        format!("   Snapshot:     {}", report.pool_fetched_at.to_rfc3339()),
    ]
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::domain::dex::{ProtocolConfig, PANCAKE_ACCOUNT};
    use crate::domain::pool::PoolPair;
    use crate::shared::types::{TokenAmount, TokenDescriptor};

    fn pool() -> Pool {
        let apt = Arc::new(TokenDescriptor::new("0x1::aptos_coin::AptosCoin", "APT", 8));
        let usdc = Arc::new(TokenDescriptor::new("0x2::asset::USDC", "USDC", 6));
        let pancake = ProtocolConfig::pancake();
        Pool::new(
            &pancake.name,
            &format!("{PANCAKE_ACCOUNT}::swap::TokenPairReserve<0x1::aptos_coin::AptosCoin, 0x2::asset::USDC>"),
            pancake.pool_account.clone(),
            PoolPair::new(
                TokenAmount::from_base_units(apt, 150_000_000),
                TokenAmount::from_base_units(usdc, 12_000_000),
            ),
            pancake.curve,
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        )
        .with_reserves_updated_at(Utc.timestamp_opt(1_700_000_000, 0).single())
    }

    #[test]
    fn test_parse_quote_command() {
        let cli = Cli::parse_from([
            "umi-pools", "--json", "quote", "--pair", "APT-USDC", "--from", "APT", "--amount", "1.25",
        ]);

        assert!(cli.json);
        match cli.command {
            Commands::Quote { pair, from, amount, slippage_bps } => {
                assert_eq!(pair, "APT-USDC");
                assert_eq!(from, "APT");
                assert_eq!(amount, "1.25".parse::<BigDecimal>().unwrap());
                assert_eq!(slippage_bps, 50);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["umi-pools", "pools", "--limit", "3", "--rpc-url", "http://localhost:8080"]);

        assert_eq!(cli.rpc_url.as_deref(), Some("http://localhost:8080"));
        assert!(matches!(cli.command, Commands::Pools { limit: Some(3) }));
    }

    #[test]
    fn test_render_pools() {
        let lines = render_pools(&[pool()]);

        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("APT-USDC"));
        assert!(lines[0].contains("1.5 APT / 12 USDC"));
        assert!(lines[0].contains("::swap::TokenPairReserve<0x1::aptos_coin::AptosCoin, 0x2::asset::USDC>"));
        assert!(lines[0].contains("updated 2023-11-14T22:13:20+00:00"));
    }

    #[test]
    fn test_pool_json_view() {
        let value = serde_json::to_value(pool()).unwrap();

        assert_eq!(value["pair"]["name"], "APT-USDC");
        assert_eq!(value["pair"]["coin_x"]["amount"], "150000000");
        assert_eq!(value["protocol_name"], "pancake");
        assert_eq!(value["curve"]["kind"], "constant_product");
    }
}
