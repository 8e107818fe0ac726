use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use umi_pools::app::{self, AppCfg};
use umi_pools::application::Cli;
use umi_pools::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    // Priority: CLI args > Config file > Defaults
    let mut app_cfg = match &cli.config {
        Some(path) => AppCfg::from_config(Config::from_file(path)?)?,
        None => AppCfg::default(),
    };
    if let Some(rpc_url) = cli.rpc_url {
        app_cfg.rpc_url = rpc_url;
    }
    if let Some(protocol) = cli.protocol {
        app_cfg.protocol = protocol;
    }
    app_cfg.json = cli.json;

    app::run(app_cfg, cli.command).await
}
