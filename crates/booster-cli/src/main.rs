//! Booster CLI
//!
//! Operator console for the Booster multi-wallet backend.

use anyhow::Context;
use booster_cli::{BoosterConfig, Cli};
use booster_core::ConfigManager;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = BoosterConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::fmt()
        .with_env_filter(booster_cli::log_filter(cli.verbose, &config.logging.level))
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(api = %config.api.base_url, push = %config.push.url, "Starting");

    let mut stdout = std::io::stdout().lock();
    booster_cli::execute(&cli, &config, &mut stdout).await?;
    Ok(())
}
