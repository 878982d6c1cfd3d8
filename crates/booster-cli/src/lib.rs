//! # booster-cli
//!
//! Terminal operator console for the Booster backend.
//!
//! Each view of the console is a subcommand:
//! - Login, signup and session display
//! - Wallet group and token management
//! - Distribute, collect, burn, buy and sell, with live per-wallet results
//! - Transaction progress and resume
//! - Usage reports
//! - Config file management

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_handlers;
pub mod error;
pub mod output;

pub use cli::Cli;
pub use commands::{Console, execute};
pub use config::BoosterConfig;
pub use error::{Error, Result};

/// Log filter: `RUST_LOG` if set, else `-v`/`-vv`, else the configured level.
pub fn log_filter(verbose: u8, configured: &str) -> tracing_subscriber::EnvFilter {
    if let Ok(filter) = tracing_subscriber::EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = match verbose {
        0 => configured,
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::EnvFilter::try_new(level).unwrap_or_else(|_| "info".into())
}
