//! Console configuration.
//!
//! Loaded from `<config dir>/booster/config.toml` (or `--config` /
//! `BOOSTER_CONFIG`), then overridden by `BOOSTER_*` environment variables.

use std::path::PathBuf;
use std::time::Duration;

use booster_core::{ConfigManager, FileSessionStore, Result};
use serde::{Deserialize, Serialize};

/// Default REST base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:5080/api";

/// Default push server URL.
pub const DEFAULT_PUSH_URL: &str = "http://localhost:5080";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoosterConfig {
    /// REST backend
    pub api: ApiConfig,
    /// Push channel
    pub push: PushConfig,
    /// Session storage
    pub session: SessionConfig,
    /// Log output
    pub logging: LoggingConfig,
}

/// `[api]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every endpoint is appended to
    pub base_url: String,
    /// Per-request timeout
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

/// `[push]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PushConfig {
    /// Socket.IO server
    pub url: String,
    /// Handshake timeout
    pub connect_timeout_secs: u64,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_PUSH_URL.to_string(),
            connect_timeout_secs: 10,
        }
    }
}

/// `[session]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Session file; `<config dir>/booster/session.json` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// `[logging]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl BoosterConfig {
    /// REST timeout.
    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// Push handshake timeout.
    pub fn push_timeout(&self) -> Duration {
        Duration::from_secs(self.push.connect_timeout_secs)
    }

    /// The session file store this configuration points at.
    pub fn session_store(&self) -> Result<FileSessionStore> {
        match self.session.path.as_deref().filter(|p| !p.is_empty()) {
            Some(path) => Ok(FileSessionStore::new(PathBuf::from(path))),
            None => FileSessionStore::default_for(Self::project_name()),
        }
    }
}

impl ConfigManager for BoosterConfig {
    fn project_name() -> &'static str {
        "booster"
    }

    fn apply_env_overrides(&mut self) {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        if let Some(url) = var("BOOSTER_API_URL") {
            self.api.base_url = url;
        }
        if let Some(url) = var("BOOSTER_PUSH_URL") {
            self.push.url = url;
        }
        if let Some(path) = var("BOOSTER_SESSION_PATH") {
            self.session.path = Some(path);
        }
        if let Some(level) = var("BOOSTER_LOG_LEVEL") {
            self.logging.level = level;
        }
    }

    fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let mut vars = vec![
            ("BOOSTER_API_URL".to_string(), self.api.base_url.clone()),
            ("BOOSTER_PUSH_URL".to_string(), self.push.url.clone()),
            ("BOOSTER_LOG_LEVEL".to_string(), self.logging.level.clone()),
        ];
        if let Some(path) = &self.session.path {
            vars.push(("BOOSTER_SESSION_PATH".to_string(), path.clone()));
        }
        Ok(vars)
    }
}
