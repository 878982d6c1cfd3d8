//! Traits shared by Booster crates.

use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// A TOML-backed configuration type.
///
/// Implementors supply their project name and env mapping; path resolution,
/// loading and serialization come from the provided methods.
pub trait ConfigManager: Default + Serialize + DeserializeOwned {
    /// Project name, used for the config directory and env prefix.
    fn project_name() -> &'static str;

    /// Apply `<PROJECT>_*` environment overrides after loading.
    fn apply_env_overrides(&mut self);

    /// Flatten the configuration into `KEY=value` pairs.
    fn to_env_vars(&self) -> Result<Vec<(String, String)>>;

    /// Env var naming an explicit config file (`BOOSTER_CONFIG`).
    fn config_env_var() -> String {
        format!("{}_CONFIG", Self::project_name().to_uppercase())
    }

    /// `<config dir>/<project>/config.toml`.
    fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(Self::project_name()).join("config.toml"))
    }

    /// Explicit path, else the env var, else the default location.
    fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }
        if let Ok(path) = std::env::var(Self::config_env_var())
            && !path.is_empty()
        {
            return Some(PathBuf::from(path));
        }
        Self::default_config_path()
    }

    /// Load from the resolved path, falling back to defaults when no file
    /// exists, then apply env overrides.
    fn load(explicit: Option<&str>) -> Result<Self> {
        let mut config = match Self::resolve_config_path(explicit) {
            Some(path) if path.exists() => {
                let content =
                    std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
                log::debug!("loading config from {}", path.display());
                toml::from_str(&content)?
            }
            _ => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Pretty TOML form, as written by `config init`.
    fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }
}
