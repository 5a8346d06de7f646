//! Global whatson configuration.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

fn default_locale() -> String {
    "en-GB".to_string()
}

/// Global configuration at ~/.config/whatson/config.toml
///
/// Everything else the CLI needs arrives per invocation as flags; the
/// config file only holds defaults worth persisting.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_locale")]
    pub default_locale: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_locale: default_locale(),
        }
    }
}

impl Config {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("whatson").join("config.toml"))
    }

    /// Load the config file if present; a missing file means defaults.
    pub fn load() -> Result<Config> {
        let Some(path) = Self::config_path() else {
            return Ok(Config::default());
        };
        if !path.exists() {
            return Ok(Config::default());
        }

        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
    }
}
