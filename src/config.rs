//! Sync configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/quillsync/config.toml)
//! 3. Environment variables (QUILLSYNC_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix
const ENV_PREFIX: &str = "QUILLSYNC";

/// Sync engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// How many identifiers to reserve from the store per round trip
    #[serde(default = "default_id_batch_size")]
    pub id_batch_size: usize,

    /// Maximum delete attempts under sustained revision conflicts
    #[serde(default = "default_delete_retry_limit")]
    pub delete_retry_limit: u32,

    /// Base backoff between conflicted delete attempts, in milliseconds
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            id_batch_size: default_id_batch_size(),
            delete_retry_limit: default_delete_retry_limit(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

impl Config {
    /// Load configuration from the default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (QUILLSYNC_ID_BATCH_SIZE, ...)
    /// 2. Config file (~/.config/quillsync/config.toml or QUILLSYNC_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(format!("{}_ID_BATCH_SIZE", ENV_PREFIX)) {
            if let Ok(n) = val.parse() {
                self.id_batch_size = n;
            }
        }

        if let Ok(val) = std::env::var(format!("{}_DELETE_RETRY_LIMIT", ENV_PREFIX)) {
            if let Ok(n) = val.parse() {
                self.delete_retry_limit = n;
            }
        }

        if let Ok(val) = std::env::var(format!("{}_RETRY_BACKOFF_MS", ENV_PREFIX)) {
            if let Ok(n) = val.parse() {
                self.retry_backoff_ms = n;
            }
        }
    }

    /// Path to the config file
    ///
    /// Respects QUILLSYNC_CONFIG, otherwise ~/.config/quillsync/config.toml.
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("quillsync")
            .join("config.toml")
    }
}

fn default_id_batch_size() -> usize {
    100
}

fn default_delete_retry_limit() -> u32 {
    5
}

fn default_retry_backoff_ms() -> u64 {
    50
}
