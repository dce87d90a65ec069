//! Store configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use turbo_data::{FetchPolicy, RetryPolicy, TimeoutConfig};

use crate::error::ConfigError;

/// Default storage key, shared with the web storefront.
pub const DEFAULT_STORAGE_KEY: &str = "@RocketShoes:cart";

/// Environment variable overriding `api.base_url`.
pub const ENV_API_URL: &str = "TURBO_CART_API_URL";

/// Environment variable overriding `storage.dir`.
pub const ENV_STORAGE_DIR: &str = "TURBO_CART_STORAGE_DIR";

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Storefront API configuration.
    #[serde(default)]
    pub api: ApiConfig,

    /// Snapshot storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CartConfig {
    /// Load config from a file. `.json` files are parsed as JSON, anything
    /// else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;

        let parsed = if path.extension().and_then(|e| e.to_str()) == Some("json") {
            serde_json::from_str(&content).map_err(|e| e.to_string())
        } else {
            toml::from_str(&content).map_err(|e| e.to_string())
        };

        parsed.map_err(|message| ConfigError::Parse {
            path: display,
            message,
        })
    }

    /// Apply `TURBO_CART_*` environment overrides.
    pub fn with_env(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.is_empty()) {
            self.api.base_url = url;
        }
        if let Some(dir) = lookup(ENV_STORAGE_DIR).filter(|v| !v.is_empty()) {
            self.storage.dir = PathBuf::from(dir);
        }
        self
    }
}

/// Storefront API configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL serving `/products/{id}` and `/stock/{id}`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout. Unset keeps the per-dependency defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,

    /// Retries for transient failures. Unset keeps the per-dependency defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u32>,
}

fn default_base_url() -> String {
    "http://localhost:3333".to_string()
}

impl ApiConfig {
    /// Fetch policy implied by the config, if it overrides anything.
    pub fn fetch_policy(&self) -> Option<FetchPolicy> {
        if self.timeout_ms.is_none() && self.max_retries.is_none() {
            return None;
        }
        let defaults = FetchPolicy::default();
        let timeout = self
            .timeout_ms
            .map(|ms| TimeoutConfig::from_total(Duration::from_millis(ms)))
            .unwrap_or(defaults.timeout);
        let retry = self.max_retries.map(RetryPolicy::new).unwrap_or(defaults.retry);
        Some(FetchPolicy::new(timeout, retry))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: None,
            max_retries: None,
        }
    }
}

/// Snapshot storage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Key the snapshot is stored under.
    #[serde(default = "default_storage_key")]
    pub key: String,

    /// Directory for the file-backed store.
    #[serde(default = "default_storage_dir")]
    pub dir: PathBuf,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from(".turbo-cart")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: default_storage_key(),
            dir: default_storage_dir(),
        }
    }
}

/// Output format for logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON format (for production/log aggregation).
    Json,
    /// Human-readable format (for development).
    #[default]
    Human,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}
