//! Error types for store wiring.
//!
//! Cart operations themselves fail with [`turbo_commerce::CartError`]; the
//! errors here only come from building a store out of configuration.

use thiserror::Error;

/// Errors raised while loading configuration or wiring a store.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the config file.
    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: String, message: String },

    /// Storefront API client could not be built.
    #[error("API client error: {0}")]
    Api(#[from] turbo_data::FetchError),

    /// Persistent store could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] turbo_cache::CacheError),

    /// Logging could not be initialized.
    #[error("Logging error: {0}")]
    Logging(String),
}
