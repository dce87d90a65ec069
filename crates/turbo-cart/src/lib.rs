//! Client-side shopping cart store for TurboCommerce storefronts.
//!
//! [`CartStore`] holds the cart line items in memory, mirrors every change
//! to a persistent key-value snapshot, and checks each mutation against the
//! storefront's stock service:
//!
//! - `add_product` - one more unit, as long as stock allows
//! - `remove_product` - drop a line item
//! - `update_product_amount` - set an exact amount, as long as stock allows
//!
//! Failures come back as [`CartError`] and are also handed to a
//! [`Notifier`], which is where a UI shows its toast.
//!
//! # Example
//!
//! ```rust,no_run
//! use turbo_cart::{init_logging, CartConfig, CartStore};
//! use turbo_commerce::ProductId;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CartConfig::load("cart.toml")?.with_env();
//! init_logging(&config.logging)?;
//!
//! let store = CartStore::from_config(&config)?;
//! if store.add_product(ProductId::new(7)).await.is_ok() {
//!     println!("{} line items", store.cart().len());
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod logging;
mod notify;
mod store;

pub use config::{
    ApiConfig, CartConfig, LogFormat, LoggingConfig, StorageConfig, DEFAULT_STORAGE_KEY,
    ENV_API_URL, ENV_STORAGE_DIR,
};
pub use error::ConfigError;
pub use logging::init_logging;
pub use notify::{Notifier, NullNotifier, RecordingNotifier, TracingNotifier};
pub use store::{CartStore, CartStoreBuilder};

pub use turbo_commerce::{CartError, ErrorKind};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{CartConfig, CartError, CartStore, Notifier};
    pub use turbo_commerce::prelude::*;
}
