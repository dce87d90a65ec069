//! Storefront HTTP client and service seams for TurboCart.
//!
//! This crate provides:
//! - `CatalogService` / `StockService` - the read-only queries a cart needs
//! - `HttpStorefrontApi` - their implementation over the storefront REST API
//! - `FetchClient` - JSON client with per-dependency timeout/retry
//! - `DependencyTag`, `TimeoutConfig`, `RetryPolicy` - fetch policy building blocks
//!
//! # Example
//!
//! ```rust,no_run
//! use turbo_data::{FetchClient, HttpStorefrontApi, StockService};
//! use turbo_commerce::ProductId;
//!
//! # async fn run() -> Result<(), turbo_data::FetchError> {
//! let api = HttpStorefrontApi::new(FetchClient::new("http://localhost:3333")?);
//! let stock = api.stock(ProductId::new(7)).await?;
//! println!("{} units left", stock.amount);
//! # Ok(())
//! # }
//! ```

mod client;
mod dependency;
mod error;
mod retry;
mod service;
mod timeout;

pub use client::{FetchClient, FetchPolicy};
pub use dependency::DependencyTag;
pub use error::FetchError;
pub use retry::{BackoffStrategy, RetryCondition, RetryPolicy};
pub use service::{CatalogService, HttpStorefrontApi, StockService};
pub use timeout::TimeoutConfig;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        CatalogService, DependencyTag, FetchClient, FetchError, FetchPolicy, HttpStorefrontApi,
        StockService,
    };
}
