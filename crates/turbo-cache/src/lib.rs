//! Type-safe Key-Value persistence layer for TurboCart.
//!
//! Provides a small [`KvStore`] trait for raw byte storage, two backends
//! ([`MemoryStore`] and [`FileStore`]), and a [`Cache`] wrapper that adds
//! automatic JSON serialization on top of any backend.
//!
//! # Example
//!
//! ```rust
//! use turbo_cache::{Cache, MemoryStore};
//!
//! let cache = Cache::new(MemoryStore::new());
//!
//! // Store a value
//! cache.set("cart", &vec![1, 2, 3]).unwrap();
//!
//! // Retrieve a value
//! let items: Option<Vec<u32>> = cache.get("cart").unwrap();
//! assert_eq!(items, Some(vec![1, 2, 3]));
//!
//! // Delete a value
//! cache.delete("cart").unwrap();
//! ```

mod error;
mod file;
mod kv;
mod memory;

pub use error::CacheError;
pub use file::FileStore;
pub use kv::{Cache, KvStore};
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KvStore, MemoryStore};
}
