//! In-memory store for tests and development.

use crate::{CacheError, KvStore};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// HashMap-backed [`KvStore`]. Clone-friendly via `Arc`; clones share data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    storage: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> CacheError {
    CacheError::StoreError("lock poisoned".into())
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let storage = self.storage.read().map_err(poisoned)?;
        Ok(storage.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
        let mut storage = self.storage.write().map_err(poisoned)?;
        storage.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut storage = self.storage.write().map_err(poisoned)?;
        storage.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, CacheError> {
        let storage = self.storage.read().map_err(poisoned)?;
        let mut keys: Vec<String> = storage.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}
