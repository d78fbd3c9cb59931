use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use log::debug;

use crate::store::{KeyValueStore, StoreError};

/// In-memory implementation of KeyValueStore
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    /// Thread-safe storage of slots
    slots: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryKeyValueStore {
    /// Create a new InMemoryKeyValueStore
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let slots = self.slots.read().map_err(|e| {
            StoreError::StorageError(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(slots.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut slots = self.slots.write().map_err(|e| {
            StoreError::StorageError(format!("Failed to acquire write lock: {}", e))
        })?;

        debug!("Writing {} bytes to slot {}", value.len(), key);
        slots.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut slots = self.slots.write().map_err(|e| {
            StoreError::StorageError(format!("Failed to acquire write lock: {}", e))
        })?;

        if slots.remove(key).is_some() {
            debug!("Deleted slot {}", key);
        }
        Ok(())
    }
}
