use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for record store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record at the requested position
    #[error("Record not found: {0}")]
    NotFound(String),
    /// Key cannot be mapped onto the backing storage
    #[error("Invalid key: {0}")]
    InvalidKey(String),
    /// Error occurred during a store operation
    #[error("Storage error: {0}")]
    StorageError(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// String slots addressed by key, the shape of browser local storage
#[async_trait]
pub trait KeyValueStore: Send + Sync + Debug {
    /// Read a slot; `None` when it was never written or has been deleted
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite a slot
    async fn set(&self, key: &str, value: String) -> Result<(), StoreError>;

    /// Remove a slot; removing a missing slot is not an error
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}

/// Type alias for Arc-wrapped KeyValueStore trait objects
pub type KeyValueStoreRef = Arc<dyn KeyValueStore>;
