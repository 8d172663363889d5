//! Key-value persistence for the cart.
//!
//! The cart is stored as a single blob under a fixed key. Any backend that can
//! get and set bytes by string key can hold it:
//!
//! - [`MemoryStore`] - process-local, for tests and throwaway sessions
//! - [`FileStore`] - one file per key under a data directory

mod file;
mod memory;

use async_trait::async_trait;
use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors returned by a [`KeyValueStore`].
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key cannot be used with this backend.
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Backend-specific failure.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Asynchronous get/set storage addressed by string key.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, or `None` if nothing was ever written.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replace the value under `key`.
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError>;
}
