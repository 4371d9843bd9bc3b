//! Key-value persistence.
//!
//! The storefront keeps client-side state (the cart) in a small string key-value store. Reads
//! and writes are best-effort: callers get typed helpers that fall back to defaults instead of
//! failing.

use std::io;

use mockall::automock;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::warn;

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Io(#[from] io::Error),

    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("failed to encode value: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("storage quota exceeded")]
    QuotaExceeded,
}

/// A string key-value store with the semantics of browser local storage.
#[automock]
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value under `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Read and decode the JSON value under `key`.
///
/// A missing key, an unavailable store and a corrupt value all yield `T::default()`; the latter
/// two are logged.
pub fn load_or_default<T>(store: &dyn KeyValueStore, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(error) => {
            warn!(key, %error, "failed to read from storage, using default");
            return T::default();
        }
    };

    serde_json::from_str(&raw).unwrap_or_else(|error| {
        warn!(key, %error, "discarding unreadable stored value");
        T::default()
    })
}

/// Encode `value` as JSON and store it under `key`.
///
/// # Errors
///
/// Returns an error if the value cannot be encoded or the store rejects the write.
pub fn save<T>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
{
    let encoded = serde_json::to_string(value).map_err(StorageError::Encode)?;

    store.set(key, &encoded)
}
