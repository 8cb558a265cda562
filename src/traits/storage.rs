//! Persistent key/value storage abstraction.
//!
//! The session token and user record live in a small string-keyed store that
//! survives restarts. Reads are synchronous because the session is rehydrated
//! before the first frame is drawn and the token is read on every request.

use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// Filesystem failure while reading or writing the backing file
    #[error("Storage IO error: {0}")]
    Io(String),
    /// The backing file could not be (de)serialized
    #[error("Storage serialization error: {0}")]
    Serialization(String),
    /// The store could not be located (no home directory)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Serialization(e.to_string())
    }
}

/// String-keyed persistent storage.
///
/// Implementations include the JSON-file store used in production and an
/// in-memory store for tests.
pub trait KeyValueStore: Send + Sync {
    /// Read a value. Missing keys are `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a value. Removing a missing key succeeds.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
