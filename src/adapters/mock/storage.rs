//! In-memory key/value store for testing.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::{KeyValueStore, StorageError};

/// In-memory store with switchable write failures.
///
/// Clones share the same underlying map, so a test can hand one clone to the
/// code under test and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    values: Arc<Mutex<HashMap<String, String>>>,
    writes_should_fail: Arc<Mutex<bool>>,
}

impl InMemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with entries.
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let store = Self::new();
        {
            let mut values = store.values.lock().unwrap();
            for (key, value) in entries {
                values.insert(key.to_string(), value.to_string());
            }
        }
        store
    }

    /// Make every subsequent `set`/`remove` fail.
    pub fn set_writes_should_fail(&self, should_fail: bool) {
        *self.writes_should_fail.lock().unwrap() = should_fail;
    }

    /// Whether the key currently holds a value.
    pub fn contains(&self, key: &str) -> bool {
        self.values.lock().unwrap().contains_key(key)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.values.lock().unwrap().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_writable(&self) -> Result<(), StorageError> {
        if *self.writes_should_fail.lock().unwrap() {
            return Err(StorageError::Io("simulated write failure".to_string()));
        }
        Ok(())
    }
}

impl KeyValueStore for InMemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        self.values.lock().unwrap().remove(key);
        Ok(())
    }
}
