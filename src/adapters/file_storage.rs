//! JSON-file backed key/value store.
//!
//! Stores the session entries at `ClientConfig::storage_path()` (by default
//! `~/.bloghub/storage.json`) as a flat string-to-string map. A missing or unreadable file reads as empty.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::traits::{KeyValueStore, StorageError};

/// The storage file name.
pub const STORAGE_FILE: &str = "storage.json";

/// Key/value store persisted as a single JSON object on disk.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileStorage {
    /// Create a store backed by an explicit file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_map(&self) -> BTreeMap<String, String> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(_) => return BTreeMap::new(),
        };

        match serde_json::from_reader(BufReader::new(file)) {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!("Ignoring unreadable storage file {}: {}", self.path.display(), e);
                BTreeMap::new()
            }
        }
    }

    fn save_map(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, map)?;
        writer.flush()?;
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load_map().remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock();
        let mut map = self.load_map();
        map.insert(key.to_string(), value.to_string());
        self.save_map(&map)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock();
        let mut map = self.load_map();
        if map.remove(key).is_none() {
            return Ok(());
        }
        if map.is_empty() {
            return match fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            };
        }
        self.save_map(&map)
    }
}
