//! Persistence adapter: key-value storage of JSON records.
//!
//! The contract mirrors browser local storage: `get` returns the stored JSON
//! value or nothing, `set` serializes and stores, `remove` is a no-op for
//! absent keys. Malformed stored data is never an error; it is logged and
//! treated as absent so callers fall back to their defaults.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::StorageError;

/// Durable, instance-scoped key-value store of JSON values.
pub trait Storage {
    /// Read the value stored under `key`, or `None` when absent or
    /// unparsable.
    fn get(&self, key: &str) -> Option<Value>;

    /// Serialize and store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &Value) -> Result<(), StorageError>;

    /// Delete the value under `key`. Absent keys are ignored.
    fn remove(&mut self, key: &str);

    /// Typed read: a record that parses as JSON but not as `T` counts as
    /// absent, same as raw corruption.
    fn get_record<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.get(key)?;
        match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(key, error = %err, "stored record has unexpected shape, treating as absent");
                None
            }
        }
    }

    /// Typed write.
    fn set_record<T: Serialize>(&mut self, key: &str, record: &T) -> Result<(), StorageError> {
        let value = serde_json::to_value(record).map_err(|source| StorageError::Serialize {
            key: key.to_string(),
            source,
        })?;
        self.set(key, &value)
    }
}

/// File-backed storage: one `<key>.json` file per key under a directory.
///
/// Survives process restarts; clearing the directory is the analog of
/// clearing browser storage.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Use `dir` as the storage root. The directory is created on first
    /// write, not here.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Default per-user storage root (`<data dir>/whatif`), when the
    /// platform exposes one.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("whatif"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<Value> {
        let path = self.key_path(key);
        let content = std::fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(key, error = %err, "stored record is malformed, treating as absent");
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &Value) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| StorageError::Io {
            key: key.to_string(),
            source,
        })?;
        let content = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
            key: key.to_string(),
            source,
        })?;
        std::fs::write(self.key_path(key), content).map_err(|source| StorageError::Io {
            key: key.to_string(),
            source,
        })
    }

    fn remove(&mut self, key: &str) {
        if let Err(err) = std::fs::remove_file(self.key_path(key)) {
            if err.kind() != std::io::ErrorKind::NotFound {
                warn!(key, error = %err, "failed to remove stored record");
            }
        }
    }
}

/// In-memory storage for tests and embedders that do not want durability.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, Value>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &Value) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.clone());
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}
