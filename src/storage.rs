//! Key-value persistence backing the dashboard.
//!
//! Values are opaque strings (JSON documents in practice). Callers treat
//! writes as best-effort: the last successful write wins.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;

pub const CLASSES_KEY: &str = "classes";
pub const TASKS_KEY: &str = "tasks";
pub const NOTES_KEY: &str = "notes";
pub const USER_NAME_KEY: &str = "userName";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid storage key {0:?}")]
    InvalidKey(String),
    #[error("Storage lock poisoned")]
    Poisoned,
}

pub trait KeyValueStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: Arc<PathBuf>,
}

impl FileStorage {
    pub fn open(dir: &Path) -> Result<Self, StorageError> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            dir: Arc::new(dir.to_path_buf()),
        })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        std::fs::write(path, value)?;
        Ok(())
    }
}

/// Process-local storage; clones share the same values.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self.values.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.values.lock().map_err(|_| StorageError::Poisoned)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Reads and decodes a JSON document, falling back to `T::default()` when the
/// key is absent, unreadable or malformed.
pub(crate) fn read_json_or_default<S, T>(storage: &S, key: &str) -> T
where
    S: KeyValueStorage,
    T: serde::de::DeserializeOwned + Default,
{
    match storage.read(key) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|err| {
            tracing::warn!(key, error = %err, "discarding malformed stored data");
            T::default()
        }),
        Ok(None) => T::default(),
        Err(err) => {
            tracing::warn!(key, error = %err, "failed to read stored data");
            T::default()
        }
    }
}

/// Encodes and writes `value`. Failures are logged, never returned.
pub(crate) fn write_json<S, T>(storage: &S, key: &str, value: &T)
where
    S: KeyValueStorage,
    T: serde::Serialize + ?Sized,
{
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::error!(key, error = %err, "failed to serialize data");
            return;
        }
    };
    if let Err(err) = storage.write(key, &raw) {
        tracing::error!(key, error = %err, "failed to persist data");
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Storage whose writes always fail.
    #[derive(Clone, Default)]
    pub(crate) struct ReadOnlyStorage(pub MemoryStorage);

    impl KeyValueStorage for ReadOnlyStorage {
        fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.read(key)
        }

        fn write(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("read-only")))
        }
    }

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        assert!(storage.read("classes").unwrap().is_none());
        storage.write("classes", "[]").unwrap();
        assert_eq!(storage.read("classes").unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("classes.json").exists());
    }

    #[test]
    fn test_file_storage_rejects_path_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        assert!(matches!(
            storage.write("../escape", "x"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(storage.read(""), Err(StorageError::InvalidKey(_))));
        assert!(!dir.path().parent().unwrap().join("escape.json").exists());
    }

    #[test]
    fn test_memory_storage_clones_share_values() {
        let storage = MemoryStorage::new();
        let other = storage.clone();
        storage.write("notes", "hello").unwrap();
        assert_eq!(other.read("notes").unwrap().as_deref(), Some("hello"));
    }

    #[test]
    fn test_read_json_or_default_on_malformed() {
        let storage = MemoryStorage::new();
        storage.write("tasks", "{not json").unwrap();
        let value: Vec<u32> = read_json_or_default(&storage, "tasks");
        assert!(value.is_empty());
        let missing: Vec<u32> = read_json_or_default(&storage, "absent");
        assert!(missing.is_empty());
    }
}
