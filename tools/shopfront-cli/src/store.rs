//! File-backed key-value store.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use shopfront_cart::{KeyValueStore, StorageError};

/// A JSON file holding a `localStorage`-style map of string keys to string
/// values. A missing file is an empty store; the file is created on first
/// write.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(unavailable(&self.path, e)),
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| unavailable(&self.path, e))
    }

    fn write(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let content =
            serde_json::to_string_pretty(items).map_err(|e| unavailable(&self.path, e))?;
        std::fs::write(&self.path, content).map_err(|e| unavailable(&self.path, e))
    }
}

fn unavailable(path: &Path, err: impl std::fmt::Display) -> StorageError {
    StorageError::Unavailable(format!("{}: {}", path.display(), err))
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self.read()?;
        items.insert(key.to_string(), value.to_string());
        self.write(&items)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        let mut items = self.read()?;
        if items.remove(key).is_some() {
            self.write(&items)?;
        }
        Ok(())
    }
}
