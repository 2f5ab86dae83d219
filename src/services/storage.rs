//! Durable key-value storage for sessions and palette overrides.
//!
//! Values are UTF-8 JSON text stored under a small fixed set of keys.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::{BoardError, BoardResult};

/// Key holding the serialized session document.
pub const SESSION_KEY: &str = "soundboardSession";

/// Key holding the custom palette colors.
pub const PALETTE_KEY: &str = "customButtonColors";

/// A string key-value store. Writes fully overwrite prior content.
pub trait KeyValueStore {
    /// Reads the value under `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> BoardResult<Option<String>>;

    /// Stores `value` under `key`.
    fn set(&mut self, key: &str, value: &str) -> BoardResult<()>;

    /// Deletes `key`. Removing a missing key succeeds.
    fn remove(&mut self, key: &str) -> BoardResult<()>;
}

/// Store backed by one JSON file per key inside a directory.
///
/// Writes go to a temp file that is renamed over the target, so a failed write
/// never leaves a truncated value behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the value files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> BoardResult<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BoardError::StorageUnavailable(format!(
                "Failed to read {}: {e}",
                path.display()
            ))),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> BoardResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            BoardError::StorageUnavailable(format!(
                "Failed to create store directory {}: {e}",
                self.dir.display()
            ))
        })?;

        let path = self.path_for(key);
        let temp_path = path.with_extension("json.tmp");

        fs::write(&temp_path, value).map_err(|e| {
            BoardError::StorageUnavailable(format!(
                "Failed to write temp file {}: {e}",
                temp_path.display()
            ))
        })?;

        fs::rename(&temp_path, &path).map_err(|e| {
            BoardError::StorageUnavailable(format!(
                "Failed to rename temp file to {}: {e}",
                path.display()
            ))
        })
    }

    fn remove(&mut self, key: &str) -> BoardResult<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(BoardError::StorageUnavailable(format!(
                "Failed to remove {}: {e}",
                path.display()
            ))),
        }
    }
}

#[derive(Debug, Default)]
struct MemoryInner {
    values: HashMap<String, String>,
    fail_writes: bool,
    writes: usize,
}

/// In-memory store. Clones share the same contents, which lets a caller keep a
/// handle for inspection after giving one to a session store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<MemoryInner>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent writes fail with `StorageUnavailable` (quota exceeded).
    pub fn set_fail_writes(&self, fail: bool) {
        self.inner.borrow_mut().fail_writes = fail;
    }

    /// Number of successful writes so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.inner.borrow().writes
    }

    /// Raw stored value, bypassing the trait.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<String> {
        self.inner.borrow().values.get(key).cloned()
    }

    /// Seeds a raw value without counting it as a write.
    pub fn insert(&self, key: &str, value: &str) {
        self.inner
            .borrow_mut()
            .values
            .insert(key.to_string(), value.to_string());
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> BoardResult<Option<String>> {
        Ok(self.value(key))
    }

    fn set(&mut self, key: &str, value: &str) -> BoardResult<()> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail_writes {
            return Err(BoardError::StorageUnavailable(format!(
                "quota exceeded writing '{key}'"
            )));
        }
        inner.values.insert(key.to_string(), value.to_string());
        inner.writes += 1;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> BoardResult<()> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail_writes {
            return Err(BoardError::StorageUnavailable(format!(
                "store rejected removal of '{key}'"
            )));
        }
        inner.values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::new(temp_dir.path().join("store"));

        assert_eq!(store.get(SESSION_KEY).unwrap(), None);

        store.set(SESSION_KEY, r#"{"buttons":[]}"#).unwrap();
        assert_eq!(
            store.get(SESSION_KEY).unwrap().as_deref(),
            Some(r#"{"buttons":[]}"#)
        );
        assert!(!temp_dir
            .path()
            .join("store")
            .join("soundboardSession.json.tmp")
            .exists());

        store.set(SESSION_KEY, "{}").unwrap();
        assert_eq!(store.get(SESSION_KEY).unwrap().as_deref(), Some("{}"));

        store.remove(SESSION_KEY).unwrap();
        store.remove(SESSION_KEY).unwrap();
        assert_eq!(store.get(SESSION_KEY).unwrap(), None);
    }

    #[test]
    fn test_file_store_unwritable_dir() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let mut store = FileStore::new(blocker.join("store"));
        let err = store.set(SESSION_KEY, "{}").unwrap_err();
        assert!(matches!(err, BoardError::StorageUnavailable(_)));
    }

    #[test]
    fn test_memory_store_shares_contents() {
        let handle = MemoryStore::new();
        let mut store = handle.clone();

        store.set(PALETTE_KEY, "{}").unwrap();
        assert_eq!(handle.value(PALETTE_KEY).as_deref(), Some("{}"));
        assert_eq!(handle.write_count(), 1);

        handle.set_fail_writes(true);
        assert!(store.set(PALETTE_KEY, "[]").is_err());
        assert_eq!(handle.value(PALETTE_KEY).as_deref(), Some("{}"));
    }
}
