//! Durable key/value storage behind the session store.
//!
//! The engine only ever needs `get`/`set`/`remove` over string keys, so the
//! backing store is an injectable trait: tests run against `MemoryStorage`,
//! the binary against `FileStorage`. A value that cannot be read is treated
//! as absent; eviction by the host is an accepted failure mode.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::EngineError;

/// A process-external string key/value store.
pub trait KeyValueStorage: Send + Sync {
    /// Read a value. Missing and unreadable both come back as `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), EngineError>;

    /// Delete a value. Deleting a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), EngineError>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), EngineError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), EngineError> {
        (**self).remove(key)
    }
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), EngineError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), EngineError> {
        (**self).remove(key)
    }
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), EngineError> {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), EngineError> {
        self.values.lock().unwrap().remove(key);
        Ok(())
    }
}

/// File-backed storage: one file per key under a directory.
///
/// Writes land in a temp file first and are moved into place with `rename`,
/// so a crash mid-write leaves the previous value intact rather than a torn
/// one.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are engine-chosen identifiers, never user input.
        self.dir.join(format!("{key}.json"))
    }

    fn ensure_dir(&self) -> Result<(), EngineError> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| EngineError::Storage(format!("create {}: {e}", self.dir.display())))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Some(value),
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(key, error = %e, "unreadable stored value, treating as absent");
                }
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), EngineError> {
        self.ensure_dir()?;
        let target = self.path_for(key);
        let staging = self.dir.join(format!(".{key}.tmp"));
        std::fs::write(&staging, value)
            .map_err(|e| EngineError::Storage(format!("write {}: {e}", staging.display())))?;
        std::fs::rename(&staging, &target)
            .map_err(|e| EngineError::Storage(format!("commit {}: {e}", target.display())))
    }

    fn remove(&self, key: &str) -> Result<(), EngineError> {
        let target = self.path_for(key);
        match std::fs::remove_file(&target) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(EngineError::Storage(format!(
                "remove {}: {e}",
                target.display()
            ))),
        }
    }
}

/// Convenience for the CLI: file storage rooted at a directory path.
pub fn file_storage(dir: &Path) -> FileStorage {
    FileStorage::new(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("k"), None);
        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k"), Some("v".to_string()));
        storage.set("k", "v2").unwrap();
        assert_eq!(storage.get("k"), Some("v2".to_string()));
        storage.remove("k").unwrap();
        assert_eq!(storage.get("k"), None);
    }

    #[test]
    fn file_storage_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.set("currentIndex", "3").unwrap();
        assert_eq!(storage.get("currentIndex"), Some("3".to_string()));
        storage.remove("currentIndex").unwrap();
        assert_eq!(storage.get("currentIndex"), None);
        // Removing twice is fine.
        storage.remove("currentIndex").unwrap();
    }

    #[test]
    fn file_storage_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        FileStorage::new(dir.path()).set("currentTest", "[]").unwrap();
        let reopened = FileStorage::new(dir.path());
        assert_eq!(reopened.get("currentTest"), Some("[]".to_string()));
    }

    #[test]
    fn file_storage_overwrite_leaves_single_value() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.set("k", "first").unwrap();
        storage.set("k", "second").unwrap();
        assert_eq!(storage.get("k"), Some("second".to_string()));
        // No staging files left behind.
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
