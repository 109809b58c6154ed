//! Key-value persistence.
//!
//! Each entry is a small text value stored under a stable key. The file
//! backend keeps one file per key inside `~/.pomodoro/store/`.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::Paths;
use crate::error::PomodoroError;

/// A minimal string key-value store.
///
/// Implementations take `&self` so one backend can be shared between the
/// configuration store and the session counter handle.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
    /// Read the value stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, PomodoroError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), PomodoroError>;
}

/// File-backed store: one file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open the store described by `paths`, creating directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the store directory cannot be created.
    pub fn open_in(paths: &Paths) -> Result<Self, PomodoroError> {
        paths.ensure_dirs()?;
        Ok(Self::at(&paths.store))
    }

    /// Use `dir` as the store directory without touching the filesystem.
    #[must_use]
    pub fn at(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    /// Directory holding the entries.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> Result<PathBuf, PomodoroError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(PomodoroError::Storage(format!("Invalid key: {key:?}")));
        }
        Ok(self.dir.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PomodoroError> {
        let path = self.entry_path(key)?;
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PomodoroError::Storage(format!(
                "Failed to read {}: {e}",
                path.display()
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PomodoroError> {
        let path = self.entry_path(key)?;
        let tmp = path.with_extension("tmp");

        std::fs::write(&tmp, value).map_err(|e| {
            PomodoroError::Storage(format!("Failed to write {}: {e}", tmp.display()))
        })?;
        std::fs::rename(&tmp, &path).map_err(|e| {
            PomodoroError::Storage(format!("Failed to replace {}: {e}", path.display()))
        })
    }
}

/// In-memory store (useful for testing and ephemeral sessions).
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PomodoroError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PomodoroError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_missing_key() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::at(temp_dir.path());

        assert_eq!(store.get("pomodoro-config").unwrap(), None);
    }

    #[test]
    fn test_file_store_set_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::at(temp_dir.path());

        store.set("pomodoro-work-sessions", "3").unwrap();
        assert_eq!(
            store.get("pomodoro-work-sessions").unwrap().as_deref(),
            Some("3")
        );

        store.set("pomodoro-work-sessions", "4").unwrap();
        assert_eq!(
            store.get("pomodoro-work-sessions").unwrap().as_deref(),
            Some("4")
        );
        assert!(!temp_dir.path().join("pomodoro-work-sessions.tmp").exists());
    }

    #[test]
    fn test_file_store_rejects_path_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::at(temp_dir.path());

        assert!(matches!(
            store.set("../escape", "x"),
            Err(PomodoroError::Storage(_))
        ));
        assert!(store.get("").is_err());
    }

    #[test]
    fn test_file_store_open_in_creates_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("data"));

        let store = FileStore::open_in(&paths).unwrap();

        assert_eq!(store.dir(), paths.store.as_path());
        assert!(paths.store.exists());
    }

    #[test]
    fn test_file_store_unwritable_dir() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::at(&temp_dir.path().join("does-not-exist"));

        assert!(store.set("key", "value").is_err());
        // A missing directory reads as an absent key
        assert_eq!(store.get("key").unwrap(), None);
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        assert_eq!(store.get("a").unwrap(), None);

        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
    }
}
