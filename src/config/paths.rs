//! Path resolution for pomodoro configuration and data files.
//!
//! All pomodoro data is stored in `~/.pomodoro/`:
//! - `config.yaml` - Application preferences (sound, tick interval)
//! - `store/` - Key-value entries (timer settings, session counter)
//! - `cache/` - Generated files (synthesized fallback tone)
//! - `pomodoro.log` - Log output of the interactive timer

use std::path::PathBuf;

use crate::error::PomodoroError;

/// Paths to pomodoro configuration and data directories.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.pomodoro/`
    pub root: PathBuf,
    /// Config file: `~/.pomodoro/config.yaml`
    pub config_file: PathBuf,
    /// Key-value store directory: `~/.pomodoro/store/`
    pub store: PathBuf,
    /// Cache directory: `~/.pomodoro/cache/`
    pub cache: PathBuf,
    /// Log file: `~/.pomodoro/pomodoro.log`
    pub log_file: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, PomodoroError> {
        let home = std::env::var("HOME").map_err(|_| {
            PomodoroError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".pomodoro")))
    }

    /// Create paths with a custom root directory (`--data-dir`, tests).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            store: root.join("store"),
            cache: root.join("cache"),
            log_file: root.join("pomodoro.log"),
            root,
        }
    }

    /// Ensure all directories exist, creating them if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), PomodoroError> {
        for dir in [&self.root, &self.store, &self.cache] {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    PomodoroError::Config(format!(
                        "Failed to create directory {}: {e}",
                        dir.display()
                    ))
                })?;
            }
        }

        Ok(())
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self::with_root(PathBuf::from(".pomodoro")))
    }
}
