//! Command implementations for pomodoro.
//!
//! Line commands open the on-disk store, do one thing and return the text to
//! print. The interactive timer lives in [`crate::tui`].

mod completions;
mod config;
mod status;

pub use completions::completions;
pub use config::config;
pub use status::status;

use std::rc::Rc;

use tracing::debug;

use crate::config::Paths;
use crate::error::PomodoroError;
use crate::features::focus::ConfigStore;
use crate::storage::FileStore;

/// Open the configuration store kept under `paths`.
///
/// # Errors
///
/// Returns an error if the data directories cannot be created.
pub fn open_store(paths: &Paths) -> Result<ConfigStore, PomodoroError> {
    let backend = FileStore::open_in(paths)?;
    debug!(dir = %backend.dir().display(), "Opened store");
    Ok(ConfigStore::new(Rc::new(backend)))
}
