//! Status command implementation.

use crate::cli::args::OutputFormat;
use crate::error::PomodoroError;
use crate::features::focus::{ConfigStore, StatusReport};
use crate::output::format_status;

/// Show the stored settings and where the cycle stands.
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn status(store: &ConfigStore, format: OutputFormat) -> Result<String, PomodoroError> {
    let report = StatusReport::from_store(store);
    format_status(&report, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::focus::RawSettingsInput;
    use crate::storage::MemoryStore;
    use std::rc::Rc;

    #[test]
    fn test_status_json() {
        let store = ConfigStore::new(Rc::new(MemoryStore::new()));
        store.save(&RawSettingsInput::new("30", "5", "20", "2"));
        store.save_session_count(1);

        let output = status(&store, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["configuration"]["work"], 1800);
        assert_eq!(value["completedWorkSessions"], 1);
        assert_eq!(value["nextBreak"], "longBreak");
    }

    #[test]
    fn test_status_pretty_fresh_store() {
        let store = ConfigStore::new(Rc::new(MemoryStore::new()));

        let output = status(&store, OutputFormat::Pretty).unwrap();

        assert!(output.contains("25 minutes"));
        assert!(output.contains("session 1 of 4"));
    }
}
