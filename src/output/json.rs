//! JSON output formatting for pomodoro.

use serde::Serialize;
use serde_json::json;

use crate::error::PomodoroError;
use crate::features::focus::{Configuration, StatusReport};

/// Format timer settings as JSON
///
/// Durations are reported in seconds under the same keys the settings are
/// stored with, plus whole minutes for convenience.
///
/// # Errors
///
/// Returns `PomodoroError::Json` if JSON serialization fails.
pub fn format_configuration_json(config: &Configuration) -> Result<String, PomodoroError> {
    let output = json!({
        "work": config.work_seconds,
        "short": config.short_break_seconds,
        "long": config.long_break_seconds,
        "sessionsBeforeLong": config.sessions_before_long,
        "minutes": {
            "work": config.work_seconds / 60,
            "short": config.short_break_seconds / 60,
            "long": config.long_break_seconds / 60,
        }
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a cycle status report as JSON
///
/// # Errors
///
/// Returns `PomodoroError::Json` if JSON serialization fails.
pub fn format_status_json(report: &StatusReport) -> Result<String, PomodoroError> {
    to_json(report)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `PomodoroError::Json` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, PomodoroError> {
    Ok(serde_json::to_string_pretty(value)?)
}
