//! Error types for pomodoro.
//!
//! Most timer failures are recovered locally (storage falls back to defaults,
//! audio falls back to silence). The variants here cover what the command
//! line and terminal front ends can still surface to the user.

use thiserror::Error;

/// Errors that can occur in pomodoro.
#[derive(Debug, Error)]
pub enum PomodoroError {
    /// Application configuration could not be read, parsed or written.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The key-value store could not be read or written.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A value could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Sound playback failed.
    #[error("Audio error: {0}")]
    Audio(String),

    /// Terminal setup, drawing or event handling failed.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML (de)serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PomodoroError::Config("bad value".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad value");

        let err = PomodoroError::Audio("no player".to_string());
        assert_eq!(err.to_string(), "Audio error: no player");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: PomodoroError = io.into();
        assert!(matches!(err, PomodoroError::Io(_)));
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn test_json_conversion() {
        let parse = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: PomodoroError = parse.into();
        assert!(matches!(err, PomodoroError::Json(_)));
    }
}
