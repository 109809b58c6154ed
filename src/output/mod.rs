//! Output formatting for pomodoro.
//!
//! This module provides formatters for displaying timer settings and cycle
//! status in various formats.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::PomodoroError;
use crate::features::focus::{Configuration, StatusReport};

pub use json::*;
pub use pretty::*;

/// Format timer settings based on output format
///
/// # Errors
///
/// Returns `PomodoroError::Json` if JSON serialization fails.
pub fn format_configuration(
    config: &Configuration,
    title: &str,
    format: OutputFormat,
) -> Result<String, PomodoroError> {
    match format {
        OutputFormat::Pretty => Ok(format_configuration_pretty(config, title)),
        OutputFormat::Json => format_configuration_json(config),
    }
}

/// Format a cycle status report based on output format
///
/// # Errors
///
/// Returns `PomodoroError::Json` if JSON serialization fails.
pub fn format_status(report: &StatusReport, format: OutputFormat) -> Result<String, PomodoroError> {
    match format {
        OutputFormat::Pretty => Ok(format_status_pretty(report)),
        OutputFormat::Json => format_status_json(report),
    }
}
