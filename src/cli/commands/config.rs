//! Settings command implementation.

use colored::Colorize;
use tracing::info;

use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::error::PomodoroError;
use crate::features::focus::{ConfigStore, RawSettingsInput};
use crate::output::format_configuration;

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn config(
    store: &ConfigStore,
    cmd: ConfigCommands,
    format: OutputFormat,
) -> Result<String, PomodoroError> {
    match cmd {
        ConfigCommands::Show => format_configuration(&store.load(), "Settings", format),

        ConfigCommands::Set {
            work,
            short,
            long,
            sessions,
        } => {
            let candidate = merge(&RawSettingsInput::from(&store.load()), work, short, long, sessions);
            let saved = store.save(&candidate);
            info!(?saved, "Settings updated from command line");

            match format {
                OutputFormat::Json => format_configuration(&saved, "Settings saved", format),
                OutputFormat::Pretty => Ok(format!(
                    "{}\n{}",
                    "✓ Settings saved".green(),
                    format_configuration(&saved, "Settings", format)?
                )),
            }
        }
    }
}

/// Overlay the provided fields on the current form values.
fn merge(
    current: &RawSettingsInput,
    work: Option<String>,
    short: Option<String>,
    long: Option<String>,
    sessions: Option<String>,
) -> RawSettingsInput {
    RawSettingsInput {
        work: work.unwrap_or_else(|| current.work.clone()),
        short_break: short.unwrap_or_else(|| current.short_break.clone()),
        long_break: long.unwrap_or_else(|| current.long_break.clone()),
        sessions_before_long: sessions.unwrap_or_else(|| current.sessions_before_long.clone()),
    }
}
