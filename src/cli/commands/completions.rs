//! Completions command implementation.

use clap_complete::Shell;

use crate::error::PomodoroError;
use crate::features::shell::{completion_install_instructions, generate_completions};

/// Print a completion script, or instructions for installing one.
///
/// # Errors
///
/// Returns an error if the script cannot be generated.
pub fn completions(shell: Shell, install: bool) -> Result<String, PomodoroError> {
    if install {
        Ok(completion_install_instructions(shell))
    } else {
        generate_completions(shell)
    }
}
