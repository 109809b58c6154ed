use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::features::focus::Phase;

#[derive(Parser, Debug)]
#[command(name = "pomodoro")]
#[command(about = "A pomodoro focus timer for the terminal")]
#[command(long_about = "pomodoro - work/break focus timer

Alternates work sessions with short breaks and, every few sessions, a long
break. Settings and the completed session count survive restarts.

QUICK START:
  pomodoro                       Open the interactive timer
  pomodoro status                Show durations and cycle position
  pomodoro config set --work 50  Use 50 minute work sessions

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  pomodoro <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output (default),
    /// or 'json' for machine-readable output suitable for scripting.
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub output: OutputFormat,

    /// Directory holding settings, session count and logs
    ///
    /// Defaults to ~/.pomodoro
    #[arg(long, global = true, env = "POMODORO_DATA_DIR", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// The subcommand to execute, `run` when none was given.
    #[must_use]
    pub fn command_or_default(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Run(RunArgs::default()))
    }
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Open the interactive timer (default)
    ///
    /// Keys:
    ///   space / s    Start or pause
    ///   r            Reset the current phase
    ///   1 / 2 / 3    Switch to work, short break, long break
    ///   e            Edit settings
    ///   q / Esc      Quit
    ///
    /// # Examples
    ///
    ///   pomodoro run
    ///   pomodoro run --phase short
    #[command(alias = "tui")]
    Run(RunArgs),

    /// Show phase durations, cycle position and completed sessions
    ///
    /// # Examples
    ///
    ///   pomodoro status
    ///   pomodoro status -o json
    #[command(alias = "st")]
    Status,

    /// Show or change timer settings
    Config(ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// # Examples
    ///
    ///   pomodoro completions bash > ~/.local/share/bash-completion/completions/pomodoro
    ///   pomodoro completions zsh --install
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,

        /// Print installation instructions instead of the script
        #[arg(long)]
        install: bool,
    },
}

#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct RunArgs {
    /// Phase to open in: work, short or long
    #[arg(long, value_parser = parse_phase)]
    pub phase: Option<Phase>,
}

/// Parse a phase name or alias (`work`, `short`, `long`, `sb`, ...).
fn parse_phase(s: &str) -> Result<Phase, String> {
    Phase::parse(s).ok_or_else(|| format!("unknown phase '{s}', expected work, short or long"))
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Show the current timer settings
    Show,

    /// Change timer settings
    ///
    /// Durations are minutes. Values that are not positive numbers become 1.
    /// Omitted options keep their current value.
    ///
    /// # Examples
    ///
    ///   pomodoro config set --work 50 --short 10
    ///   pomodoro config set --sessions 3
    Set {
        /// Work session length in minutes
        #[arg(long, value_name = "MINUTES", allow_hyphen_values = true)]
        work: Option<String>,

        /// Short break length in minutes
        #[arg(long, value_name = "MINUTES", allow_hyphen_values = true)]
        short: Option<String>,

        /// Long break length in minutes
        #[arg(long, value_name = "MINUTES", allow_hyphen_values = true)]
        long: Option<String>,

        /// Work sessions before a long break
        #[arg(long, value_name = "COUNT", allow_hyphen_values = true)]
        sessions: Option<String>,
    },
}
