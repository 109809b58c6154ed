use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pomodoro::cli::args::{Cli, Commands};
use pomodoro::cli::commands;
use pomodoro::config::{Config, Paths};

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let paths = match &cli.data_dir {
        Some(dir) => Paths::with_root(dir.clone()),
        None => Paths::new()?,
    };
    let command = cli.command_or_default();
    let format = cli.output;

    let interactive = matches!(command, Commands::Run(_));
    setup_logging(cli.verbose, interactive.then_some(&paths))?;
    debug!(root = %paths.root.display(), ?command, "Starting pomodoro");

    let output = match command {
        Commands::Run(args) => {
            let settings = Config::load_from_path(&paths.config_file)?;
            let store = commands::open_store(&paths)?;
            pomodoro::tui::run(store, &settings, &paths, args.phase)
                .context("interactive timer failed")?;
            String::new()
        }
        Commands::Status => commands::status(&commands::open_store(&paths)?, format)?,
        Commands::Config(args) => {
            commands::config(&commands::open_store(&paths)?, args.command, format)?
        }
        Commands::Completions { shell, install } => commands::completions(shell, install)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

/// Install the tracing subscriber.
///
/// Line commands log warnings to stderr. The interactive timer owns the
/// terminal, so it logs to a file under the data directory instead.
fn setup_logging(verbose: bool, log_to_file: Option<&Paths>) -> Result<()> {
    let default = match (verbose, log_to_file.is_some()) {
        (true, _) => "pomodoro=debug",
        (false, true) => "pomodoro=info",
        (false, false) => "pomodoro=warn",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    match log_to_file {
        Some(paths) => {
            paths.ensure_dirs()?;
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&paths.log_file)
                .with_context(|| format!("cannot open log file {}", paths.log_file.display()))?;
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
                .with(filter)
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(false)
                        .without_time(),
                )
                .with(filter)
                .init();
        }
    }

    Ok(())
}
