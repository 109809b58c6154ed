//! Terminal User Interface (TUI) for pomodoro.
//!
//! Provides the interactive countdown: big clock, session count, progress,
//! quick-mode switching and a settings form. Built with ratatui and
//! crossterm.

mod app;
mod event;
mod ui;

pub use app::{Action, App, SettingsForm};

use std::io;
use std::time::Instant;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::info;

use crate::config::{Config, Paths};
use crate::error::PomodoroError;
use crate::features::chime::ChimePlayer;
use crate::features::focus::{ConfigStore, Phase, Pomodoro};

/// Run the TUI application, opening in `phase` when one is given.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run.
pub fn run(
    store: ConfigStore,
    settings: &Config,
    paths: &Paths,
    phase: Option<Phase>,
) -> Result<(), PomodoroError> {
    let chime = ChimePlayer::from_config(&settings.sound, paths);
    let mut pomodoro = Pomodoro::new(store, chime, settings.tick_interval());
    if let Some(phase) = phase {
        pomodoro.switch_phase(phase);
    }
    let mut app = App::new(pomodoro);
    info!(snapshot = ?app.snapshot(), "Timer opened");

    // Setup terminal
    enable_raw_mode()
        .map_err(|e| PomodoroError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| PomodoroError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| PomodoroError::Terminal(format!("Failed to create terminal: {e}")))?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    app.finish();
    result
}

/// Run the main application loop.
///
/// Blocks on input until the next tick is due, then delivers whatever ticks
/// have come due before redrawing.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), PomodoroError> {
    loop {
        // Draw UI
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| PomodoroError::Terminal(format!("Failed to draw: {e}")))?;

        // Handle events
        let timeout = app.poll_timeout(Instant::now());
        if let Some(action) = event::handle_events(app, timeout)? {
            if !app.apply(action, Instant::now()) {
                break;
            }
        }

        app.pump(Instant::now());
    }

    Ok(())
}
