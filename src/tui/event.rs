//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::PomodoroError;
use crate::features::focus::Phase;
use crate::tui::app::{Action, App};

/// Wait up to `timeout` for a key press and translate it.
///
/// Returns an action to take, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events(app: &mut App, timeout: Duration) -> Result<Option<Action>, PomodoroError> {
    if event::poll(timeout)
        .map_err(|e| PomodoroError::Terminal(format!("Event poll failed: {e}")))?
    {
        if let Event::Key(key) = event::read()
            .map_err(|e| PomodoroError::Terminal(format!("Event read failed: {e}")))?
        {
            if key.kind == KeyEventKind::Press {
                return Ok(handle_key(app, key));
            }
        }
    }

    Ok(None)
}

/// Translate one key press.
///
/// While the settings form is open, typing edits it directly and only
/// Enter/Esc produce actions.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    // Handle Ctrl+C
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    if let Some(form) = app.form.as_mut() {
        match key.code {
            KeyCode::Enter => return Some(Action::SaveSettings),
            KeyCode::Esc => return Some(Action::CancelSettings),
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.previous_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' || c == '-' => form.push(c),
            _ => {}
        }
        return None;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char(' ' | 's') => Some(Action::Toggle),
        KeyCode::Char('r') => Some(Action::Reset),
        KeyCode::Char('1' | 'w') => Some(Action::Switch(Phase::Work)),
        KeyCode::Char('2' | 'b') => Some(Action::Switch(Phase::ShortBreak)),
        KeyCode::Char('3' | 'l') => Some(Action::Switch(Phase::LongBreak)),
        KeyCode::Char('e') => Some(Action::EditSettings),
        KeyCode::Char('?') => {
            app.status = Some(HELP.to_string());
            None
        }
        _ => None,
    }
}

/// Key summary shown in the status bar.
pub const HELP: &str = "space:start/pause | r:reset | 1/2/3:mode | e:settings | q:quit";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::chime::SilentChime;
    use crate::features::focus::{ConfigStore, Pomodoro};
    use crate::storage::MemoryStore;
    use std::rc::Rc;
    use std::time::Instant;

    fn app() -> App {
        let store = ConfigStore::new(Rc::new(MemoryStore::new()));
        App::new(Pomodoro::new(store, Box::new(SilentChime), Duration::from_secs(1)))
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_timer_keys() {
        let mut app = app();

        assert_eq!(handle_key(&mut app, press(KeyCode::Char(' '))), Some(Action::Toggle));
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('s'))), Some(Action::Toggle));
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('r'))), Some(Action::Reset));
        assert_eq!(
            handle_key(&mut app, press(KeyCode::Char('2'))),
            Some(Action::Switch(Phase::ShortBreak))
        );
        assert_eq!(
            handle_key(&mut app, press(KeyCode::Char('l'))),
            Some(Action::Switch(Phase::LongBreak))
        );
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();

        assert_eq!(handle_key(&mut app, press(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(handle_key(&mut app, press(KeyCode::Esc)), Some(Action::Quit));
        assert_eq!(
            handle_key(
                &mut app,
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
            ),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_help_sets_status() {
        let mut app = app();
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('?'))), None);
        assert_eq!(app.status.as_deref(), Some(HELP));
    }

    #[test]
    fn test_form_captures_typing() {
        let mut app = app();
        app.apply(Action::EditSettings, Instant::now());

        assert_eq!(handle_key(&mut app, press(KeyCode::Backspace)), None);
        assert_eq!(handle_key(&mut app, press(KeyCode::Backspace)), None);
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('4'))), None);
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('q'))), None);
        assert_eq!(handle_key(&mut app, press(KeyCode::Tab)), None);

        let form = app.form.as_ref().unwrap();
        assert_eq!(form.fields[0], "4");
        assert_eq!(form.focused, 1);

        assert_eq!(handle_key(&mut app, press(KeyCode::Enter)), Some(Action::SaveSettings));
        assert_eq!(handle_key(&mut app, press(KeyCode::Esc)), Some(Action::CancelSettings));
    }
}
