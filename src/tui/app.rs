//! Application state for the TUI.

use std::time::{Duration, Instant};

use tracing::info;

use crate::features::focus::{
    Configuration, PhaseCompletion, Phase, Pomodoro, RawSettingsInput, TimerSnapshot,
};

/// How long to wait for input when no tick is scheduled.
const IDLE_POLL: Duration = Duration::from_secs(60);

/// Something the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Start when paused, pause when running.
    Toggle,
    /// Reset the current phase.
    Reset,
    /// Jump to a phase.
    Switch(Phase),
    /// Open the settings form.
    EditSettings,
    /// Save the settings form.
    SaveSettings,
    /// Close the settings form without saving.
    CancelSettings,
}

/// Labels of the settings form fields, in tab order.
pub const FORM_LABELS: [&str; 4] = [
    "Work (minutes)",
    "Short break (minutes)",
    "Long break (minutes)",
    "Sessions before long break",
];

/// The four-field settings form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsForm {
    /// Field contents, in [`FORM_LABELS`] order.
    pub fields: [String; 4],
    /// Index of the focused field.
    pub focused: usize,
}

impl SettingsForm {
    /// Pre-fill the form from saved settings.
    #[must_use]
    pub fn from_configuration(config: &Configuration) -> Self {
        let raw = RawSettingsInput::from(config);
        Self {
            fields: [
                raw.work,
                raw.short_break,
                raw.long_break,
                raw.sessions_before_long,
            ],
            focused: 0,
        }
    }

    /// Move focus to the next field, wrapping around.
    pub fn next_field(&mut self) {
        self.focused = (self.focused + 1) % self.fields.len();
    }

    /// Move focus to the previous field, wrapping around.
    pub fn previous_field(&mut self) {
        self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
    }

    /// Type a character into the focused field.
    pub fn push(&mut self, c: char) {
        self.fields[self.focused].push(c);
    }

    /// Delete the last character of the focused field.
    pub fn backspace(&mut self) {
        self.fields[self.focused].pop();
    }

    /// Current contents as unvalidated settings.
    #[must_use]
    pub fn to_raw(&self) -> RawSettingsInput {
        let [work, short_break, long_break, sessions] = self.fields.clone();
        RawSettingsInput::new(work, short_break, long_break, sessions)
    }
}

/// Application state.
pub struct App {
    /// The timer being shown.
    pomodoro: Pomodoro,
    /// Status message to display.
    pub status: Option<String>,
    /// Open settings form, if any.
    pub form: Option<SettingsForm>,
}

impl App {
    /// Create a new app instance.
    #[must_use]
    pub const fn new(pomodoro: Pomodoro) -> Self {
        Self {
            pomodoro,
            status: None,
            form: None,
        }
    }

    /// Presentation view of the timer.
    #[must_use]
    pub fn snapshot(&self) -> TimerSnapshot {
        self.pomodoro.snapshot()
    }

    /// How long the event loop may block waiting for input.
    #[must_use]
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.pomodoro.time_until_tick(now).unwrap_or(IDLE_POLL)
    }

    /// Apply a user action. Returns `false` when the app should quit.
    pub fn apply(&mut self, action: Action, now: Instant) -> bool {
        match action {
            Action::Quit => return false,
            Action::Toggle => {
                self.pomodoro.toggle(now);
                self.status = None;
            }
            Action::Reset => {
                self.pomodoro.reset();
                self.status = Some("Timer reset".to_string());
            }
            Action::Switch(phase) => {
                self.pomodoro.switch_phase(phase);
                self.status = Some(format!("Switched to {phase}"));
            }
            Action::EditSettings => {
                self.form = Some(SettingsForm::from_configuration(
                    &self.pomodoro.configuration(),
                ));
            }
            Action::SaveSettings => {
                if let Some(form) = self.form.take() {
                    let saved = self.pomodoro.save_settings(&form.to_raw());
                    info!(?saved, "Settings saved from form");
                    self.status = Some("Settings saved".to_string());
                }
            }
            Action::CancelSettings => {
                self.form = None;
            }
        }
        true
    }

    /// Deliver due ticks and report any phase change.
    pub fn pump(&mut self, now: Instant) {
        for completion in self.pomodoro.pump(now) {
            self.status = Some(completion_message(&completion));
        }
    }

    /// Stop the timer and release its resources.
    pub fn finish(self) -> TimerSnapshot {
        let snapshot = self.pomodoro.dispose();
        info!(
            completed_work_sessions = snapshot.completed_work_sessions,
            "Timer closed"
        );
        snapshot
    }
}

fn completion_message(completion: &PhaseCompletion) -> String {
    if completion.completed.is_break() {
        "Break over. Back to work".to_string()
    } else {
        format!(
            "Work session {} done. Time for a {}",
            completion.completed_work_sessions,
            completion.next.display_name().to_lowercase()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::chime::SilentChime;
    use crate::features::focus::ConfigStore;
    use crate::storage::MemoryStore;
    use std::rc::Rc;

    const SECOND: Duration = Duration::from_secs(1);

    fn app() -> App {
        let store = ConfigStore::new(Rc::new(MemoryStore::new()));
        App::new(Pomodoro::new(store, Box::new(SilentChime), SECOND))
    }

    #[test]
    fn test_form_prefill_and_navigation() {
        let mut form = SettingsForm::from_configuration(&Configuration::default());
        assert_eq!(form.fields, ["25", "5", "15", "4"].map(String::from));

        form.previous_field();
        assert_eq!(form.focused, 3);
        form.next_field();
        form.next_field();
        assert_eq!(form.focused, 1);

        form.backspace();
        form.push('9');
        assert_eq!(form.to_raw().short_break, "9");
    }

    #[test]
    fn test_toggle_and_poll_timeout() {
        let mut app = app();
        let t0 = Instant::now();

        assert_eq!(app.poll_timeout(t0), IDLE_POLL);
        assert!(app.apply(Action::Toggle, t0));
        assert!(app.snapshot().is_running);
        assert_eq!(app.poll_timeout(t0), SECOND);

        app.pump(t0 + SECOND * 2);
        assert_eq!(app.snapshot().clock, "24:58");
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        assert!(!app.apply(Action::Quit, Instant::now()));
    }

    #[test]
    fn test_save_settings_from_form() {
        let mut app = app();
        let now = Instant::now();

        app.apply(Action::EditSettings, now);
        let form = app.form.as_mut().unwrap();
        form.fields[0] = "50".to_string();
        app.apply(Action::SaveSettings, now);

        assert!(app.form.is_none());
        assert_eq!(app.status.as_deref(), Some("Settings saved"));
        assert_eq!(app.snapshot().clock, "50:00");
    }

    #[test]
    fn test_cancel_settings_discards_changes() {
        let mut app = app();
        let now = Instant::now();

        app.apply(Action::EditSettings, now);
        app.form.as_mut().unwrap().fields[0] = "50".to_string();
        app.apply(Action::CancelSettings, now);

        assert!(app.form.is_none());
        assert_eq!(app.snapshot().clock, "25:00");
    }

    #[test]
    fn test_switch_and_reset() {
        let mut app = app();
        let now = Instant::now();

        app.apply(Action::Switch(Phase::ShortBreak), now);
        assert_eq!(app.snapshot().phase, Phase::ShortBreak);
        assert_eq!(app.status.as_deref(), Some("Switched to Short Break"));

        app.apply(Action::Toggle, now);
        app.pump(now + SECOND * 30);
        app.apply(Action::Reset, now + SECOND * 30);
        assert_eq!(app.snapshot().clock, "05:00");
        assert!(!app.snapshot().is_running);
    }

    #[test]
    fn test_completion_sets_status() {
        let mut app = app();
        let now = Instant::now();

        app.apply(Action::EditSettings, now);
        app.form.as_mut().unwrap().fields[0] = "1".to_string();
        app.apply(Action::SaveSettings, now);
        app.apply(Action::Toggle, now);
        app.pump(now + SECOND * 60);

        assert_eq!(
            app.status.as_deref(),
            Some("Work session 1 done. Time for a short break")
        );
        assert_eq!(app.snapshot().phase, Phase::ShortBreak);
    }

    #[test]
    fn test_break_completion_sets_status() {
        let mut app = app();
        let now = Instant::now();

        app.apply(Action::EditSettings, now);
        app.form.as_mut().unwrap().fields[1] = "1".to_string();
        app.apply(Action::SaveSettings, now);
        app.apply(Action::Switch(Phase::ShortBreak), now);
        app.apply(Action::Toggle, now);
        app.pump(now + SECOND * 60);

        assert_eq!(app.status.as_deref(), Some("Break over. Back to work"));
        assert_eq!(app.snapshot().phase, Phase::Work);
    }

    #[test]
    fn test_finish_returns_final_snapshot() {
        let mut app = app();
        let now = Instant::now();
        app.apply(Action::Toggle, now);
        app.pump(now + SECOND * 3);

        let snapshot = app.finish();

        assert!(!snapshot.is_running);
        assert_eq!(snapshot.seconds_remaining, 1497);
    }
}
