//! Timer engine.
//!
//! Owns the phase state machine: countdown progression, phase transitions,
//! session accounting and reconciliation of configuration changes. The
//! engine performs no scheduling and no I/O of its own beyond the session
//! counter handle and the chime collaborator.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::phase::Phase;
use super::settings::Configuration;
use super::store::{ConfigStore, SessionCounter, Subscription};
use super::timer::format_clock;
use crate::features::chime::Chime;

/// Emitted when a phase counts down to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseCompletion {
    /// Phase that just finished
    pub completed: Phase,
    /// Phase the engine moved to
    pub next: Phase,
    /// Completed work sessions after this transition
    pub completed_work_sessions: u64,
}

/// Read-only view of the timer for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    /// Current phase
    pub phase: Phase,
    /// Remaining seconds (may be zero or below for a moment)
    pub seconds_remaining: i64,
    /// Remaining time as `MM:SS`, floored at zero
    pub clock: String,
    /// Whether the countdown is running
    pub is_running: bool,
    /// Completed work sessions
    pub completed_work_sessions: u64,
    /// Configured duration of the current phase in seconds
    pub phase_seconds: u32,
    /// Work sessions left until the next long break
    pub sessions_until_long_break: u32,
}

impl TimerSnapshot {
    /// Fraction of the current phase already elapsed (0.0 - 1.0).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f64 {
        if self.phase_seconds == 0 {
            return 1.0;
        }
        let remaining = self.seconds_remaining.max(0) as f64;
        (1.0 - remaining / f64::from(self.phase_seconds)).clamp(0.0, 1.0)
    }
}

/// The phase state machine.
pub struct TimerEngine {
    config: Configuration,
    phase: Phase,
    seconds_remaining: i64,
    is_running: bool,
    /// The user started the countdown since the phase was last entered.
    started: bool,
    completed_work_sessions: u64,
    counter: SessionCounter,
    chime: Box<dyn Chime>,
}

impl TimerEngine {
    /// Create an engine in the Work phase, not running.
    ///
    /// # Panics
    ///
    /// Panics if `config` has a field below 1.
    #[must_use]
    pub fn new(config: Configuration, counter: SessionCounter, chime: Box<dyn Chime>) -> Self {
        assert_valid(&config);
        let completed_work_sessions = counter.load();

        debug!(completed_work_sessions, "Timer engine created");
        Self {
            config,
            phase: Phase::Work,
            seconds_remaining: i64::from(config.work_seconds),
            is_running: false,
            started: false,
            completed_work_sessions,
            counter,
            chime,
        }
    }

    /// Create an engine from the store's current configuration and counter.
    #[must_use]
    pub fn from_store(store: &ConfigStore, chime: Box<dyn Chime>) -> Self {
        Self::new(store.load(), store.session_counter(), chime)
    }

    /// Subscribe a shared engine to configuration changes.
    ///
    /// The engine re-loads the configuration on every notification. The
    /// subscription holds only a weak reference to the engine.
    pub fn attach(engine: &Rc<RefCell<Self>>, store: &ConfigStore) -> Subscription {
        let weak = Rc::downgrade(engine);
        store.subscribe(move |store| {
            let Some(engine) = weak.upgrade() else {
                return;
            };
            match engine.try_borrow_mut() {
                Ok(mut engine) => engine.on_configuration_changed(store.load()),
                Err(_) => warn!("Timer engine busy, configuration change not applied"),
            };
        })
    }

    /// Start counting down. No-op if already running.
    pub fn start(&mut self) {
        if self.is_running {
            return;
        }
        self.is_running = true;
        self.started = true;
        debug!(phase = %self.phase, remaining = self.seconds_remaining, "Timer started");
    }

    /// Stop counting down, keeping the remaining time.
    pub fn pause(&mut self) {
        if self.is_running {
            debug!(phase = %self.phase, remaining = self.seconds_remaining, "Timer paused");
        }
        self.is_running = false;
    }

    /// Start when paused, pause when running.
    pub fn toggle(&mut self) {
        if self.is_running {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Stop and restore the current phase's configured duration.
    pub fn reset(&mut self) {
        self.enter(self.phase);
        debug!(phase = %self.phase, remaining = self.seconds_remaining, "Timer reset");
    }

    /// Jump to `target` without touching the session counter.
    pub fn switch_phase(&mut self, target: Phase) {
        self.enter(target);
        debug!(phase = %target, "Phase switched");
    }

    /// Advance the countdown by one second.
    ///
    /// Ignored while paused. When the countdown reaches zero or below the
    /// phase transition runs as part of the same tick.
    pub fn tick(&mut self) -> Option<PhaseCompletion> {
        if !self.is_running {
            return None;
        }
        self.seconds_remaining -= 1;
        if self.seconds_remaining <= 0 {
            Some(self.complete_phase())
        } else {
            None
        }
    }

    /// Adopt a new configuration.
    ///
    /// A phase the user has started keeps its remaining time and picks up
    /// the new duration on its next entry. A phase not yet started takes
    /// the new duration at once.
    ///
    /// # Panics
    ///
    /// Panics if `config` has a field below 1.
    pub fn on_configuration_changed(&mut self, config: Configuration) {
        assert_valid(&config);
        self.config = config;

        if self.started {
            debug!(
                phase = %self.phase,
                remaining = self.seconds_remaining,
                "Configuration changed mid-countdown, applying on next phase entry"
            );
        } else {
            self.seconds_remaining = i64::from(self.phase.duration(&self.config));
            debug!(
                phase = %self.phase,
                remaining = self.seconds_remaining,
                "Configuration changed, remaining time re-derived"
            );
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Remaining seconds in the current phase.
    #[must_use]
    pub const fn seconds_remaining(&self) -> i64 {
        self.seconds_remaining
    }

    /// Whether the countdown is running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.is_running
    }

    /// Completed work sessions.
    #[must_use]
    pub const fn completed_work_sessions(&self) -> u64 {
        self.completed_work_sessions
    }

    /// Configuration currently in effect.
    #[must_use]
    pub const fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// Presentation view of the current state.
    #[must_use]
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            seconds_remaining: self.seconds_remaining,
            clock: format_clock(self.seconds_remaining),
            is_running: self.is_running,
            completed_work_sessions: self.completed_work_sessions,
            phase_seconds: self.phase.duration(&self.config),
            sessions_until_long_break: sessions_until_long_break(
                self.completed_work_sessions,
                self.config.sessions_before_long,
            ),
        }
    }

    fn enter(&mut self, phase: Phase) {
        self.phase = phase;
        self.is_running = false;
        self.started = false;
        self.seconds_remaining = i64::from(phase.duration(&self.config));
    }

    fn complete_phase(&mut self) -> PhaseCompletion {
        let completed = self.phase;
        let next = match completed {
            Phase::Work => {
                self.completed_work_sessions += 1;
                self.counter.save(self.completed_work_sessions);
                if self.completed_work_sessions % u64::from(self.config.sessions_before_long) == 0 {
                    Phase::LongBreak
                } else {
                    Phase::ShortBreak
                }
            }
            Phase::ShortBreak | Phase::LongBreak => Phase::Work,
        };

        self.enter(next);
        self.chime.ring();

        info!(
            completed = %completed,
            next = %next,
            completed_work_sessions = self.completed_work_sessions,
            "Phase completed"
        );

        PhaseCompletion {
            completed,
            next,
            completed_work_sessions: self.completed_work_sessions,
        }
    }
}

impl std::fmt::Debug for TimerEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerEngine")
            .field("config", &self.config)
            .field("phase", &self.phase)
            .field("seconds_remaining", &self.seconds_remaining)
            .field("is_running", &self.is_running)
            .field("completed_work_sessions", &self.completed_work_sessions)
            .finish_non_exhaustive()
    }
}

/// Work sessions left until the next long break (1..=`sessions_before_long`).
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn sessions_until_long_break(completed: u64, sessions_before_long: u32) -> u32 {
    let cycle = u64::from(sessions_before_long.max(1));
    (cycle - completed % cycle) as u32
}

fn assert_valid(config: &Configuration) {
    assert!(
        config.is_valid(),
        "timer configuration must have every field >= 1, got {config:?}"
    );
}
