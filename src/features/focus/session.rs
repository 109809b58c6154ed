//! A running pomodoro: store, engine and ticker wired together.
//!
//! This is what a front end embeds. User actions go through here so the
//! ticker is armed exactly while the engine runs.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::debug;

use super::engine::{PhaseCompletion, TimerEngine, TimerSnapshot};
use super::phase::Phase;
use super::settings::{Configuration, RawSettingsInput};
use super::store::{ConfigStore, Subscription};
use super::ticker::Ticker;
use crate::features::chime::Chime;

/// Store, engine and tick scheduling for one timer.
pub struct Pomodoro {
    store: ConfigStore,
    engine: Rc<RefCell<TimerEngine>>,
    subscription: Subscription,
    ticker: Ticker,
}

impl Pomodoro {
    /// Create the engine from the store and subscribe it to changes.
    #[must_use]
    pub fn new(store: ConfigStore, chime: Box<dyn Chime>, tick_interval: Duration) -> Self {
        let engine = Rc::new(RefCell::new(TimerEngine::from_store(&store, chime)));
        let subscription = TimerEngine::attach(&engine, &store);

        Self {
            store,
            engine,
            subscription,
            ticker: Ticker::new(tick_interval),
        }
    }

    /// Start the countdown.
    pub fn start(&mut self, now: Instant) {
        self.engine.borrow_mut().start();
        self.sync_ticker(now);
    }

    /// Pause the countdown. No tick fires until the next start.
    pub fn pause(&mut self) {
        self.engine.borrow_mut().pause();
        self.ticker.disarm();
    }

    /// Start when paused, pause when running.
    pub fn toggle(&mut self, now: Instant) {
        self.engine.borrow_mut().toggle();
        self.sync_ticker(now);
    }

    /// Reset the current phase.
    pub fn reset(&mut self) {
        self.engine.borrow_mut().reset();
        self.ticker.disarm();
    }

    /// Jump to another phase.
    pub fn switch_phase(&mut self, target: Phase) {
        self.engine.borrow_mut().switch_phase(target);
        self.ticker.disarm();
    }

    /// Deliver every tick due at `now`.
    ///
    /// Stops early when a tick completes the phase, since the engine never
    /// runs into the next phase on its own.
    pub fn pump(&mut self, now: Instant) -> Vec<PhaseCompletion> {
        let mut completions = Vec::new();

        while self.engine.borrow().is_running() && self.ticker.poll(now) {
            let completion = self.engine.borrow_mut().tick();
            if let Some(completion) = completion {
                completions.push(completion);
            }
        }

        self.sync_ticker(now);
        completions
    }

    /// Save raw settings; the engine reconciles through its subscription.
    pub fn save_settings(&mut self, candidate: &RawSettingsInput) -> Configuration {
        self.store.save(candidate)
    }

    /// Presentation view of the timer.
    #[must_use]
    pub fn snapshot(&self) -> TimerSnapshot {
        self.engine.borrow().snapshot()
    }

    /// Configuration the engine is using.
    #[must_use]
    pub fn configuration(&self) -> Configuration {
        *self.engine.borrow().configuration()
    }

    /// The underlying configuration store.
    #[must_use]
    pub const fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Time until the next tick, `None` while paused.
    #[must_use]
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        self.ticker.time_until_due(now)
    }

    /// Stop the timer and release the configuration subscription.
    #[must_use]
    pub fn dispose(mut self) -> TimerSnapshot {
        self.pause();
        let snapshot = self.snapshot();
        self.subscription.unsubscribe();
        debug!(
            completed_work_sessions = snapshot.completed_work_sessions,
            "Pomodoro disposed"
        );
        snapshot
    }

    fn sync_ticker(&mut self, now: Instant) {
        let running = self.engine.borrow().is_running();
        self.ticker.sync(running, now);
    }
}

impl std::fmt::Debug for Pomodoro {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pomodoro")
            .field("engine", &self.engine)
            .field("ticker", &self.ticker)
            .finish_non_exhaustive()
    }
}
