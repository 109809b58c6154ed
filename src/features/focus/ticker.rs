//! Cooperative tick scheduling.
//!
//! The engine owns no timer. Whatever loop embeds it keeps a [`Ticker`],
//! arms it while the engine runs, disarms it the moment the engine stops,
//! and asks it whether a tick is due.

use std::time::{Duration, Instant};

/// Periodic tick trigger driven by the caller's clock.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    /// Create a disarmed ticker.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    /// Schedule the first tick one interval after `now`. No-op if armed.
    pub fn arm(&mut self, now: Instant) {
        if self.next_due.is_none() {
            self.next_due = Some(now + self.interval);
        }
    }

    /// Cancel all scheduled ticks.
    pub fn disarm(&mut self) {
        self.next_due = None;
    }

    /// Arm or disarm to match the engine's running state.
    pub fn sync(&mut self, running: bool, now: Instant) {
        if running {
            self.arm(now);
        } else {
            self.disarm();
        }
    }

    /// Consume one due tick, if any.
    ///
    /// Call repeatedly to catch up after a slow iteration; each call
    /// consumes at most one interval.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(due + self.interval);
                true
            }
            _ => false,
        }
    }

    /// Time left until the next tick, or `None` when disarmed.
    #[must_use]
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}
