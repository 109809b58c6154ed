//! Cycle status reports.
//!
//! A point-in-time summary of the stored settings and session counter, used
//! by `pomodoro status`.

use serde::{Deserialize, Serialize};

use super::engine::sessions_until_long_break;
use super::phase::Phase;
use super::settings::Configuration;
use super::store::ConfigStore;

/// Stored settings plus where the work/break cycle currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    /// Active timer settings
    pub configuration: Configuration,
    /// Completed work sessions
    pub completed_work_sessions: u64,
    /// Position of the next work session within the cycle (1-based)
    pub cycle_position: u32,
    /// Work sessions left until the next long break
    pub sessions_until_long_break: u32,
    /// Break that follows the next completed work session
    pub next_break: Phase,
}

impl StatusReport {
    /// Build a report from raw values.
    #[must_use]
    pub fn new(configuration: Configuration, completed_work_sessions: u64) -> Self {
        let until = sessions_until_long_break(
            completed_work_sessions,
            configuration.sessions_before_long,
        );
        let cycle = configuration.sessions_before_long.max(1);

        Self {
            configuration,
            completed_work_sessions,
            cycle_position: cycle - until + 1,
            sessions_until_long_break: until,
            next_break: if until == 1 {
                Phase::LongBreak
            } else {
                Phase::ShortBreak
            },
        }
    }

    /// Build a report from what the store currently holds.
    #[must_use]
    pub fn from_store(store: &ConfigStore) -> Self {
        Self::new(store.load(), store.load_session_count())
    }
}
