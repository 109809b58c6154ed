//! Focus timer.
//!
//! The work/break cycle and everything it needs:
//! - Phase state machine with session counting
//! - Durable settings with change notification
//! - Cooperative one-second ticking
//! - Clock and duration formatting
//! - Cycle status reports

pub mod engine;
pub mod phase;
pub mod report;
pub mod session;
pub mod settings;
pub mod store;
pub mod ticker;
pub mod timer;

pub use engine::{sessions_until_long_break, PhaseCompletion, TimerEngine, TimerSnapshot};
pub use phase::Phase;
pub use report::StatusReport;
pub use session::Pomodoro;
pub use settings::{Configuration, RawSettingsInput};
pub use store::{ConfigStore, SessionCounter, Subscription, CONFIG_KEY, SESSION_COUNT_KEY};
pub use ticker::Ticker;
pub use timer::{format_clock, format_duration, render_progress_bar};
