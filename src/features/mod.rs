//! Feature modules for pomodoro.
//!
//! - `focus`: the work/break timer, its settings and persistence
//! - `chime`: audible cue played when a phase completes
//! - `shell`: shell completion scripts

pub mod chime;
pub mod focus;
pub mod shell;
