//! Configuration management for pomodoro.
//!
//! This module handles loading and saving preferences from `~/.pomodoro/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{Config, SoundConfig, TimerConfig};
