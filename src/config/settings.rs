//! Application preferences for pomodoro.
//!
//! Preferences are loaded from `~/.pomodoro/config.yaml`. They cover how the
//! program behaves around the timer (sound, tick pacing); the timer durations
//! themselves live in the key-value store, see
//! [`ConfigStore`](crate::features::focus::ConfigStore).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::PomodoroError;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Sound settings.
    pub sound: SoundConfig,
    /// Timer pacing settings.
    pub timer: TimerConfig,
}

/// Chime playback settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SoundConfig {
    /// Play a chime when a phase completes.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Sound clip played on phase completion.
    #[serde(default)]
    pub clip: Option<PathBuf>,
    /// Player command used for the clip (auto-detected when unset).
    #[serde(default)]
    pub player: Option<String>,
    /// Synthesize a short tone when the clip cannot be played.
    #[serde(default = "default_true")]
    pub fallback_tone: bool,
}

/// Timer pacing settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimerConfig {
    /// Interval between ticks in milliseconds.
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
}

const fn default_true() -> bool {
    true
}

const fn default_tick_interval() -> u64 {
    1000
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            clip: None,
            player: None,
            fallback_tone: default_true(),
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval(),
        }
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, PomodoroError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            PomodoroError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            PomodoroError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Tick interval as a [`std::time::Duration`], never shorter than 10ms.
    #[must_use]
    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timer.tick_interval_ms.max(10))
    }
}
