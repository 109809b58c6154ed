//! Timer settings.
//!
//! [`Configuration`] is the validated, persisted form (durations in seconds).
//! [`RawSettingsInput`] is what a settings form submits: durations in minutes
//! and a session count, all as unvalidated text.

use serde::{Deserialize, Serialize};

/// Default work duration in seconds.
pub const DEFAULT_WORK_SECONDS: u32 = 25 * 60;
/// Default short break duration in seconds.
pub const DEFAULT_SHORT_BREAK_SECONDS: u32 = 5 * 60;
/// Default long break duration in seconds.
pub const DEFAULT_LONG_BREAK_SECONDS: u32 = 15 * 60;
/// Default number of work sessions before a long break.
pub const DEFAULT_SESSIONS_BEFORE_LONG: u32 = 4;

/// Work/break cycle settings. Every field is at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Work duration in seconds
    #[serde(rename = "work")]
    pub work_seconds: u32,
    /// Short break duration in seconds
    #[serde(rename = "short")]
    pub short_break_seconds: u32,
    /// Long break duration in seconds
    #[serde(rename = "long")]
    pub long_break_seconds: u32,
    /// Work sessions per cycle; the last one is followed by a long break
    #[serde(rename = "sessionsBeforeLong")]
    pub sessions_before_long: u32,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            work_seconds: DEFAULT_WORK_SECONDS,
            short_break_seconds: DEFAULT_SHORT_BREAK_SECONDS,
            long_break_seconds: DEFAULT_LONG_BREAK_SECONDS,
            sessions_before_long: DEFAULT_SESSIONS_BEFORE_LONG,
        }
    }
}

impl Configuration {
    /// Check that every field is at least 1.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.work_seconds >= 1
            && self.short_break_seconds >= 1
            && self.long_break_seconds >= 1
            && self.sessions_before_long >= 1
    }
}

/// Raw settings as submitted by a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSettingsInput {
    /// Work duration in minutes
    pub work: String,
    /// Short break duration in minutes
    pub short_break: String,
    /// Long break duration in minutes
    pub long_break: String,
    /// Work sessions before a long break
    pub sessions_before_long: String,
}

impl RawSettingsInput {
    /// Create raw input from anything string-like.
    pub fn new(
        work: impl Into<String>,
        short_break: impl Into<String>,
        long_break: impl Into<String>,
        sessions_before_long: impl Into<String>,
    ) -> Self {
        Self {
            work: work.into(),
            short_break: short_break.into(),
            long_break: long_break.into(),
            sessions_before_long: sessions_before_long.into(),
        }
    }

    /// Validate into a [`Configuration`].
    ///
    /// Every field is coerced to a number; anything non-numeric, non-finite or
    /// below 1 becomes 1. Durations are converted from minutes to seconds.
    #[must_use]
    pub fn clamp(&self) -> Configuration {
        Configuration {
            work_seconds: minutes_to_seconds(coerce(&self.work)),
            short_break_seconds: minutes_to_seconds(coerce(&self.short_break)),
            long_break_seconds: minutes_to_seconds(coerce(&self.long_break)),
            sessions_before_long: whole(coerce(&self.sessions_before_long)),
        }
    }
}

impl From<&Configuration> for RawSettingsInput {
    /// Pre-fill a form from saved settings (whole minutes, rounded down).
    fn from(config: &Configuration) -> Self {
        Self::new(
            (config.work_seconds / 60).to_string(),
            (config.short_break_seconds / 60).to_string(),
            (config.long_break_seconds / 60).to_string(),
            config.sessions_before_long.to_string(),
        )
    }
}

/// Read a field as a number, at least 1.
///
/// Accepts decimals and exponents as well as `0x`, `0o` and `0b` integer
/// literals. Anything else reads as 1.
fn coerce(raw: &str) -> f64 {
    let raw = raw.trim();
    radix_literal(raw)
        .or_else(|| raw.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .map_or(1.0, |v| v.max(1.0))
}

#[allow(clippy::cast_precision_loss)]
fn radix_literal(raw: &str) -> Option<f64> {
    let prefix = raw.get(..2)?.to_ascii_lowercase();
    let radix = match prefix.as_str() {
        "0x" => 16,
        "0o" => 8,
        "0b" => 2,
        _ => return None,
    };
    u64::from_str_radix(&raw[2..], radix).ok().map(|v| v as f64)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn minutes_to_seconds(minutes: f64) -> u32 {
    (minutes * 60.0).round() as u32
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole(value: f64) -> u32 {
    value.floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configuration() {
        let config = Configuration::default();
        assert_eq!(config.work_seconds, 1500);
        assert_eq!(config.short_break_seconds, 300);
        assert_eq!(config.long_break_seconds, 900);
        assert_eq!(config.sessions_before_long, 4);
        assert!(config.is_valid());
    }

    #[test]
    fn test_clamp_invalid_values() {
        let raw = RawSettingsInput::new("0", "-5", "abc", "4");

        let config = raw.clamp();

        assert_eq!(
            config,
            Configuration {
                work_seconds: 60,
                short_break_seconds: 60,
                long_break_seconds: 60,
                sessions_before_long: 4,
            }
        );
    }

    #[test]
    fn test_clamp_valid_values() {
        let raw = RawSettingsInput::new("50", "10", " 20 ", "3");

        let config = raw.clamp();

        assert_eq!(config.work_seconds, 3000);
        assert_eq!(config.short_break_seconds, 600);
        assert_eq!(config.long_break_seconds, 1200);
        assert_eq!(config.sessions_before_long, 3);
    }

    #[test]
    fn test_clamp_edge_inputs() {
        let raw = RawSettingsInput::new("", "NaN", "inf", "0");

        let config = raw.clamp();

        assert_eq!(config.work_seconds, 60);
        assert_eq!(config.short_break_seconds, 60);
        assert_eq!(config.long_break_seconds, 60);
        assert_eq!(config.sessions_before_long, 1);
        assert!(config.is_valid());
    }

    #[test]
    fn test_clamp_radix_literals() {
        let raw = RawSettingsInput::new("0x10", "0b11", "0O17", "0xZZ");

        let config = raw.clamp();

        assert_eq!(config.work_seconds, 960);
        assert_eq!(config.short_break_seconds, 180);
        assert_eq!(config.long_break_seconds, 900);
        assert_eq!(config.sessions_before_long, 1);
    }

    #[test]
    fn test_clamp_fractional_values() {
        let raw = RawSettingsInput::new("1.5", "2", "3", "2.9");

        let config = raw.clamp();

        assert_eq!(config.work_seconds, 90);
        assert_eq!(config.sessions_before_long, 2);
    }

    #[test]
    fn test_prefill_from_configuration() {
        let config = Configuration {
            work_seconds: 1530,
            short_break_seconds: 300,
            long_break_seconds: 59,
            sessions_before_long: 4,
        };

        let raw = RawSettingsInput::from(&config);

        assert_eq!(raw, RawSettingsInput::new("25", "5", "0", "4"));
    }

    #[test]
    fn test_configuration_json_keys() {
        let json = serde_json::to_string(&Configuration::default()).unwrap();
        assert!(json.contains("\"work\":1500"));
        assert!(json.contains("\"short\":300"));
        assert!(json.contains("\"long\":900"));
        assert!(json.contains("\"sessionsBeforeLong\":4"));
    }

    #[test]
    fn test_is_valid() {
        let mut config = Configuration::default();
        config.sessions_before_long = 0;
        assert!(!config.is_valid());
    }
}
