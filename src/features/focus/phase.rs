//! Timer phases.

use serde::{Deserialize, Serialize};

use super::settings::Configuration;

/// One of the three timer modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    /// Focused work
    Work,
    /// Short break between work sessions
    ShortBreak,
    /// Long break after a full cycle
    LongBreak,
}

impl Phase {
    /// All phases in quick-switch order.
    pub const ALL: [Self; 3] = [Self::Work, Self::ShortBreak, Self::LongBreak];

    /// Configured duration of this phase in seconds.
    #[must_use]
    pub const fn duration(&self, config: &Configuration) -> u32 {
        match self {
            Self::Work => config.work_seconds,
            Self::ShortBreak => config.short_break_seconds,
            Self::LongBreak => config.long_break_seconds,
        }
    }

    /// Parse a phase from user input.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "work" | "w" | "focus" | "pomodoro" => Some(Self::Work),
            "short" | "short-break" | "shortbreak" | "sb" => Some(Self::ShortBreak),
            "long" | "long-break" | "longbreak" | "lb" => Some(Self::LongBreak),
            _ => None,
        }
    }

    /// Get display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::ShortBreak => "Short Break",
            Self::LongBreak => "Long Break",
        }
    }

    /// Short label for quick-mode buttons.
    #[must_use]
    pub const fn short_name(&self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::ShortBreak => "Short",
            Self::LongBreak => "Long",
        }
    }

    /// Check if this is a break phase.
    #[must_use]
    pub const fn is_break(&self) -> bool {
        matches!(self, Self::ShortBreak | Self::LongBreak)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_duration() {
        let config = Configuration::default();
        assert_eq!(Phase::Work.duration(&config), 1500);
        assert_eq!(Phase::ShortBreak.duration(&config), 300);
        assert_eq!(Phase::LongBreak.duration(&config), 900);
    }

    #[test]
    fn test_phase_parse() {
        assert_eq!(Phase::parse("work"), Some(Phase::Work));
        assert_eq!(Phase::parse(" Short "), Some(Phase::ShortBreak));
        assert_eq!(Phase::parse("lb"), Some(Phase::LongBreak));
        assert_eq!(Phase::parse("lunch"), None);
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::Work.to_string(), "Work");
        assert_eq!(Phase::ShortBreak.to_string(), "Short Break");
        assert_eq!(Phase::LongBreak.to_string(), "Long Break");
    }

    #[test]
    fn test_phase_is_break() {
        assert!(!Phase::Work.is_break());
        assert!(Phase::ShortBreak.is_break());
        assert!(Phase::LongBreak.is_break());
    }
}
