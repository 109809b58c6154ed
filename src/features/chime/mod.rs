//! Audible phase-completion cues.
//!
//! - Sound clip playback through a system player
//! - Synthesized sine tone fallback
//! - Silent operation when sound is disabled or unavailable

pub mod player;
pub mod tone;

pub use player::{Chime, ChimePlayer, ChimeSource, ClipSource, SilentChime, ToneSource};

#[cfg(test)]
pub use player::MockChime;
