//! Chime playback through a system audio player.
//!
//! Playback is a two-step policy: the configured clip first, then a
//! synthesized tone. Each step checks whether it can run before trying, and
//! a failed attempt (including a player that exits unsuccessfully) only
//! moves on to the next step. When nothing works the timer carries on
//! silently. The chain runs on a worker thread so the countdown never waits
//! for audio.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Arc;

use tracing::{debug, warn};

use super::tone;
use crate::config::{Paths, SoundConfig};
use crate::error::PomodoroError;

/// Player commands probed when none is configured.
const PLAYER_CANDIDATES: [&str; 3] = ["paplay", "aplay", "afplay"];

/// Clips probed when none is configured.
const CLIP_CANDIDATES: [&str; 4] = [
    "/usr/share/sounds/freedesktop/stereo/complete.oga",
    "/usr/share/sounds/freedesktop/stereo/bell.oga",
    "/usr/share/sounds/sound-icons/guitar-11.wav",
    "/System/Library/Sounds/Glass.aiff",
];

/// File name of the cached fallback tone.
const TONE_FILE: &str = "chime-880hz.wav";

/// Audible cue requested on every phase completion.
#[cfg_attr(test, mockall::automock)]
pub trait Chime {
    /// Play the cue. Failures are handled internally.
    fn ring(&self);
}

/// One way of producing a sound.
pub trait ChimeSource: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Whether this source has what it needs to try playing.
    fn is_available(&self) -> bool;

    /// Play to completion.
    ///
    /// # Errors
    ///
    /// Returns an error if playback could not be started or did not finish
    /// successfully.
    fn play(&self) -> Result<(), PomodoroError>;
}

/// A chime that never makes a sound.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentChime;

impl Chime for SilentChime {
    fn ring(&self) {
        debug!("Chime muted");
    }
}

/// Plays the first source that succeeds.
pub struct ChimePlayer {
    sources: Arc<Vec<Box<dyn ChimeSource>>>,
}

impl ChimePlayer {
    /// Create a player from an ordered list of sources.
    #[must_use]
    pub fn new(sources: Vec<Box<dyn ChimeSource>>) -> Self {
        Self {
            sources: Arc::new(sources),
        }
    }

    /// Build the chime described by the sound settings.
    #[must_use]
    pub fn from_config(sound: &SoundConfig, paths: &Paths) -> Box<dyn Chime> {
        if !sound.enabled {
            return Box::new(SilentChime);
        }

        let player = sound.player.clone().or_else(detect_player);
        let clip = sound.clip.clone().or_else(default_clip);
        debug!(?player, ?clip, "Configuring chime");

        let mut sources: Vec<Box<dyn ChimeSource>> = vec![Box::new(ClipSource {
            player: player.clone(),
            clip,
        })];
        if sound.fallback_tone {
            sources.push(Box::new(ToneSource {
                player,
                path: paths.cache.join(TONE_FILE),
            }));
        }

        Box::new(Self::new(sources))
    }
}

impl Chime for ChimePlayer {
    fn ring(&self) {
        let sources = Arc::clone(&self.sources);
        let spawned = std::thread::Builder::new()
            .name("chime".to_string())
            .spawn(move || {
                play_first(&sources);
            });
        if let Err(e) = spawned {
            warn!(error = %e, "Failed to start chime thread");
        }
    }
}

fn play_first(sources: &[Box<dyn ChimeSource>]) -> Option<&'static str> {
    for source in sources {
        if !source.is_available() {
            debug!(source = source.name(), "Chime source unavailable");
            continue;
        }
        match source.play() {
            Ok(()) => {
                debug!(source = source.name(), "Chime played");
                return Some(source.name());
            }
            Err(e) => warn!(source = source.name(), error = %e, "Chime source failed"),
        }
    }
    debug!("No chime source could play, continuing silently");
    None
}

/// Plays a sound clip with an external player.
#[derive(Debug, Clone)]
pub struct ClipSource {
    /// Player command
    pub player: Option<String>,
    /// Clip to play
    pub clip: Option<PathBuf>,
}

impl ChimeSource for ClipSource {
    fn name(&self) -> &'static str {
        "clip"
    }

    fn is_available(&self) -> bool {
        self.player.is_some() && self.clip.as_deref().is_some_and(Path::exists)
    }

    fn play(&self) -> Result<(), PomodoroError> {
        let (Some(player), Some(clip)) = (&self.player, &self.clip) else {
            return Err(PomodoroError::Audio("No clip or player configured".to_string()));
        };
        run_player(player, clip)
    }
}

/// Plays the synthesized sine tone, writing it to the cache on first use.
#[derive(Debug, Clone)]
pub struct ToneSource {
    /// Player command
    pub player: Option<String>,
    /// Where the tone file is cached
    pub path: PathBuf,
}

impl ToneSource {
    fn ensure_file(&self) -> Result<(), PomodoroError> {
        if self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, tone::sine_wav())
            .map_err(|e| PomodoroError::Audio(format!("Failed to write tone: {e}")))
    }
}

impl ChimeSource for ToneSource {
    fn name(&self) -> &'static str {
        "tone"
    }

    fn is_available(&self) -> bool {
        self.player.is_some()
    }

    fn play(&self) -> Result<(), PomodoroError> {
        let Some(player) = &self.player else {
            return Err(PomodoroError::Audio("No player configured".to_string()));
        };
        self.ensure_file()?;
        run_player(player, &self.path)
    }
}

/// Run `player file` and wait for it to finish.
fn run_player(player: &str, file: &Path) -> Result<(), PomodoroError> {
    let status = Command::new(player)
        .arg(file)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| PomodoroError::Audio(format!("Failed to run {player}: {e}")))?;

    if status.success() {
        Ok(())
    } else {
        Err(PomodoroError::Audio(format!(
            "{player} could not play {}: {status}",
            file.display()
        )))
    }
}

/// Find the first known player on `PATH`.
#[must_use]
pub fn detect_player() -> Option<String> {
    let path = std::env::var_os("PATH")?;
    PLAYER_CANDIDATES
        .iter()
        .find(|candidate| std::env::split_paths(&path).any(|dir| dir.join(candidate).is_file()))
        .map(|candidate| (*candidate).to_string())
}

/// Find the first known system clip.
#[must_use]
pub fn default_clip() -> Option<PathBuf> {
    CLIP_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::{Duration, Instant};

    use super::*;
    use tempfile::TempDir;

    struct FakeSource {
        available: bool,
        succeed: bool,
        plays: Arc<AtomicU32>,
    }

    impl ChimeSource for FakeSource {
        fn name(&self) -> &'static str {
            "fake"
        }

        fn is_available(&self) -> bool {
            self.available
        }

        fn play(&self) -> Result<(), PomodoroError> {
            self.plays.fetch_add(1, Ordering::SeqCst);
            if self.succeed {
                Ok(())
            } else {
                Err(PomodoroError::Audio("no device".to_string()))
            }
        }
    }

    fn fake(available: bool, succeed: bool) -> (Box<dyn ChimeSource>, Arc<AtomicU32>) {
        let plays = Arc::new(AtomicU32::new(0));
        let source = FakeSource {
            available,
            succeed,
            plays: Arc::clone(&plays),
        };
        (Box::new(source), plays)
    }

    fn count(plays: &AtomicU32) -> u32 {
        plays.load(Ordering::SeqCst)
    }

    fn wait_for(plays: &AtomicU32, expected: u32) -> u32 {
        let deadline = Instant::now() + Duration::from_secs(5);
        while count(plays) < expected && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(10));
        }
        count(plays)
    }

    #[test]
    fn test_primary_success_skips_fallback() {
        let (primary, primary_plays) = fake(true, true);
        let (fallback, fallback_plays) = fake(true, true);

        let played = play_first(&[primary, fallback]);

        assert_eq!(played, Some("fake"));
        assert_eq!(count(&primary_plays), 1);
        assert_eq!(count(&fallback_plays), 0);
    }

    #[test]
    fn test_primary_failure_uses_fallback() {
        let (primary, primary_plays) = fake(true, false);
        let (fallback, fallback_plays) = fake(true, true);

        play_first(&[primary, fallback]);

        assert_eq!(count(&primary_plays), 1);
        assert_eq!(count(&fallback_plays), 1);
    }

    #[test]
    fn test_unavailable_source_not_tried() {
        let (primary, primary_plays) = fake(false, true);
        let (fallback, fallback_plays) = fake(true, true);

        play_first(&[primary, fallback]);

        assert_eq!(count(&primary_plays), 0);
        assert_eq!(count(&fallback_plays), 1);
    }

    #[test]
    fn test_total_failure_is_silent() {
        let (primary, _) = fake(true, false);
        let (fallback, fallback_plays) = fake(true, false);

        let played = play_first(&[primary, fallback]);

        assert_eq!(played, None);
        assert_eq!(count(&fallback_plays), 1);
        assert_eq!(play_first(&[]), None);
    }

    #[test]
    fn test_ring_plays_in_background() {
        let (primary, primary_plays) = fake(true, true);

        ChimePlayer::new(vec![primary]).ring();

        assert_eq!(wait_for(&primary_plays, 1), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_unsuccessful_player_exit_is_a_failure() {
        let temp_dir = TempDir::new().unwrap();
        let clip = temp_dir.path().join("complete.oga");
        std::fs::write(&clip, b"OggS").unwrap();

        let source = ClipSource {
            player: Some("false".to_string()),
            clip: Some(clip),
        };

        assert!(source.is_available());
        assert!(matches!(source.play(), Err(PomodoroError::Audio(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_clip_player_falls_back_to_tone() {
        let temp_dir = TempDir::new().unwrap();
        let clip = temp_dir.path().join("complete.oga");
        std::fs::write(&clip, b"OggS").unwrap();
        let (fallback, fallback_plays) = fake(true, true);

        let clip_source: Box<dyn ChimeSource> = Box::new(ClipSource {
            player: Some("false".to_string()),
            clip: Some(clip),
        });
        ChimePlayer::new(vec![clip_source, fallback]).ring();

        assert_eq!(wait_for(&fallback_plays, 1), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_player_exit() {
        let temp_dir = TempDir::new().unwrap();
        let source = ToneSource {
            player: Some("true".to_string()),
            path: temp_dir.path().join(TONE_FILE),
        };

        assert!(source.play().is_ok());
        assert!(source.path.exists());
    }

    #[test]
    fn test_clip_source_availability() {
        let temp_dir = TempDir::new().unwrap();
        let clip = temp_dir.path().join("bell.wav");

        let source = ClipSource {
            player: Some("aplay".to_string()),
            clip: Some(clip.clone()),
        };
        assert!(!source.is_available());

        std::fs::write(&clip, b"RIFF").unwrap();
        assert!(source.is_available());

        let no_player = ClipSource {
            player: None,
            clip: Some(clip),
        };
        assert!(!no_player.is_available());
        assert!(no_player.play().is_err());
    }

    #[test]
    fn test_missing_player_binary_fails() {
        let temp_dir = TempDir::new().unwrap();
        let source = ToneSource {
            player: Some("definitely-not-a-player-binary".to_string()),
            path: temp_dir.path().join("cache").join(TONE_FILE),
        };

        assert!(source.is_available());
        assert!(matches!(source.play(), Err(PomodoroError::Audio(_))));
        // The tone file is still written for the next attempt
        assert!(source.path.exists());
    }

    #[test]
    fn test_from_config_disabled_is_silent() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().to_path_buf());
        let sound = SoundConfig {
            enabled: false,
            ..SoundConfig::default()
        };

        // Must not panic or spawn anything
        ChimePlayer::from_config(&sound, &paths).ring();
    }

    #[test]
    fn test_from_config_without_tone() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().to_path_buf());
        let sound = SoundConfig {
            player: Some("definitely-not-a-player-binary".to_string()),
            clip: Some(temp_dir.path().join("missing.wav")),
            fallback_tone: false,
            ..SoundConfig::default()
        };

        ChimePlayer::from_config(&sound, &paths).ring();
        assert!(!paths.cache.join(TONE_FILE).exists());
    }
}
