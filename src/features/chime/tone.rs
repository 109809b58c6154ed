//! Synthesized fallback tone.
//!
//! A short sine beep rendered as a 16-bit mono PCM WAV file, used when no
//! sound clip can be played.

use std::f64::consts::TAU;

/// Tone frequency in Hz.
pub const TONE_FREQUENCY_HZ: f64 = 880.0;
/// Tone length in milliseconds.
pub const TONE_DURATION_MS: u32 = 350;
/// Linear gain applied to the sine wave.
pub const TONE_GAIN: f64 = 0.05;
/// Output sample rate.
pub const SAMPLE_RATE: u32 = 44_100;

/// Render the fallback tone as a complete WAV file.
#[must_use]
pub fn sine_wav() -> Vec<u8> {
    let samples = sine_samples(TONE_FREQUENCY_HZ, TONE_DURATION_MS, TONE_GAIN, SAMPLE_RATE);
    encode_wav(&samples, SAMPLE_RATE)
}

/// Generate signed 16-bit samples of a sine wave.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn sine_samples(frequency: f64, duration_ms: u32, gain: f64, sample_rate: u32) -> Vec<i16> {
    let count = u64::from(sample_rate) * u64::from(duration_ms) / 1000;
    (0..count)
        .map(|n| {
            #[allow(clippy::cast_precision_loss)]
            let t = n as f64 / f64::from(sample_rate);
            let value = (TAU * frequency * t).sin() * gain;
            (value * f64::from(i16::MAX)).round() as i16
        })
        .collect()
}

/// Wrap mono 16-bit samples in a RIFF/WAVE container.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn encode_wav(samples: &[i16], sample_rate: u32) -> Vec<u8> {
    let channels: u16 = 1;
    let bits_per_sample: u16 = 16;
    let block_align = channels * bits_per_sample / 8;
    let byte_rate = sample_rate * u32::from(block_align);
    let data_len = (samples.len() * usize::from(block_align)) as u32;

    let mut out = Vec::with_capacity(44 + data_len as usize);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");

    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&channels.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&bits_per_sample.to_le_bytes());

    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    for sample in samples {
        out.extend_from_slice(&sample.to_le_bytes());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_count() {
        let samples = sine_samples(880.0, 350, 0.05, 44_100);
        assert_eq!(samples.len(), 15_435);
    }

    #[test]
    fn test_samples_respect_gain() {
        let samples = sine_samples(880.0, 350, 0.05, 44_100);
        let peak = samples.iter().map(|s| s.unsigned_abs()).max().unwrap();
        assert!(peak > 1500);
        assert!(peak <= 1639);
        assert_eq!(samples[0], 0);
    }

    #[test]
    fn test_wav_header() {
        let wav = encode_wav(&[0, 1, -1], 8000);

        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[12..16], b"fmt ");
        assert_eq!(&wav[36..40], b"data");
        assert_eq!(u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]), 6);
        assert_eq!(u32::from_le_bytes([wav[4], wav[5], wav[6], wav[7]]), 42);
        assert_eq!(u32::from_le_bytes([wav[24], wav[25], wav[26], wav[27]]), 8000);
        assert_eq!(wav.len(), 50);
    }

    #[test]
    fn test_sine_wav_size() {
        let wav = sine_wav();
        assert_eq!(wav.len(), 44 + 15_435 * 2);
    }
}
