//! Synthetic tone generation
//!
//! Produces deterministic sine clips so the probe can run without any audio
//! files or network access to a dataset. A pure tone is enough to trigger the
//! batching path on the server; the content of the audio is irrelevant.

use std::f32::consts::PI;

use super::{AudioClip, NamedClip};

/// Sample rate for generated clips (matches typical ASR input)
pub const SYNTH_SAMPLE_RATE: u32 = 16_000;

/// Durations of the default battery, chosen to force distinct feature lengths
pub const SYNTH_DURATIONS_SEC: [f64; 4] = [1.5, 2.5, 4.0, 6.0];

const TONE_FREQ_HZ: f32 = 440.0;
const TONE_AMPLITUDE: f32 = 0.3;

/// Generate a 440 Hz sine clip of the requested duration.
///
/// Sample count is `duration_secs * sample_rate`, rounded to the nearest
/// whole sample.
pub fn sine_clip(duration_secs: f64, sample_rate: u32) -> AudioClip {
    let count = (duration_secs * sample_rate as f64).round() as usize;
    let samples = (0..count)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            (2.0 * PI * TONE_FREQ_HZ * t).sin() * TONE_AMPLITUDE
        })
        .collect();
    AudioClip::new(samples, sample_rate)
}

/// The default four-clip synthetic pool, labelled `synthetic_<dur>s`.
pub fn synthetic_pool() -> Vec<NamedClip> {
    SYNTH_DURATIONS_SEC
        .iter()
        .map(|&dur| {
            NamedClip::new(
                format!("synthetic_{dur}s"),
                sine_clip(dur, SYNTH_SAMPLE_RATE),
            )
        })
        .collect()
}
