//! Audio clip types shared by acquisition, encoding and the scenario runner.

use thiserror::Error;

pub mod decode;
pub mod encode;
pub mod synth;

/// Audio processing errors (decode and encode paths)
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("No audio tracks found")]
    NoTracks,

    #[error("Sample rate not specified in stream")]
    MissingSampleRate,

    #[error("Decoded stream contained no samples")]
    Empty,

    #[error("WAV encode error: {0}")]
    Encode(#[from] hound::Error),
}

/// Mono PCM clip. Held in memory only for the duration of one probe run.
#[derive(Debug, Clone)]
pub struct AudioClip {
    /// Amplitudes in [-1.0, 1.0]
    pub samples: Vec<f32>,
    /// Samples per second, always > 0
    pub sample_rate: u32,
}

impl AudioClip {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        debug_assert!(sample_rate > 0, "sample_rate must be positive");
        debug_assert!(!samples.is_empty(), "clip must contain samples");
        Self {
            samples,
            sample_rate,
        }
    }

    /// Playback duration in seconds.
    ///
    /// Clips from different sources carry different sample rates, so duration
    /// comparisons must go through this rather than raw sample counts.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Clip plus the label used in request tracking and the printed report.
#[derive(Debug, Clone)]
pub struct NamedClip {
    pub name: String,
    pub clip: AudioClip,
}

impl NamedClip {
    pub fn new(name: impl Into<String>, clip: AudioClip) -> Self {
        Self {
            name: name.into(),
            clip,
        }
    }
}
