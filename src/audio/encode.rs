//! WAV container and base64 data-URL encoding
//!
//! The server accepts audio embedded inline as a base64 data URL, so each clip
//! is written to an in-memory 16-bit PCM WAV and base64-encoded. No files touch
//! disk on this path.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hound::{SampleFormat, WavSpec, WavWriter};

use super::{AudioClip, AudioError};

/// Encode a clip as a mono 16-bit PCM WAV in memory.
pub fn encode_wav(clip: &AudioClip) -> Result<Vec<u8>, AudioError> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: clip.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut cursor, spec)?;
        for &sample in &clip.samples {
            let quantized = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
            writer.write_sample(quantized)?;
        }
        writer.finalize()?;
    }

    Ok(cursor.into_inner())
}

/// Encode a clip as a `data:audio/wav;base64,...` URL for inline embedding.
pub fn to_data_url(clip: &AudioClip) -> Result<String, AudioError> {
    let wav = encode_wav(clip)?;
    Ok(format!("data:audio/wav;base64,{}", BASE64.encode(wav)))
}
