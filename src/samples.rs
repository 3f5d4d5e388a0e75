//! Sample pool acquisition
//!
//! Three interchangeable sources, selected from the command line, each
//! producing up to four labelled clips: a local directory of audio files, the
//! synthetic tone battery, or real speech from the MINDS-14 dataset. An empty
//! directory is fatal; a dataset failure falls back to synthetic audio.

use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use crate::audio::{decode, synth, NamedClip};
use crate::dataset::DatasetClient;

/// Extensions the directory source accepts
pub const AUDIO_EXTENSIONS: [&str; 3] = ["wav", "mp3", "flac"];

/// Clips per pool; enough to cover pairwise and all-samples scenarios
pub const MAX_POOL_SIZE: usize = 4;

/// Which acquisition source to use for a run.
#[derive(Debug, Clone)]
pub enum SampleSource<'a> {
    Directory(&'a Path),
    Synthetic,
    Dataset,
}

/// Build the sample pool for the selected source.
///
/// Directory errors (including "no matching files") propagate and abort the
/// run before any request is sent. Dataset errors are downgraded to a warning
/// and the synthetic battery is used instead.
pub async fn acquire(source: SampleSource<'_>) -> Result<Vec<NamedClip>> {
    match source {
        SampleSource::Directory(dir) => load_from_dir(dir),
        SampleSource::Synthetic => {
            info!("Using synthetic audio");
            Ok(synth::synthetic_pool())
        }
        SampleSource::Dataset => match fetch_dataset_pool().await {
            Ok(pool) => Ok(pool),
            Err(e) => {
                warn!("Dataset failed: {e}, falling back to synthetic audio");
                Ok(synth::synthetic_pool())
            }
        },
    }
}

async fn fetch_dataset_pool() -> Result<Vec<NamedClip>> {
    let client = DatasetClient::new()?;
    Ok(client.fetch_pool().await?)
}

/// Load up to [`MAX_POOL_SIZE`] clips from a directory of audio files.
///
/// Files are sorted by name so repeated runs pick the same clips. Zero
/// matching files is an error.
pub fn load_from_dir(dir: &Path) -> Result<Vec<NamedClip>> {
    let mut files: Vec<_> = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .map(|ext| AUDIO_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
                .unwrap_or(false)
        })
        .collect();

    if files.is_empty() {
        bail!("No audio files in {}", dir.display());
    }

    files.sort();
    files.truncate(MAX_POOL_SIZE);

    info!("Loading {} files from {}", files.len(), dir.display());

    let mut pool = Vec::with_capacity(files.len());
    for path in files {
        let clip = decode::decode_file(&path)
            .with_context(|| format!("Failed to decode {}", path.display()))?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unnamed")
            .to_string();
        pool.push(NamedClip::new(name, clip));
    }

    Ok(pool)
}
