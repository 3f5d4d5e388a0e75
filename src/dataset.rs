//! MINDS-14 dataset client
//!
//! Fetches real speech rows from the Hugging Face datasets-server REST API so
//! the probe can exercise the server with natural-length utterances instead of
//! pure tones. Any failure on this path is treated as non-fatal by the caller,
//! which falls back to synthetic audio.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::audio::{decode, AudioError, NamedClip};

const ROWS_URL: &str = "https://datasets-server.huggingface.co/rows";
const DATASET: &str = "PolyAI/minds14";
const DATASET_CONFIG: &str = "en-US";
const DATASET_SPLIT: &str = "train";
const USER_AGENT: &str = concat!("audio-batch-probe/", env!("CARGO_PKG_VERSION"));
const FETCH_TIMEOUT: Duration = Duration::from_secs(60);

/// Row indices sampled from the train split. Fixed so runs are comparable.
pub const DATASET_ROW_INDICES: [u64; 4] = [0, 5, 10, 15];

/// Dataset client errors
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Row {0} has no audio cell")]
    MissingAudio(u64),

    #[error("Audio decode failed: {0}")]
    Audio(#[from] AudioError),
}

#[derive(Debug, Deserialize)]
struct RowsResponse {
    rows: Vec<RowEntry>,
}

#[derive(Debug, Deserialize)]
struct RowEntry {
    row: RowCells,
}

#[derive(Debug, Deserialize)]
struct RowCells {
    #[serde(default)]
    audio: Vec<AudioCell>,
}

#[derive(Debug, Deserialize)]
struct AudioCell {
    src: String,
}

/// Client for the datasets-server rows endpoint.
pub struct DatasetClient {
    http_client: reqwest::Client,
}

impl DatasetClient {
    pub fn new() -> Result<Self, DatasetError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| DatasetError::Network(e.to_string()))?;

        Ok(Self { http_client })
    }

    /// Fetch the fixed row battery, labelled `minds14_<index>`.
    pub async fn fetch_pool(&self) -> Result<Vec<NamedClip>, DatasetError> {
        info!("Loading real speech from the {DATASET} dataset");

        let mut pool = Vec::with_capacity(DATASET_ROW_INDICES.len());
        for index in DATASET_ROW_INDICES {
            let clip = self.fetch_row(index).await?;
            pool.push(NamedClip::new(format!("minds14_{index}"), clip));
        }
        Ok(pool)
    }

    async fn fetch_row(&self, index: u64) -> Result<crate::audio::AudioClip, DatasetError> {
        let response = self
            .http_client
            .get(ROWS_URL)
            .query(&[
                ("dataset", DATASET),
                ("config", DATASET_CONFIG),
                ("split", DATASET_SPLIT),
                ("offset", &index.to_string()),
                ("length", "1"),
            ])
            .send()
            .await
            .map_err(|e| DatasetError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(DatasetError::Api(status.as_u16(), error_text));
        }

        let rows: RowsResponse = response
            .json()
            .await
            .map_err(|e| DatasetError::Parse(e.to_string()))?;

        let src = rows
            .rows
            .first()
            .and_then(|entry| entry.row.audio.first())
            .map(|cell| cell.src.clone())
            .ok_or(DatasetError::MissingAudio(index))?;

        debug!("Fetching audio for row {index}: {src}");

        let audio_response = self
            .http_client
            .get(&src)
            .send()
            .await
            .map_err(|e| DatasetError::Network(e.to_string()))?;

        let audio_status = audio_response.status();
        if !audio_status.is_success() {
            return Err(DatasetError::Api(
                audio_status.as_u16(),
                format!("audio fetch for row {index}"),
            ));
        }

        let bytes = audio_response
            .bytes()
            .await
            .map_err(|e| DatasetError::Network(e.to_string()))?;

        Ok(decode::decode_bytes(bytes.to_vec(), Some("wav"))?)
    }
}
