//! Chat-completions request issuer
//!
//! Wraps one encoded clip into a multimodal chat request (text instruction plus
//! data-URL audio part) and sends it to the server. Every failure mode at this
//! boundary is converted into a failed [`RequestOutcome`] rather than
//! propagated; a single bad request must never abort the scenario battery.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::audio::{encode, AudioClip, AudioError};

const USER_AGENT: &str = concat!("audio-batch-probe/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const TRANSCRIBE_PROMPT: &str = "Transcribe this audio:";

/// Probe client errors
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Response contained no choices")]
    NoChoices,

    #[error("Audio encode failed: {0}")]
    Encode(#[from] AudioError),
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: Vec<ContentPart>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    AudioUrl { audio_url: AudioUrl },
}

#[derive(Debug, Serialize)]
struct AudioUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Result of one transcription request, consumed by the scenario report.
#[derive(Debug, Clone)]
pub struct RequestOutcome {
    pub label: String,
    pub success: bool,
    /// Generated text on success, error description on failure
    pub detail: String,
    pub elapsed: Duration,
}

/// Client for an OpenAI-compatible chat-completions endpoint.
pub struct ProbeClient {
    http_client: reqwest::Client,
    completions_url: String,
    model: String,
    api_key: String,
    max_tokens: u32,
}

impl ProbeClient {
    /// Create a client against `base_url` (e.g. `http://127.0.0.1:8000/v1`).
    pub fn new(
        base_url: &str,
        model: impl Into<String>,
        api_key: impl Into<String>,
        max_tokens: u32,
    ) -> Result<Self, ClientError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            completions_url: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            model: model.into(),
            api_key: api_key.into(),
            max_tokens,
        })
    }

    /// Send one transcription request, measuring wall-clock latency.
    ///
    /// Never fails: network errors, non-2xx statuses and malformed responses
    /// all come back as a `RequestOutcome` with `success == false` and the
    /// error text in `detail`.
    pub async fn transcribe(&self, label: &str, clip: &AudioClip) -> RequestOutcome {
        let start = Instant::now();
        match self.send_request(clip).await {
            Ok(text) => RequestOutcome {
                label: label.to_string(),
                success: true,
                detail: text,
                elapsed: start.elapsed(),
            },
            Err(e) => RequestOutcome {
                label: label.to_string(),
                success: false,
                detail: e.to_string(),
                elapsed: start.elapsed(),
            },
        }
    }

    async fn send_request(&self, clip: &AudioClip) -> Result<String, ClientError> {
        let data_url = encode::to_data_url(clip)?;

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: vec![
                    ContentPart::Text {
                        text: TRANSCRIBE_PROMPT.to_string(),
                    },
                    ContentPart::AudioUrl {
                        audio_url: AudioUrl { url: data_url },
                    },
                ],
            }],
            max_tokens: self.max_tokens,
        };

        debug!(
            duration_secs = clip.duration_secs(),
            "Sending transcription request"
        );

        let response = self
            .http_client
            .post(&self.completions_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ClientError::Api(status.as_u16(), error_text));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))?;

        let content = chat_response
            .choices
            .first()
            .ok_or(ClientError::NoChoices)?
            .message
            .content
            .clone()
            .unwrap_or_default();

        Ok(content)
    }
}
