//! audio-batch-probe - Variable-length audio batching regression probe
//!
//! Exercises an OpenAI-compatible chat-completions endpoint with concurrent
//! audio transcription requests of different durations. Servers that batch
//! audio features with incompatible tensor shapes fail the variable-length
//! scenario; a fixed server passes every scenario.
//!
//! The library side exposes the building blocks so the scenario battery can
//! run against an in-process stub server in integration tests:
//! - [`audio`] - clip types, synthetic tone generation, decode and WAV/base64 encode
//! - [`samples`] - the three acquisition sources (directory, synthetic, dataset)
//! - [`client`] - the chat-completions request issuer
//! - [`scenarios`] - scenario selection, concurrent fan-out, reporting

pub mod audio;
pub mod client;
pub mod dataset;
pub mod samples;
pub mod scenarios;

/// Default base URL of the inference server (vLLM's standard local bind).
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000/v1";

/// Multimodal model the batching fix was reported against.
pub const DEFAULT_MODEL: &str = "fixie-ai/ultravox-v0_6-llama-3_1-8b";
