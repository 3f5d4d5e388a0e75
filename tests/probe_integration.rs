//! Scenario battery against an in-process stub server
//!
//! Spins up a minimal axum chat-completions endpoint on an ephemeral port and
//! runs the probe client and full battery against it, covering both the all-OK
//! path and a server that rejects requests the way a broken batching path does.

use audio_batch_probe::audio::synth::{sine_clip, synthetic_pool};
use audio_batch_probe::client::ProbeClient;
use audio_batch_probe::scenarios;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

/// Bind an ephemeral port, serve `app`, return the /v1 base URL.
async fn spawn_stub(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/v1")
}

/// Stub that answers every request with a fixed transcription.
fn ok_router() -> Router {
    Router::new().route(
        "/v1/chat/completions",
        post(|Json(body): Json<Value>| async move {
            // Echo whether the audio part arrived as a WAV data URL
            let url = body["messages"][0]["content"][1]["audio_url"]["url"]
                .as_str()
                .unwrap_or_default();
            let content = if url.starts_with("data:audio/wav;base64,") {
                "the quick brown fox"
            } else {
                "missing audio part"
            };
            Json(json!({
                "choices": [{"message": {"role": "assistant", "content": content}}]
            }))
        }),
    )
}

/// Stub that fails the way an unfixed batching path does.
fn broken_router() -> Router {
    Router::new().route(
        "/v1/chat/completions",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "inconsistent shapes in audio feature batch",
            )
        }),
    )
}

#[tokio::test]
async fn transcribe_success_carries_response_text_and_latency() {
    let base_url = spawn_stub(ok_router()).await;
    let client = ProbeClient::new(&base_url, "test-model", "dummy", 256).unwrap();

    let clip = sine_clip(1.5, 16_000);
    let outcome = client.transcribe("short", &clip).await;

    assert!(outcome.success, "detail: {}", outcome.detail);
    assert_eq!(outcome.label, "short");
    assert_eq!(outcome.detail, "the quick brown fox");
    assert!(outcome.elapsed.as_secs_f64() >= 0.0);
}

#[tokio::test]
async fn transcribe_failure_surfaces_server_error_body() {
    let base_url = spawn_stub(broken_router()).await;
    let client = ProbeClient::new(&base_url, "test-model", "dummy", 256).unwrap();

    let clip = sine_clip(2.0, 16_000);
    let outcome = client.transcribe("short", &clip).await;

    assert!(!outcome.success);
    assert!(outcome.detail.contains("API error 500"));
    assert!(outcome.detail.contains("inconsistent shapes"));
}

#[tokio::test]
async fn transcribe_unreachable_server_is_a_failure_not_a_panic() {
    // Bind and drop to get a port with nothing listening
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ProbeClient::new(&format!("http://{addr}/v1"), "m", "k", 16).unwrap();
    let outcome = client.transcribe("nobody-home", &sine_clip(0.5, 16_000)).await;

    assert!(!outcome.success);
    assert!(outcome.detail.contains("Network error"));
}

#[tokio::test]
async fn full_battery_passes_against_healthy_server() {
    let base_url = spawn_stub(ok_router()).await;
    let client = ProbeClient::new(&base_url, "test-model", "dummy", 256).unwrap();

    let pool = synthetic_pool();
    let results = scenarios::run_battery(&client, &pool).await;

    // Four clips in the pool, so the all-samples scenario runs too
    assert_eq!(results.len(), 4);
    assert!(results.iter().all(|r| r.passed));
    assert!(scenarios::print_summary(&results));
}

#[tokio::test]
async fn full_battery_fails_against_broken_server() {
    let base_url = spawn_stub(broken_router()).await;
    let client = ProbeClient::new(&base_url, "test-model", "dummy", 256).unwrap();

    let pool = synthetic_pool();
    let results = scenarios::run_battery(&client, &pool).await;

    // The baseline is recorded as passing; every concurrent scenario fails
    assert!(results.iter().any(|r| !r.passed));
    let critical = results
        .iter()
        .find(|r| r.name == "Variable-length concurrent")
        .unwrap();
    assert!(!critical.passed);
    assert!(!scenarios::print_summary(&results));
}

#[tokio::test]
async fn battery_skips_all_samples_scenario_for_small_pools() {
    let base_url = spawn_stub(ok_router()).await;
    let client = ProbeClient::new(&base_url, "test-model", "dummy", 256).unwrap();

    let pool = synthetic_pool().into_iter().take(2).collect::<Vec<_>>();
    let results = scenarios::run_battery(&client, &pool).await;

    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r.name != "All concurrent"));
}
