//! audio-batch-probe - Main entry point
//!
//! Command-line probe that confirms an inference server's variable-length
//! audio batching fix is in place. Acquires a small pool of audio clips, runs
//! the scenario battery against the server, prints a report and exits nonzero
//! if anything failed.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use audio_batch_probe::client::ProbeClient;
use audio_batch_probe::samples::{self, SampleSource};
use audio_batch_probe::scenarios;
use audio_batch_probe::{DEFAULT_MODEL, DEFAULT_SERVER_URL};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "audio-batch-probe")]
#[command(about = "Probe an OpenAI-compatible server for the variable-length audio batching fix")]
#[command(version)]
struct Args {
    /// Directory with audio files (wav/mp3/flac)
    #[arg(long, value_name = "DIR")]
    audio_dir: Option<PathBuf>,

    /// Use synthetic audio instead of real speech
    #[arg(long)]
    use_synthetic: bool,

    /// Inference server base URL
    #[arg(long, default_value = DEFAULT_SERVER_URL, env = "PROBE_VLLM_URL")]
    vllm_url: String,

    /// Model identifier sent with each request
    #[arg(long, default_value = DEFAULT_MODEL, env = "PROBE_MODEL")]
    model: String,

    /// API key (vLLM accepts any value unless configured otherwise)
    #[arg(long, default_value = "dummy", env = "PROBE_API_KEY")]
    api_key: String,

    /// Completion token budget per request
    #[arg(long, default_value_t = 256)]
    max_tokens: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    println!("\n{}", "#".repeat(60));
    println!("# Variable-Length Audio Batching Probe");
    println!("{}", "#".repeat(60));

    info!("Server: {}", args.vllm_url);
    info!("Model: {}", args.model);

    let source = if let Some(dir) = args.audio_dir.as_deref() {
        SampleSource::Directory(dir)
    } else if args.use_synthetic {
        SampleSource::Synthetic
    } else {
        SampleSource::Dataset
    };

    // Fatal before any network request to the server; an empty audio
    // directory exits here with status 1.
    let pool = samples::acquire(source)
        .await
        .context("Failed to build sample pool")?;

    let client = ProbeClient::new(&args.vllm_url, args.model, args.api_key, args.max_tokens)
        .context("Failed to create probe client")?;

    let results = scenarios::run_battery(&client, &pool).await;

    if !scenarios::print_summary(&results) {
        std::process::exit(1);
    }

    Ok(())
}
