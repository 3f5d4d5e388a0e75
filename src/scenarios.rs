//! Scenario battery
//!
//! Builds the fixed set of probe scenarios against the sample pool and runs
//! each one with concurrent fan-out: every request in a scenario is issued
//! without waiting, results gathered once all finish. The report goes to
//! stdout; the returned results drive the process exit code.

use futures::future::join_all;

use crate::audio::NamedClip;
use crate::client::{ProbeClient, RequestOutcome};

const BANNER_WIDTH: usize = 60;
const PREVIEW_CHARS: usize = 60;

/// Pass/fail of one named scenario.
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    pub name: &'static str,
    pub passed: bool,
}

/// Duplicate the first sample under two labels.
///
/// Two identical clips batch into identical feature shapes, so this scenario
/// isolates concurrency problems from shape problems.
pub fn same_length_pair(pool: &[NamedClip]) -> Vec<NamedClip> {
    let base = &pool[0];
    vec![
        NamedClip::new("same_1", base.clip.clone()),
        NamedClip::new("same_2", base.clip.clone()),
    ]
}

/// Pick the globally shortest and longest clip by playback duration.
///
/// Duration, not sample count: a pool mixing sample rates can have its longest
/// clip hold fewer samples than a shorter high-rate one.
pub fn variable_length_pair(pool: &[NamedClip]) -> Vec<NamedClip> {
    let shortest = pool
        .iter()
        .min_by(|a, b| a.clip.duration_secs().total_cmp(&b.clip.duration_secs()))
        .expect("pool is non-empty");
    let longest = pool
        .iter()
        .max_by(|a, b| a.clip.duration_secs().total_cmp(&b.clip.duration_secs()))
        .expect("pool is non-empty");
    vec![shortest.clone(), longest.clone()]
}

/// Run the full battery and return per-scenario results.
pub async fn run_battery(client: &ProbeClient, pool: &[NamedClip]) -> Vec<ScenarioResult> {
    let mut results = Vec::new();

    run_sequential(client, pool).await;
    results.push(ScenarioResult {
        name: "Sequential",
        passed: true,
    });

    let same = same_length_pair(pool);
    let passed = run_concurrent(client, &same, "Same-length concurrent").await;
    results.push(ScenarioResult {
        name: "Same-length concurrent",
        passed,
    });

    // The case the batching fix is for
    let varied = variable_length_pair(pool);
    let passed = run_concurrent(client, &varied, "CRITICAL: Variable-length concurrent").await;
    results.push(ScenarioResult {
        name: "Variable-length concurrent",
        passed,
    });

    if pool.len() >= 3 {
        let passed = run_concurrent(client, pool, "All samples concurrent").await;
        results.push(ScenarioResult {
            name: "All concurrent",
            passed,
        });
    }

    results
}

/// Baseline: first two samples, one at a time.
///
/// Recorded as passing regardless of the responses; it exists to warm the
/// server and show per-request behavior before anything is batched.
async fn run_sequential(client: &ProbeClient, pool: &[NamedClip]) {
    print_banner("TEST: Sequential requests (baseline)");

    for sample in pool.iter().take(2) {
        let outcome = client.transcribe(&sample.name, &sample.clip).await;
        let status = if outcome.success { "PASS" } else { "FAIL" };
        println!(
            "  {status} {}: {}",
            outcome.label,
            preview(&outcome.detail)
        );
    }
}

/// Run one concurrent scenario; true iff every request succeeded.
async fn run_concurrent(client: &ProbeClient, samples: &[NamedClip], test_name: &str) -> bool {
    print_banner(&format!("TEST: {test_name}"));

    for sample in samples {
        println!("  - {}: {:.2}s", sample.name, sample.clip.duration_secs());
    }

    println!("\nSending {} concurrent requests...", samples.len());

    let requests = samples
        .iter()
        .map(|sample| client.transcribe(&sample.name, &sample.clip));
    let outcomes = join_all(requests).await;

    println!("\nResults:");
    let mut all_ok = true;
    for outcome in &outcomes {
        print_outcome(outcome);
        all_ok &= outcome.success;
    }

    all_ok
}

/// Print the final summary. Returns true iff every scenario passed.
pub fn print_summary(results: &[ScenarioResult]) -> bool {
    print_banner("SUMMARY");

    let mut all_passed = true;
    for result in results {
        let status = if result.passed { "PASS" } else { "FAIL" };
        println!("  {status}: {}", result.name);
        all_passed &= result.passed;
    }

    if all_passed {
        println!("\nALL TESTS PASSED");
        println!("The variable-length audio batching fix is working correctly.");
    } else {
        println!("\nSOME TESTS FAILED");
        println!("An 'inconsistent shapes' error means the fix is NOT applied.");
    }

    all_passed
}

fn print_outcome(outcome: &RequestOutcome) {
    if outcome.success {
        println!(
            "  PASS {}: {} ({:.2}s)",
            outcome.label,
            preview(&outcome.detail),
            outcome.elapsed.as_secs_f64()
        );
    } else {
        println!("  FAIL {}: {}", outcome.label, outcome.detail);
    }
}

fn print_banner(title: &str) {
    println!("\n{}", "=".repeat(BANNER_WIDTH));
    println!("{title}");
    println!("{}", "=".repeat(BANNER_WIDTH));
}

fn preview(text: &str) -> String {
    if text.chars().count() > PREVIEW_CHARS {
        let truncated: String = text.chars().take(PREVIEW_CHARS).collect();
        format!("{truncated}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::synth::sine_clip;

    fn clip(name: &str, duration_secs: f64, rate: u32) -> NamedClip {
        NamedClip::new(name, sine_clip(duration_secs, rate))
    }

    #[test]
    fn same_length_pair_duplicates_first_sample() {
        let pool = vec![clip("a", 1.0, 16_000), clip("b", 2.0, 16_000)];
        let pair = same_length_pair(&pool);

        assert_eq!(pair.len(), 2);
        assert_eq!(pair[0].name, "same_1");
        assert_eq!(pair[1].name, "same_2");
        assert_eq!(pair[0].clip.samples.len(), pool[0].clip.samples.len());
        assert_eq!(pair[1].clip.samples.len(), pool[0].clip.samples.len());
    }

    #[test]
    fn variable_length_pair_picks_duration_extremes() {
        let pool = vec![
            clip("mid", 3.0, 16_000),
            clip("short", 1.5, 16_000),
            clip("long", 6.0, 16_000),
            clip("other", 2.5, 16_000),
        ];

        let pair = variable_length_pair(&pool);
        assert_eq!(pair[0].name, "short");
        assert_eq!(pair[1].name, "long");
    }

    #[test]
    fn extremes_use_duration_not_sample_count() {
        // "dense" has the most samples but a shorter duration than "sparse"
        let pool = vec![
            clip("dense", 2.0, 48_000), // 96,000 samples
            clip("sparse", 5.0, 8_000), // 40,000 samples
            clip("tiny", 1.0, 8_000),
        ];

        let pair = variable_length_pair(&pool);
        assert_eq!(pair[0].name, "tiny");
        assert_eq!(pair[1].name, "sparse");
    }

    #[test]
    fn preview_truncates_long_text_on_char_boundary() {
        let long = "é".repeat(100);
        let shown = preview(&long);
        assert!(shown.ends_with("..."));
        assert_eq!(shown.chars().count(), PREVIEW_CHARS + 3);

        let short = "hello";
        assert_eq!(preview(short), "hello");
    }
}
