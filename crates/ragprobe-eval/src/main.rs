//! ragprobe Evaluation Tool
//!
//! Runs the regression matrix (prompt variants x questions) against a
//! fixture-backed answer source, writes the per-case JSONL log and prints the
//! aggregated summary.
//!
//! # Usage
//!
//! ```bash
//! # Default dataset and variants, canned answers from fixtures
//! cargo run -p ragprobe-eval -- --fixtures fixtures.jsonl
//!
//! # Custom inputs, fixed run id, JSON summary
//! cargo run -p ragprobe-eval -- --fixtures fixtures.jsonl \
//!     --dataset cases.jsonl --variants variants.json --run-id nightly --json
//! ```
//!
//! # Fixture Format
//!
//! ```text
//! {"contains": "refund", "answer": "Refunds within 30 days.", "citations": [{"source": "refunds.md"}], "latency_ms": 12}
//! {"contains": "*", "answer": "I couldn't find an answer in the documents."}
//! ```

mod datasets;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use datasets::{load_backend, load_inputs};
use indicatif::{ProgressBar, ProgressStyle};
use ragprobe_core::config::{ARTIFACT_DIR_ENV, DEFAULT_TOP_K};
use ragprobe_core::evaluation::{run_regression_with_progress, RunOptions, RunProgress};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

// =============================================================================
// CLI
// =============================================================================

#[derive(Parser, Debug)]
#[command(name = "ragprobe-eval", version)]
#[command(about = "Score answer quality across prompt variants")]
struct Args {
    /// JSONL file of canned responses answering the questions
    #[arg(long)]
    fixtures: PathBuf,

    /// Dataset file (JSON array or JSONL of {id, question})
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Prompt variants file (JSON array or JSONL of {name, prompt_prefix})
    #[arg(long)]
    variants: Option<PathBuf>,

    /// Passages requested per question
    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    top_k: usize,

    /// Run identifier (default: random)
    #[arg(long)]
    run_id: Option<String>,

    /// Directory for run logs
    #[arg(long, env = ARTIFACT_DIR_ENV)]
    artifact_dir: Option<PathBuf>,

    /// Output the summary as JSON
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn run_options(&self) -> RunOptions {
        let mut options = RunOptions::new().with_top_k(self.top_k);
        if let Some(run_id) = &self.run_id {
            options = options.with_run_id(run_id.clone());
        }
        if let Some(dir) = &self.artifact_dir {
            options = options.with_artifact_dir(dir.clone());
        }
        options
    }
}

/// Progress bar message: the variant being scored and overall completion.
fn progress_message(progress: &RunProgress) -> String {
    if progress.is_complete() {
        return "Done".to_string();
    }
    format!(
        "Variant {} ({:.0}%)",
        progress.variant_index + 1,
        progress.percent_complete()
    )
}

// =============================================================================
// Main
// =============================================================================

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let inputs = load_inputs(args.dataset.as_deref(), args.variants.as_deref())?;
    let mut backend = load_backend(&args.fixtures)?;
    info!(
        fixtures = backend.len(),
        cases = inputs.dataset.len(),
        variants = inputs.variants.len(),
        "Loaded evaluation inputs"
    );

    let pb = if args.json {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(inputs.num_queries() as u64)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40}] {pos}/{len}")
            .context("Invalid progress template")?,
    );
    pb.set_message("Cases");

    let options = args
        .run_options()
        .with_dataset(inputs.dataset.clone())
        .with_variants(inputs.variants.clone());

    let summary = run_regression_with_progress(&mut backend, options, |progress| {
        pb.set_position(progress.cases_completed as u64);
        pb.set_message(progress_message(progress));
    })
    .context("Regression run failed")?;
    pb.finish_and_clear();

    if args.json {
        println!("{}", output::format_json(&summary));
    } else {
        println!("{}", output::format_human(&summary, &inputs.source));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_minimal() {
        let args = Args::try_parse_from(["ragprobe-eval", "--fixtures", "f.jsonl"]).unwrap();
        assert_eq!(args.top_k, DEFAULT_TOP_K);
        assert!(args.run_id.is_none());
        assert!(!args.json);

        let options = args.run_options();
        assert_eq!(options.top_k, Some(DEFAULT_TOP_K));
        assert!(options.dataset.is_none());
    }

    #[test]
    fn test_args_full() {
        let args = Args::try_parse_from([
            "ragprobe-eval",
            "--fixtures",
            "f.jsonl",
            "--top-k",
            "5",
            "--run-id",
            "nightly",
            "--artifact-dir",
            "/tmp/runs",
            "--json",
        ])
        .unwrap();

        let options = args.run_options();
        assert_eq!(options.top_k, Some(5));
        assert_eq!(options.run_id.as_deref(), Some("nightly"));
        assert_eq!(options.artifact_dir, Some(PathBuf::from("/tmp/runs")));
    }

    #[test]
    fn test_progress_message() {
        let progress = RunProgress {
            cases_completed: 3,
            cases_total: 12,
            variant_index: 1,
        };
        assert_eq!(progress_message(&progress), "Variant 2 (25%)");

        let done = RunProgress {
            cases_completed: 12,
            cases_total: 12,
            variant_index: 3,
        };
        assert_eq!(progress_message(&done), "Done");
    }

    #[test]
    fn test_fixtures_required() {
        assert!(Args::try_parse_from(["ragprobe-eval"]).is_err());
    }
}
