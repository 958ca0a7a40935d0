//! Regression evaluation of answer quality across prompt variants.
//!
//! This module runs a fixed dataset of questions through an injected
//! answer-producing capability under several prompt variants, classifies each
//! answer and aggregates the results.
//!
//! # Overview
//!
//! | Component | Module | Role |
//! |-----------|--------|------|
//! | Classifier | [`classify`] | coverage / refusal / hallucination per answer |
//! | Statistics | [`stats`] | rates and nearest-rank latency percentiles |
//! | Run Engine | [`engine`] | drives the `variants x dataset` matrix |
//! | Artifact Writer | [`artifact`] | append-only JSONL run log |
//! | Inputs | [`datasets`] | default and file-loaded cases and variants |
//! | Capability | [`query`] | the [`QueryBackend`] seam and a fixture backend |
//!
//! # Example
//!
//! ```no_run
//! use ragprobe_core::error::QueryError;
//! use ragprobe_core::evaluation::{run_regression, QueryResult, RunOptions};
//!
//! let mut backend = |question: &str, _top_k: usize| -> Result<QueryResult, QueryError> {
//!     Ok(QueryResult::new(format!("You asked: {}", question), Vec::new(), 5))
//! };
//!
//! let summary = run_regression(&mut backend, RunOptions::new().with_top_k(2))?;
//! println!("hallucination rate: {}", summary.overall.hallucination_rate);
//! # Ok::<(), ragprobe_core::error::EvalError>(())
//! ```
//!
//! # Metrics Reference
//!
//! | Metric | Description |
//! |--------|-------------|
//! | citation_coverage_rate | Fraction of answers with at least one citation |
//! | refusal_rate | Fraction of answers matching a refusal phrase |
//! | hallucination_rate | Fraction of uncited, non-refusal answers |
//! | latency_p50_ms / p95_ms | Nearest-rank latency percentiles |

pub mod artifact;
pub mod classify;
pub mod datasets;
pub mod engine;
pub mod query;
pub mod stats;
pub mod types;

// Re-export commonly used types and functions
pub use artifact::{artifact_path, read_records, ArtifactWriter};
pub use classify::{classify, is_hallucination, is_refusal, CaseClassification, REFUSAL_PHRASES};
pub use datasets::{default_dataset, default_variants, load_cases, load_variants};
pub use engine::{
    apply_prompt, new_run_id, run_regression, run_regression_with_progress, RunOptions,
};
pub use query::{FixtureBackend, FixtureResponse, QueryBackend};
pub use stats::{nearest_rank_percentile, rate, CaseCounts};
pub use types::{
    CaseRecord, EvalCase, PromptVariant, QueryResult, RunProgress, RunSummary, VariantMetrics,
};
