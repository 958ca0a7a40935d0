//! Regression run engine.
//!
//! A run walks the `variants x dataset` matrix sequentially, variant-major:
//!
//! 1. Open `regression_<run_id>.jsonl` under the artifact directory
//! 2. For each variant, for each case: prompt, query, classify, count, append
//! 3. Finalize per-variant metrics after each variant's cases
//! 4. Finalize overall metrics from run-wide counters and the full latency
//!    sample (not an average of per-variant percentiles)
//!
//! Query failures abort the run immediately. Nothing is retried and no case is
//! recorded as "failed"; the records flushed before the failure stay on disk.

use super::artifact::ArtifactWriter;
use super::classify::classify;
use super::datasets::{default_dataset, default_variants};
use super::query::QueryBackend;
use super::stats::CaseCounts;
use super::types::{CaseRecord, EvalCase, PromptVariant, RunProgress, RunSummary};
use crate::config::{default_artifact_dir, DEFAULT_TOP_K, TIMESTAMP_FORMAT};
use crate::error::EvalError;
use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Optional inputs of a run. Unset fields fall back to the built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Cases to evaluate; `None` or empty uses the default dataset
    pub dataset: Option<Vec<EvalCase>>,
    /// Variants to evaluate; `None` or empty uses the default variants
    pub variants: Option<Vec<PromptVariant>>,
    /// Passed through to every query; defaults to [`DEFAULT_TOP_K`]
    pub top_k: Option<usize>,
    /// Correlation key and file name component; defaults to a random id
    pub run_id: Option<String>,
    /// Output directory, created if missing; defaults to
    /// [`default_artifact_dir`]
    pub artifact_dir: Option<PathBuf>,
}

impl RunOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dataset(mut self, dataset: Vec<EvalCase>) -> Self {
        self.dataset = Some(dataset);
        self
    }

    pub fn with_variants(mut self, variants: Vec<PromptVariant>) -> Self {
        self.variants = Some(variants);
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = Some(top_k);
        self
    }

    pub fn with_run_id(mut self, run_id: impl Into<String>) -> Self {
        self.run_id = Some(run_id.into());
        self
    }

    pub fn with_artifact_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifact_dir = Some(dir.into());
        self
    }
}

/// Generates a fresh run id: a random 128-bit value as 32 hex characters.
pub fn new_run_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Builds the question sent to the backend for one variant.
///
/// An empty (after trimming) prefix leaves the question unchanged; otherwise
/// the trimmed prefix, a blank line and `Question: <question>` are joined.
pub fn apply_prompt(prompt_prefix: &str, question: &str) -> String {
    let prefix = prompt_prefix.trim();
    if prefix.is_empty() {
        return question.to_string();
    }
    format!("{}\n\nQuestion: {}", prefix, question)
}

/// Runs the regression matrix and returns its summary.
///
/// See [`run_regression_with_progress`] for details.
pub fn run_regression<B>(backend: &mut B, options: RunOptions) -> Result<RunSummary, EvalError>
where
    B: QueryBackend + ?Sized,
{
    run_regression_with_progress(backend, options, |_| {})
}

/// Runs the regression matrix, reporting progress after every flushed record.
///
/// # Errors
///
/// - [`EvalError::DuplicateVariant`] before any file is created
/// - [`EvalError::Io`] if the artifact directory or log cannot be written
/// - [`EvalError::Query`] from the first failing backend call; the log keeps
///   the records written before it
#[instrument(skip_all)]
pub fn run_regression_with_progress<B, P>(
    backend: &mut B,
    options: RunOptions,
    mut on_case: P,
) -> Result<RunSummary, EvalError>
where
    B: QueryBackend + ?Sized,
    P: FnMut(&RunProgress),
{
    let run_id = options
        .run_id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(new_run_id);
    let dataset = options
        .dataset
        .filter(|d| !d.is_empty())
        .unwrap_or_else(default_dataset);
    let variants = options
        .variants
        .filter(|v| !v.is_empty())
        .unwrap_or_else(default_variants);
    let top_k = options.top_k.unwrap_or(DEFAULT_TOP_K);
    let artifact_dir = options.artifact_dir.unwrap_or_else(default_artifact_dir);

    let mut seen = HashSet::new();
    for variant in &variants {
        if !seen.insert(variant.name.as_str()) {
            return Err(EvalError::DuplicateVariant(variant.name.clone()));
        }
    }

    let created_at = chrono::Utc::now().format(TIMESTAMP_FORMAT).to_string();
    let mut writer = ArtifactWriter::create(&artifact_dir, &run_id)?;
    let output_file = writer.path().display().to_string();

    info!(
        run_id = %run_id,
        cases = dataset.len(),
        variants = variants.len(),
        top_k,
        output = %output_file,
        "Starting regression eval"
    );

    let cases_total = dataset.len() * variants.len();
    let mut variant_metrics = BTreeMap::new();
    let mut overall = CaseCounts::new();

    for (variant_index, variant) in variants.iter().enumerate() {
        info!(variant = %variant.name, "Evaluating variant");
        let mut counts = CaseCounts::new();

        for case in &dataset {
            let prompted_question = apply_prompt(&variant.prompt_prefix, &case.question);
            let result = backend.query(&prompted_question, top_k).map_err(|source| {
                EvalError::Query {
                    variant: variant.name.clone(),
                    question_id: case.id.clone(),
                    source,
                }
            })?;

            let classification = classify(&result.answer, &result.citations);
            counts.record(classification, result.latency_ms);
            overall.record(classification, result.latency_ms);

            let record = CaseRecord {
                run_id: run_id.clone(),
                variant: variant.name.clone(),
                question_id: case.id.clone(),
                question: case.question.clone(),
                prompted_question,
                answer: result.answer,
                num_citations: result.citations.len(),
                citation_coverage: classification.citation_coverage,
                refusal: classification.refusal,
                hallucination: classification.hallucination,
                latency_ms: result.latency_ms,
                timestamp: created_at.clone(),
            };
            writer.append(&record)?;

            debug!(
                variant = %variant.name,
                question_id = %case.id,
                latency_ms = record.latency_ms,
                refusal = record.refusal,
                hallucination = record.hallucination,
                "Recorded case"
            );

            on_case(&RunProgress {
                cases_completed: writer.records_written(),
                cases_total,
                variant_index,
            });
        }

        let metrics = counts.finalize();
        info!(
            variant = %variant.name,
            coverage = metrics.citation_coverage_rate,
            refusal = metrics.refusal_rate,
            hallucination = metrics.hallucination_rate,
            p50_ms = metrics.latency_p50_ms,
            p95_ms = metrics.latency_p95_ms,
            "Variant complete"
        );
        variant_metrics.insert(variant.name.clone(), metrics);
    }

    let summary = RunSummary {
        run_id,
        created_at,
        output_file,
        variants: variant_metrics,
        overall: overall.finalize(),
    };

    info!(
        run_id = %summary.run_id,
        records = writer.records_written(),
        "Completed regression eval"
    );
    Ok(summary)
}
