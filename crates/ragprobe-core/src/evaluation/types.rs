//! Data model of a regression run.
//!
//! Inputs ([`EvalCase`], [`PromptVariant`]) are immutable for the length of a
//! run. [`QueryResult`] is what the injected capability returns for one call.
//! [`CaseRecord`] is the persisted, write-once log line, and [`RunSummary`] is
//! the value handed back to the caller.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

// ============================================================================
// Inputs
// ============================================================================

/// One question of the evaluation dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalCase {
    /// Stable identifier, copied into every record as `question_id`.
    pub id: String,
    /// Raw question text before any prompt variant is applied.
    pub question: String,
}

impl EvalCase {
    pub fn new(id: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            question: question.into(),
        }
    }
}

/// A named prompt transformation applied to every case of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptVariant {
    /// Unique within a run; keys the per-variant metrics.
    pub name: String,
    /// Instruction placed before the question. Empty means "send as-is".
    #[serde(default)]
    pub prompt_prefix: String,
}

impl PromptVariant {
    pub fn new(name: impl Into<String>, prompt_prefix: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prompt_prefix: prompt_prefix.into(),
        }
    }
}

// ============================================================================
// Query capability output
// ============================================================================

/// Response of the query capability for one prompted question.
///
/// Citations are opaque; only their count matters to the harness.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub answer: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub citations: Vec<Value>,
    #[serde(default, deserialize_with = "coerce_latency")]
    pub latency_ms: u64,
}

impl QueryResult {
    pub fn new(answer: impl Into<String>, citations: Vec<Value>, latency_ms: u64) -> Self {
        Self {
            answer: answer.into(),
            citations,
            latency_ms,
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn coerce_latency<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(latency_from_value(&value))
}

/// Coerces a loosely typed latency into non-negative whole milliseconds.
///
/// Floats truncate, negatives clamp to 0, numeric strings are parsed and
/// anything else (null, objects, garbage) becomes 0.
pub fn latency_from_value(value: &Value) -> u64 {
    match value {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                v
            } else if n.is_i64() {
                0
            } else {
                n.as_f64().map(latency_from_f64).unwrap_or(0)
            }
        }
        Value::String(s) => {
            let s = s.trim();
            if let Ok(v) = s.parse::<u64>() {
                v
            } else {
                s.parse::<f64>().map(latency_from_f64).unwrap_or(0)
            }
        }
        Value::Bool(b) => u64::from(*b),
        _ => 0,
    }
}

fn latency_from_f64(v: f64) -> u64 {
    if v.is_finite() && v > 0.0 {
        v.trunc() as u64
    } else {
        0
    }
}

// ============================================================================
// Outputs
// ============================================================================

/// One line of the run log. Written once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub run_id: String,
    pub variant: String,
    pub question_id: String,
    pub question: String,
    pub prompted_question: String,
    pub answer: String,
    pub num_citations: usize,
    pub citation_coverage: bool,
    pub refusal: bool,
    pub hallucination: bool,
    pub latency_ms: u64,
    pub timestamp: String,
}

/// Aggregate over the cases of one variant, or over the whole run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariantMetrics {
    pub total_cases: usize,
    pub citation_coverage_rate: f64,
    pub refusal_rate: f64,
    pub hallucination_rate: f64,
    pub latency_p50_ms: u64,
    pub latency_p95_ms: u64,
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: String,
    /// UTC start time, second precision; shared by every record.
    pub created_at: String,
    /// Path of the JSONL run log.
    pub output_file: String,
    pub variants: BTreeMap<String, VariantMetrics>,
    pub overall: VariantMetrics,
}

/// Progress of a run, reported after each record is flushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunProgress {
    /// Records written so far (including the one just flushed)
    pub cases_completed: usize,
    /// Records the run will write if it completes
    pub cases_total: usize,
    /// Zero-based index of the variant being evaluated
    pub variant_index: usize,
}

impl RunProgress {
    /// Returns the completion percentage (0.0 to 100.0).
    pub fn percent_complete(&self) -> f64 {
        if self.cases_total == 0 {
            0.0
        } else {
            (self.cases_completed as f64 / self.cases_total as f64) * 100.0
        }
    }

    /// Returns true once every case of every variant is recorded.
    pub fn is_complete(&self) -> bool {
        self.cases_completed >= self.cases_total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_result_defaults_missing_fields() {
        let result: QueryResult = serde_json::from_value(json!({})).unwrap();
        assert_eq!(result.answer, "");
        assert!(result.citations.is_empty());
        assert_eq!(result.latency_ms, 0);
    }

    #[test]
    fn test_query_result_null_fields() {
        let result: QueryResult =
            serde_json::from_value(json!({"answer": null, "citations": null, "latency_ms": null}))
                .unwrap();
        assert_eq!(result.answer, "");
        assert!(result.citations.is_empty());
        assert_eq!(result.latency_ms, 0);
    }

    #[test]
    fn test_latency_coercion() {
        assert_eq!(latency_from_value(&json!(12)), 12);
        assert_eq!(latency_from_value(&json!(12.9)), 12);
        assert_eq!(latency_from_value(&json!(-4)), 0);
        assert_eq!(latency_from_value(&json!(-4.5)), 0);
        assert_eq!(latency_from_value(&json!("34")), 34);
        assert_eq!(latency_from_value(&json!(" 7.2 ")), 7);
        assert_eq!(latency_from_value(&json!("fast")), 0);
        assert_eq!(latency_from_value(&json!({"ms": 3})), 0);
        assert_eq!(latency_from_value(&Value::Null), 0);
    }

    #[test]
    fn test_variant_prefix_defaults_empty() {
        let variant: PromptVariant = serde_json::from_value(json!({"name": "base"})).unwrap();
        assert_eq!(variant.prompt_prefix, "");
    }

    #[test]
    fn test_case_record_field_order() {
        let record = CaseRecord {
            run_id: "r".into(),
            variant: "base".into(),
            question_id: "q1".into(),
            question: "Q?".into(),
            prompted_question: "Q?".into(),
            answer: "A".into(),
            num_citations: 1,
            citation_coverage: true,
            refusal: false,
            hallucination: false,
            latency_ms: 5,
            timestamp: "2024-01-01T00:00:00Z".into(),
        };
        let line = serde_json::to_string(&record).unwrap();
        assert!(line.starts_with(r#"{"run_id":"r","variant":"base","question_id":"q1""#));
        assert!(line.ends_with(r#""latency_ms":5,"timestamp":"2024-01-01T00:00:00Z"}"#));
    }

    #[test]
    fn test_run_progress() {
        let progress = RunProgress {
            cases_completed: 3,
            cases_total: 6,
            variant_index: 0,
        };
        assert!((progress.percent_complete() - 50.0).abs() < 0.01);
        assert!(!progress.is_complete());

        let empty = RunProgress {
            cases_completed: 0,
            cases_total: 0,
            variant_index: 0,
        };
        assert!((empty.percent_complete() - 0.0).abs() < 0.01);
    }
}
