//! Output formatting for run summaries.
//!
//! Supports both a human-readable table and JSON for scripting. The JSON form
//! is the summary object itself, so it can be fed to other tools unchanged.

use ragprobe_core::evaluation::{RunSummary, VariantMetrics};

/// Formats a run summary as pretty JSON.
pub fn format_json(summary: &RunSummary) -> String {
    serde_json::to_string_pretty(summary).unwrap_or_else(|_| "{}".to_string())
}

/// Formats a run summary for the terminal.
pub fn format_human(summary: &RunSummary, dataset_source: &str) -> String {
    let mut output = String::new();
    let rule = "=".repeat(80);

    output.push_str(&format!("\n{}\n", rule));
    output.push_str("RAGPROBE REGRESSION EVALUATION\n");
    output.push_str(&format!("{}\n", rule));
    output.push_str(&format!("\nRun:     {}\n", summary.run_id));
    output.push_str(&format!("Started: {}\n", summary.created_at));
    output.push_str(&format!("Dataset: {}\n", dataset_source));
    output.push_str(&format!("Log:     {}\n", summary.output_file));

    output.push_str(&format!("\n{}\n", "-".repeat(70)));
    output.push_str(&format!(
        "{:<12} {:>6} {:>9} {:>9} {:>9} {:>8} {:>8}\n",
        "Variant", "Cases", "Coverage", "Refusal", "Halluc", "p50 ms", "p95 ms"
    ));
    for (name, metrics) in &summary.variants {
        output.push_str(&metrics_row(name, metrics));
    }
    output.push_str(&format!("{}\n", "-".repeat(70)));
    output.push_str(&metrics_row("overall", &summary.overall));
    output.push_str(&rule);

    output
}

fn metrics_row(name: &str, m: &VariantMetrics) -> String {
    format!(
        "{:<12} {:>6} {:>9.4} {:>9.4} {:>9.4} {:>8} {:>8}\n",
        truncate_name(name, 12),
        m.total_cases,
        m.citation_coverage_rate,
        m.refusal_rate,
        m.hallucination_rate,
        m.latency_p50_ms,
        m.latency_p95_ms
    )
}

/// Shortens a variant name to fit its column, marking the cut with `~`.
fn truncate_name(name: &str, max_chars: usize) -> String {
    if name.chars().count() <= max_chars {
        return name.to_string();
    }
    let kept: String = name.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}~", kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn make_summary() -> RunSummary {
        let metrics = VariantMetrics {
            total_cases: 2,
            citation_coverage_rate: 0.5,
            refusal_rate: 0.5,
            hallucination_rate: 0.0,
            latency_p50_ms: 12,
            latency_p95_ms: 34,
        };
        let mut variants = BTreeMap::new();
        variants.insert("base".to_string(), metrics.clone());
        variants.insert("grounded".to_string(), metrics.clone());

        RunSummary {
            run_id: "test-run".to_string(),
            created_at: "2024-05-01T12:00:00Z".to_string(),
            output_file: "/tmp/regression_test-run.jsonl".to_string(),
            variants,
            overall: VariantMetrics {
                total_cases: 4,
                ..metrics
            },
        }
    }

    #[test]
    fn test_format_json() {
        let output = format_json(&make_summary());
        assert!(output.contains("\"run_id\": \"test-run\""));
        assert!(output.contains("\"output_file\": \"/tmp/regression_test-run.jsonl\""));
        assert!(output.contains("\"citation_coverage_rate\": 0.5"));
        assert!(output.contains("\"latency_p95_ms\": 34"));
    }

    #[test]
    fn test_format_human() {
        let output = format_human(&make_summary(), "built-in");
        assert!(output.contains("test-run"));
        assert!(output.contains("grounded"));
        assert!(output.contains("overall"));
        assert!(output.contains("0.5000"));
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("base", 12), "base");
        assert_eq!(truncate_name("a-very-long-variant", 8), "a-very-~");
    }
}
