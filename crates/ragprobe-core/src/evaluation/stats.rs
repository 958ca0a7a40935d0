//! Statistics for run aggregation.
//!
//! This module provides the total functions used to turn per-case outcomes
//! into [`VariantMetrics`]:
//! - Rates with a zero-total guard
//! - Nearest-rank latency percentiles
//! - A running [`CaseCounts`] accumulator for one variant or a whole run
//!
//! None of these functions fail: empty samples and zero totals yield `0`.

use super::classify::CaseClassification;
use super::types::VariantMetrics;
use crate::config::{LATENCY_P50, LATENCY_P95, RATE_DECIMAL_PLACES};

/// Returns `count / total`, or `0.0` when `total <= 0`.
pub fn rate(count: usize, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    count as f64 / total as f64
}

/// Nearest-rank percentile of integer samples.
///
/// Sorts ascending and returns the value at 1-indexed rank
/// `max(1, ceil(p * n))`. No interpolation: for `p = 0.5` over two samples the
/// lower one is returned.
///
/// # Arguments
///
/// * `values` - Latency samples in any order
/// * `percentile` - Fraction in `(0, 1]`, e.g. `0.95`
///
/// # Returns
///
/// A member of `values`, or `0` for an empty slice.
///
/// # Example
///
/// ```
/// use ragprobe_core::evaluation::stats::nearest_rank_percentile;
///
/// assert_eq!(nearest_rank_percentile(&[40, 10], 0.5), 10);
/// assert_eq!(nearest_rank_percentile(&[15, 20, 35, 40, 50], 0.95), 50);
/// assert_eq!(nearest_rank_percentile(&[], 0.5), 0);
/// ```
pub fn nearest_rank_percentile(values: &[u64], percentile: f64) -> u64 {
    if values.is_empty() {
        return 0;
    }

    let mut ordered = values.to_vec();
    ordered.sort_unstable();

    let n = ordered.len();
    let raw_rank = (percentile * n as f64).ceil();
    let rank = if raw_rank.is_finite() && raw_rank > 1.0 {
        (raw_rank as usize).min(n)
    } else {
        1
    };

    ordered[rank - 1]
}

/// Rounds to a fixed number of decimal places, ties to even.
///
/// Exact binary ties such as `1/32` at four places round to the even digit:
/// `0.03125` becomes `0.0312`.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}

/// Running counters for a set of classified cases.
#[derive(Debug, Clone, Default)]
pub struct CaseCounts {
    total: usize,
    coverage: usize,
    refusal: usize,
    hallucination: usize,
    latencies: Vec<u64>,
}

impl CaseCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one classified case and its latency.
    pub fn record(&mut self, classification: CaseClassification, latency_ms: u64) {
        self.total += 1;
        self.coverage += usize::from(classification.citation_coverage);
        self.refusal += usize::from(classification.refusal);
        self.hallucination += usize::from(classification.hallucination);
        self.latencies.push(latency_ms);
    }

    /// Computes rates and latency percentiles over everything recorded.
    pub fn finalize(&self) -> VariantMetrics {
        let total = self.total as i64;
        VariantMetrics {
            total_cases: self.total,
            citation_coverage_rate: round_to(rate(self.coverage, total), RATE_DECIMAL_PLACES),
            refusal_rate: round_to(rate(self.refusal, total), RATE_DECIMAL_PLACES),
            hallucination_rate: round_to(rate(self.hallucination, total), RATE_DECIMAL_PLACES),
            latency_p50_ms: nearest_rank_percentile(&self.latencies, LATENCY_P50),
            latency_p95_ms: nearest_rank_percentile(&self.latencies, LATENCY_P95),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
