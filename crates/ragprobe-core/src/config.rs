//! Run configuration constants.
//!
//! These values define the defaults of a regression run and the layout of its
//! artifacts. The CLI and the tests share them so that output paths and
//! metric precision stay consistent.
//!
//! # Usage
//!
//! ```
//! use ragprobe_core::config::{ARTIFACT_FILE_PREFIX, DEFAULT_TOP_K};
//!
//! assert_eq!(DEFAULT_TOP_K, 3);
//! assert_eq!(ARTIFACT_FILE_PREFIX, "regression_");
//! ```

use std::path::PathBuf;

// =============================================================================
// Query Defaults
// =============================================================================

/// Number of retrieved passages requested from the query capability.
pub const DEFAULT_TOP_K: usize = 3;

// =============================================================================
// Metrics
// =============================================================================

/// Percentile reported as the median latency.
pub const LATENCY_P50: f64 = 0.50;

/// Percentile reported as the tail latency.
pub const LATENCY_P95: f64 = 0.95;

/// Decimal places kept on coverage, refusal and hallucination rates.
pub const RATE_DECIMAL_PLACES: i32 = 4;

// =============================================================================
// Artifacts
// =============================================================================

/// File name prefix of a run log; the run id follows it.
pub const ARTIFACT_FILE_PREFIX: &str = "regression_";

/// File extension of a run log (one JSON object per line).
pub const ARTIFACT_FILE_EXTENSION: &str = "jsonl";

/// Artifact directory relative to the project root.
pub const ARTIFACT_SUBDIR: &str = "artifacts/eval_runs";

/// Environment variable overriding the artifact directory.
pub const ARTIFACT_DIR_ENV: &str = "RAGPROBE_ARTIFACT_DIR";

/// Timestamp format for `created_at` and record timestamps (UTC, seconds).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Resolves the default artifact directory.
///
/// Search order:
/// 1. `$RAGPROBE_ARTIFACT_DIR` environment variable
/// 2. `artifacts/eval_runs` under the workspace root
///
/// The directory is not created here; the run creates it on start.
pub fn default_artifact_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(ARTIFACT_DIR_ENV) {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }

    // CARGO_MANIFEST_DIR points to crates/ragprobe-core
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .map(|root| root.join(ARTIFACT_SUBDIR))
        .unwrap_or_else(|| PathBuf::from(ARTIFACT_SUBDIR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_levels_in_range() {
        let levels = [LATENCY_P50, LATENCY_P95];
        for p in levels {
            assert!(p > 0.0 && p <= 1.0, "percentile {} out of (0, 1]", p);
        }
    }

    #[test]
    fn test_default_artifact_dir_ends_with_subdir() {
        if std::env::var(ARTIFACT_DIR_ENV).is_ok() {
            return;
        }
        let dir = default_artifact_dir();
        assert!(dir.ends_with("artifacts/eval_runs"), "got {}", dir.display());
    }
}
