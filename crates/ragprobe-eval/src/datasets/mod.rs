//! Input loading for the CLI.
//!
//! Cases and variants come from optional files; anything not supplied falls
//! back to the core's built-in defaults. Fixtures are required since the CLI
//! has no live retrieval service to query.

use anyhow::{Context, Result};
use ragprobe_core::evaluation::{
    default_dataset, default_variants, load_cases, load_variants, EvalCase, FixtureBackend,
    PromptVariant,
};
use std::path::Path;
use tracing::warn;

/// A resolved set of run inputs.
#[derive(Debug)]
pub struct EvalInputs {
    /// Where the cases came from, for reporting
    pub source: String,
    pub dataset: Vec<EvalCase>,
    pub variants: Vec<PromptVariant>,
}

impl EvalInputs {
    /// Number of backend calls a complete run makes.
    pub fn num_queries(&self) -> usize {
        self.dataset.len() * self.variants.len()
    }
}

/// Loads cases and variants, substituting defaults for missing paths.
///
/// A file that parses to an empty list is treated like a missing path, the
/// same way the run engine treats an empty list, so the reported source and
/// query count match what actually runs.
pub fn load_inputs(dataset: Option<&Path>, variants: Option<&Path>) -> Result<EvalInputs> {
    let (source, dataset) = match dataset {
        Some(path) => {
            let cases = load_cases(path)
                .with_context(|| format!("Failed to load dataset: {}", path.display()))?;
            if cases.is_empty() {
                warn!(path = %path.display(), "Dataset is empty, using built-in cases");
                (
                    format!("built-in ({} is empty)", path.display()),
                    default_dataset(),
                )
            } else {
                (path.display().to_string(), cases)
            }
        }
        None => ("built-in".to_string(), default_dataset()),
    };

    let variants = match variants {
        Some(path) => {
            let loaded = load_variants(path)
                .with_context(|| format!("Failed to load variants: {}", path.display()))?;
            if loaded.is_empty() {
                warn!(path = %path.display(), "Variants file is empty, using built-in variants");
                default_variants()
            } else {
                loaded
            }
        }
        None => default_variants(),
    };

    Ok(EvalInputs {
        source,
        dataset,
        variants,
    })
}

/// Loads the fixture backend used to answer questions.
pub fn load_backend(fixtures: &Path) -> Result<FixtureBackend> {
    FixtureBackend::from_jsonl(fixtures)
        .with_context(|| format!("Failed to load fixtures: {}", fixtures.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_paths() {
        let inputs = load_inputs(None, None).unwrap();
        assert_eq!(inputs.source, "built-in");
        assert_eq!(inputs.num_queries(), 9);
    }

    #[test]
    fn test_custom_dataset() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cases.json");
        std::fs::write(&path, r#"[{"id": "q1", "question": "Is there a warranty?"}]"#).unwrap();

        let inputs = load_inputs(Some(&path), None).unwrap();
        assert_eq!(inputs.dataset.len(), 1);
        assert_eq!(inputs.num_queries(), 3);
    }

    #[test]
    fn test_empty_files_resolve_to_defaults() {
        let dir = TempDir::new().unwrap();
        let cases = dir.path().join("cases.json");
        let variants = dir.path().join("variants.jsonl");
        std::fs::write(&cases, "[]").unwrap();
        std::fs::write(&variants, "").unwrap();

        let inputs = load_inputs(Some(&cases), Some(&variants)).unwrap();
        assert!(inputs.source.starts_with("built-in"));
        assert_eq!(inputs.dataset, default_dataset());
        assert_eq!(inputs.variants, default_variants());
        assert_eq!(inputs.num_queries(), 9);
    }

    #[test]
    fn test_bundled_sample_inputs() {
        let data_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data");
        let backend = load_backend(&data_dir.join("fixtures.jsonl")).unwrap();
        assert_eq!(backend.len(), 2);

        let inputs = load_inputs(None, Some(&data_dir.join("variants.json"))).unwrap();
        assert_eq!(inputs.variants.len(), 3);
    }

    #[test]
    fn test_missing_fixtures_has_context() {
        let dir = TempDir::new().unwrap();
        let err = load_backend(&dir.path().join("fixtures.jsonl")).unwrap_err();
        assert!(err.to_string().contains("Failed to load fixtures"));
    }
}
