//! Built-in dataset and prompt variants.
//!
//! These are read at call time and never mutated by a run.

use crate::evaluation::types::{EvalCase, PromptVariant};
use once_cell::sync::Lazy;

/// Three support questions used when the caller supplies no dataset.
pub static DEFAULT_DATASET: Lazy<Vec<EvalCase>> = Lazy::new(|| {
    vec![
        EvalCase::new("refund_1", "What is the refund policy?"),
        EvalCase::new("ship_1", "How long does shipping take?"),
        EvalCase::new("support_1", "What are the support hours?"),
    ]
});

/// Variants used when the caller supplies none: raw, grounded and concise.
pub static DEFAULT_VARIANTS: Lazy<Vec<PromptVariant>> = Lazy::new(|| {
    vec![
        PromptVariant::new("base", ""),
        PromptVariant::new(
            "grounded",
            "Answer using only the provided documents and cite sources.",
        ),
        PromptVariant::new(
            "concise",
            "Provide a concise, factual answer based on the documents.",
        ),
    ]
});

/// Returns an owned copy of the default dataset.
pub fn default_dataset() -> Vec<EvalCase> {
    DEFAULT_DATASET.clone()
}

/// Returns an owned copy of the default variants.
pub fn default_variants() -> Vec<PromptVariant> {
    DEFAULT_VARIANTS.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_dataset_ids() {
        let ids: Vec<String> = default_dataset().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["refund_1", "ship_1", "support_1"]);
    }

    #[test]
    fn test_default_variant_names_unique() {
        let variants = default_variants();
        let names: HashSet<&str> = variants.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names.len(), variants.len());
        assert_eq!(variants[0].name, "base");
        assert!(variants[0].prompt_prefix.is_empty());
    }
}
