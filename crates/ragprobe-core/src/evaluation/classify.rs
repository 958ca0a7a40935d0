//! Answer classification: citation coverage, refusal and hallucination.
//!
//! All three properties are decided from the answer text and the citation
//! list alone. The policy is deliberately coarse:
//!
//! | Property | Rule |
//! |----------|------|
//! | Coverage | at least one citation |
//! | Refusal | lowercased answer contains a phrase from [`REFUSAL_PHRASES`] |
//! | Hallucination | not a refusal and no citations |
//!
//! Refusal and hallucination are therefore mutually exclusive. An answer that
//! carries any citation is never flagged as a hallucination, even when the
//! citation does not support it. Phrase matching is plain substring search, so
//! a refusal phrase embedded in unrelated text is a false positive.

use serde_json::Value;

/// Phrases that mark an answer as declining to answer (lowercase).
pub const REFUSAL_PHRASES: &[&str] = &[
    "i cannot",
    "i can't",
    "unable to",
    "i couldn\u{2019}t",
    "i couldn't",
    "no results",
    "not found in the documents",
    "could not find",
    "cannot find",
    "i do not have",
];

/// Returns true if the answer contains any refusal phrase (case-insensitive).
pub fn is_refusal(answer: &str) -> bool {
    let text = answer.to_lowercase();
    REFUSAL_PHRASES.iter().any(|phrase| text.contains(phrase))
}

/// Returns true if the answer is uncited and not a refusal.
pub fn is_hallucination(answer: &str, citations: &[Value]) -> bool {
    if is_refusal(answer) {
        return false;
    }
    citations.is_empty()
}

/// Returns true if the answer carries at least one citation.
pub fn has_citation_coverage(citations: &[Value]) -> bool {
    !citations.is_empty()
}

/// The boolean triple recorded for each case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CaseClassification {
    pub citation_coverage: bool,
    pub refusal: bool,
    pub hallucination: bool,
}

/// Classifies one answer.
pub fn classify(answer: &str, citations: &[Value]) -> CaseClassification {
    CaseClassification {
        citation_coverage: has_citation_coverage(citations),
        refusal: is_refusal(answer),
        hallucination: is_hallucination(answer, citations),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_refusal_phrases_case_insensitive() {
        assert!(is_refusal("I CANNOT answer that."));
        assert!(is_refusal("Sorry, I can't help."));
        assert!(is_refusal("The answer was not found in the documents."));
        assert!(is_refusal("I do not have that information"));
        assert!(!is_refusal("Refunds are available within 30 days."));
        assert!(!is_refusal(""));
    }

    #[test]
    fn test_refusal_apostrophe_variants() {
        assert!(is_refusal("I couldn't find an answer."));
        assert!(is_refusal("I couldn\u{2019}t find an answer in the documents."));
    }

    #[test]
    fn test_refusal_substring_false_positive() {
        // Known limitation: no tokenization
        assert!(is_refusal("The pump was unable to start, so we replaced it."));
    }

    #[test]
    fn test_hallucination_requires_missing_citations() {
        assert!(is_hallucination("Unrelated made-up fact.", &[]));
        assert!(!is_hallucination(
            "Unrelated made-up fact.",
            &[json!({"source": "x"})]
        ));
    }

    #[test]
    fn test_refusal_is_never_hallucination() {
        assert!(!is_hallucination("I cannot find that.", &[]));
        let c = classify("I cannot find that.", &[]);
        assert!(c.refusal);
        assert!(!c.hallucination);
        assert!(!c.citation_coverage);
    }

    #[test]
    fn test_cited_fabrication_is_not_detected() {
        // Citation presence is the only hallucination signal
        let c = classify("The moon is made of cheese.", &[json!({"source": "x"})]);
        assert!(c.citation_coverage);
        assert!(!c.hallucination);
        assert!(!c.refusal);
    }

    #[test]
    fn test_refusal_with_citations() {
        let c = classify("No results matched.", &[json!({"source": "a"})]);
        assert!(c.refusal);
        assert!(c.citation_coverage);
        assert!(!c.hallucination);
    }
}
