//! Error types for ragprobe-core.
//!
//! This module defines the errors surfaced by a regression run: filesystem
//! failures on the artifact directory, serialization failures, failures raised
//! by the injected query capability, and invalid run configuration.

use thiserror::Error;

/// Error raised by a query capability.
///
/// The harness never inspects or retries these; they abort the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Query failed: {0}")]
pub struct QueryError(pub String);

impl QueryError {
    /// Creates a query error from any displayable message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<String> for QueryError {
    fn from(s: String) -> Self {
        QueryError(s)
    }
}

impl From<&str> for QueryError {
    fn from(s: &str) -> Self {
        QueryError(s.to_string())
    }
}

/// Errors that can occur while running or post-processing an evaluation.
#[derive(Debug, Error)]
pub enum EvalError {
    /// Artifact directory creation, file open or write failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Record or summary could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// The injected query capability failed for a case
    #[error("Case {question_id} in variant {variant} failed: {source}")]
    Query {
        variant: String,
        question_id: String,
        #[source]
        source: QueryError,
    },
    /// Two variants in one run share a name
    #[error("Duplicate variant name: {0}")]
    DuplicateVariant(String),
    /// Input file does not exist
    #[error("Missing file: {0}")]
    MissingFile(String),
    /// Input file is not valid JSON/JSONL for the expected type
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}
