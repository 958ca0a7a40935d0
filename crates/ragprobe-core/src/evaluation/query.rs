//! The answer-producing capability consumed by a run.
//!
//! A run only needs something that maps `(prompted_question, top_k)` to a
//! [`QueryResult`]. Any closure with that shape works through the blanket
//! impl; [`FixtureBackend`] provides canned responses for offline runs.

use super::types::QueryResult;
use crate::error::{EvalError, QueryError};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Answer-producing capability.
///
/// Calls are made sequentially and block the run until they return. The
/// harness imposes no timeout and never retries; an `Err` aborts the run.
pub trait QueryBackend {
    /// Answers one prompted question using up to `top_k` retrieved passages.
    fn query(&mut self, question: &str, top_k: usize) -> Result<QueryResult, QueryError>;
}

impl<F> QueryBackend for F
where
    F: FnMut(&str, usize) -> Result<QueryResult, QueryError>,
{
    fn query(&mut self, question: &str, top_k: usize) -> Result<QueryResult, QueryError> {
        self(question, top_k)
    }
}

// ============================================================================
// Fixture backend
// ============================================================================

/// A canned response selected by substring match on the prompted question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureResponse {
    /// Matched case-insensitively against the prompted question.
    pub contains: String,
    #[serde(flatten)]
    pub result: QueryResult,
}

/// Deterministic backend answering from a list of fixtures.
///
/// The first fixture whose `contains` occurs in the question wins. Questions
/// that match nothing get the fallback response.
#[derive(Debug, Clone)]
pub struct FixtureBackend {
    fixtures: Vec<FixtureResponse>,
    fallback: QueryResult,
    calls: usize,
}

impl FixtureBackend {
    /// Answer used when no fixture matches.
    pub const DEFAULT_FALLBACK: &'static str = "I couldn\u{2019}t find an answer in the documents.";

    pub fn new(fixtures: Vec<FixtureResponse>) -> Self {
        Self {
            fixtures,
            fallback: QueryResult::new(Self::DEFAULT_FALLBACK, Vec::new(), 0),
            calls: 0,
        }
    }

    /// Replaces the fallback response.
    pub fn with_fallback(mut self, fallback: QueryResult) -> Self {
        self.fallback = fallback;
        self
    }

    /// Loads fixtures from a JSONL file.
    ///
    /// Each line is `{"contains": "...", "answer": "...", "citations": [...],
    /// "latency_ms": 12}`. A line whose `contains` is `"*"` becomes the
    /// fallback instead of a fixture.
    pub fn from_jsonl(path: &Path) -> Result<Self, EvalError> {
        if !path.exists() {
            return Err(EvalError::MissingFile(path.display().to_string()));
        }

        let reader = BufReader::new(File::open(path)?);
        let mut fixtures = Vec::new();
        let mut fallback = None;

        for (line_num, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let fixture: FixtureResponse = serde_json::from_str(&line).map_err(|e| {
                EvalError::InvalidFormat(format!("{} line {}: {}", path.display(), line_num + 1, e))
            })?;
            if fixture.contains == "*" {
                fallback = Some(fixture.result);
            } else {
                fixtures.push(fixture);
            }
        }

        let backend = Self::new(fixtures);
        Ok(match fallback {
            Some(fallback) => backend.with_fallback(fallback),
            None => backend,
        })
    }

    /// Number of fixtures (excluding the fallback).
    pub fn len(&self) -> usize {
        self.fixtures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixtures.is_empty()
    }

    /// Number of queries answered so far.
    pub fn calls(&self) -> usize {
        self.calls
    }

    fn lookup(&self, question: &str) -> &QueryResult {
        let text = question.to_lowercase();
        self.fixtures
            .iter()
            .find(|f| text.contains(&f.contains.to_lowercase()))
            .map(|f| &f.result)
            .unwrap_or(&self.fallback)
    }
}

impl QueryBackend for FixtureBackend {
    fn query(&mut self, question: &str, top_k: usize) -> Result<QueryResult, QueryError> {
        self.calls += 1;
        let mut result = self.lookup(question).clone();
        result.citations.truncate(top_k);
        Ok(result)
    }
}
