//! # ragprobe Core
//!
//! Regression evaluation harness for retrieval-augmented answering.
//!
//! This crate runs a fixed question set through an injected answer-producing
//! capability under several prompt variants, classifies every answer, and
//! writes a durable per-case log plus an aggregated summary. It is designed to
//! be driven from different frontends (CLI, a service route, tests).
//!
//! ## Modules
//!
//! - [`evaluation`] - Classifier, statistics, run engine and run log
//! - [`config`] - Run defaults and artifact layout constants
//! - [`error`] - Error types for runs and input loading

pub mod config;
pub mod error;
pub mod evaluation;

pub use error::{EvalError, QueryError};
pub use evaluation::{run_regression, QueryBackend, RunOptions, RunSummary};
