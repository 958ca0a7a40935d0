//! Evaluation inputs: questions and prompt variants.
//!
//! A run takes its cases and variants either from the caller or from the
//! built-in defaults:
//!
//! - [`defaults`] - Process-wide immutable dataset and variant lists
//! - [`loader`] - JSON / JSONL file loading for custom inputs
//!
//! # Example
//!
//! ```ignore
//! use ragprobe_core::evaluation::datasets::{default_dataset, load_cases};
//!
//! let cases = match path {
//!     Some(path) => load_cases(path)?,
//!     None => default_dataset(),
//! };
//! ```

pub mod defaults;
pub mod loader;

pub use defaults::{default_dataset, default_variants, DEFAULT_DATASET, DEFAULT_VARIANTS};
pub use loader::{load_cases, load_variants};
