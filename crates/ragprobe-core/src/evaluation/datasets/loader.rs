//! Loading cases and variants from disk.
//!
//! Both a JSON array and JSONL (one object per line) are accepted; the format
//! is picked from the first non-whitespace character.
//!
//! ```text
//! cases.jsonl      # {"id": "refund_1", "question": "What is the refund policy?"}
//! variants.json    # [{"name": "base", "prompt_prefix": ""}, ...]
//! ```

use crate::error::EvalError;
use crate::evaluation::types::{EvalCase, PromptVariant};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Loads evaluation cases from a JSON array or JSONL file.
pub fn load_cases(path: &Path) -> Result<Vec<EvalCase>, EvalError> {
    load_items(path)
}

/// Loads prompt variants from a JSON array or JSONL file.
pub fn load_variants(path: &Path) -> Result<Vec<PromptVariant>, EvalError> {
    load_items(path)
}

fn load_items<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, EvalError> {
    if !path.exists() {
        return Err(EvalError::MissingFile(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let trimmed = content.trim_start();

    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed)
            .map_err(|e| EvalError::InvalidFormat(format!("{}: {}", path.display(), e)));
    }

    let mut items = Vec::new();
    for (line_num, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let item = serde_json::from_str(line).map_err(|e| {
            EvalError::InvalidFormat(format!("{} line {}: {}", path.display(), line_num + 1, e))
        })?;
        items.push(item);
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_load_cases_jsonl() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cases.jsonl");
        let mut file = File::create(&path).unwrap();
        writeln!(file, r#"{{"id": "refund", "question": "What is the refund policy?"}}"#).unwrap();
        writeln!(file).unwrap();
        writeln!(file, r#"{{"id": "shipping", "question": "What is the shipping timeline?"}}"#)
            .unwrap();

        let cases = load_cases(&path).unwrap();
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].id, "refund");
        assert_eq!(cases[1].question, "What is the shipping timeline?");
    }

    #[test]
    fn test_load_variants_json_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("variants.json");
        std::fs::write(
            &path,
            r#"
            [
                {"name": "base"},
                {"name": "grounded", "prompt_prefix": "Answer using documents."}
            ]"#,
        )
        .unwrap();

        let variants = load_variants(&path).unwrap();
        assert_eq!(variants.len(), 2);
        assert_eq!(variants[0].prompt_prefix, "");
        assert_eq!(variants[1].prompt_prefix, "Answer using documents.");
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = load_cases(&dir.path().join("cases.jsonl"));
        assert!(matches!(result, Err(EvalError::MissingFile(_))));
    }

    #[test]
    fn test_invalid_line_reports_number() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cases.jsonl");
        std::fs::write(&path, "{\"id\": \"a\", \"question\": \"q\"}\n{\"id\": \"b\"}\n").unwrap();

        match load_cases(&path) {
            Err(EvalError::InvalidFormat(msg)) => assert!(msg.contains("line 2"), "{}", msg),
            other => panic!("expected InvalidFormat, got {:?}", other),
        }
    }
}
