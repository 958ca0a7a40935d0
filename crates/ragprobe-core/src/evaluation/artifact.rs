//! Run log persistence.
//!
//! Each run owns one file, `<artifact_dir>/regression_<run_id>.jsonl`, holding
//! one compact JSON [`CaseRecord`] per line in processing order (variant-major,
//! case-minor). Records are flushed as they are appended so an aborted run
//! leaves a readable prefix of the log. There is no trailing summary line.
//!
//! # Data Format
//!
//! ```text
//! artifacts/eval_runs/
//! └── regression_<run_id>.jsonl   # {"run_id": "...", "variant": "...", ...}
//! ```

use super::types::CaseRecord;
use crate::config::{ARTIFACT_FILE_EXTENSION, ARTIFACT_FILE_PREFIX};
use crate::error::EvalError;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Returns the log path for a run id inside `dir`.
pub fn artifact_path(dir: &Path, run_id: &str) -> PathBuf {
    dir.join(format!(
        "{}{}.{}",
        ARTIFACT_FILE_PREFIX, run_id, ARTIFACT_FILE_EXTENSION
    ))
}

/// Exclusive writer for one run log.
///
/// The file is closed when the writer is dropped, which covers early returns
/// from a failing run.
pub struct ArtifactWriter {
    path: PathBuf,
    writer: BufWriter<File>,
    records_written: usize,
}

impl ArtifactWriter {
    /// Creates `dir` (recursively) and opens the run log, truncating any
    /// existing file with the same run id.
    pub fn create(dir: &Path, run_id: &str) -> Result<Self, EvalError> {
        fs::create_dir_all(dir)?;
        let path = artifact_path(dir, run_id);
        let file = File::create(&path)?;
        debug!(path = %path.display(), "Opened run log");
        Ok(Self {
            path,
            writer: BufWriter::new(file),
            records_written: 0,
        })
    }

    /// Appends one record as a single line and flushes it to disk.
    pub fn append(&mut self, record: &CaseRecord) -> Result<(), EvalError> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        self.records_written += 1;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of records appended so far.
    pub fn records_written(&self) -> usize {
        self.records_written
    }
}

/// Reads a run log back into records.
///
/// Blank lines are skipped. A malformed line fails with its 1-based number.
pub fn read_records(path: &Path) -> Result<Vec<CaseRecord>, EvalError> {
    if !path.exists() {
        return Err(EvalError::MissingFile(path.display().to_string()));
    }

    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str(&line) {
            Ok(record) => records.push(record),
            Err(e) => {
                return Err(EvalError::InvalidFormat(format!(
                    "Line {}: {}",
                    line_num + 1,
                    e
                )));
            }
        }
    }

    Ok(records)
}
