//! Batch response envelope
//!
//! The envelope lists one success entry per generated file and one failure
//! entry per rejected record. Failure entries echo the record exactly as it
//! arrived.

use crate::types::StatementError;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;
use std::io::Write;

/// A generated file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuccessEntry {
    pub file: String,
    pub file_url: String,
}

/// A record that could not be turned into a file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureEntry {
    pub error: String,
    pub kind: &'static str,
    pub data: Value,
}

impl FailureEntry {
    pub fn new(error: &StatementError, data: Value) -> Self {
        FailureEntry {
            error: error.to_string(),
            kind: error.kind(),
            data,
        }
    }
}

/// Outcome of one batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchEnvelope {
    pub success: bool,
    pub message: String,
    pub total: usize,
    pub files: Vec<SuccessEntry>,
    pub failures: Vec<FailureEntry>,
    pub timestamp: String,
}

impl BatchEnvelope {
    /// Assemble an envelope; `success` is true when at least one file was made
    /// or the batch was empty
    pub fn new(
        files: Vec<SuccessEntry>,
        failures: Vec<FailureEntry>,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let success = !files.is_empty() || failures.is_empty();
        let message = match (files.len(), failures.len()) {
            (0, 0) => "No records to process".to_string(),
            (n, 0) => format!("Generated {} document(s)", n),
            (0, f) => format!("All {} record(s) failed", f),
            (n, f) => format!("Generated {} document(s); {} record(s) failed", n, f),
        };
        BatchEnvelope {
            success,
            message,
            total: files.len(),
            files,
            failures,
            timestamp: generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

/// Write the envelope as pretty-printed JSON followed by a newline
pub fn write_envelope(
    envelope: &BatchEnvelope,
    output: &mut dyn Write,
) -> Result<(), StatementError> {
    serde_json::to_writer_pretty(&mut *output, envelope).map_err(|e| StatementError::IoError {
        message: e.to_string(),
    })?;
    writeln!(output)?;
    Ok(())
}
