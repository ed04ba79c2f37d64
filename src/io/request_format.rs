//! Request record handling
//!
//! Input is JSON: either an array of records or a single record object, which
//! is treated as a one-element batch. Records are kept as raw JSON values until
//! each is processed so that a failing record can be echoed back verbatim.

use crate::types::{StatementError, StatementRequest};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Split a JSON document into batch records
pub fn parse_records(input: &str) -> Result<Vec<Value>, StatementError> {
    match serde_json::from_str::<Value>(input)? {
        Value::Array(records) => Ok(records),
        record @ Value::Object(_) => Ok(vec![record]),
        other => Err(StatementError::InvalidRecord {
            message: format!("expected an array or object, found {}", type_name(&other)),
        }),
    }
}

/// Read and split a JSON request file
pub fn read_records(path: &Path) -> Result<Vec<Value>, StatementError> {
    let input = fs::read_to_string(path).map_err(|e| StatementError::IoError {
        message: format!("cannot read {}: {}", path.display(), e),
    })?;
    parse_records(&input)
}

/// Convert one raw record into a typed request
pub fn parse_request(record: &Value) -> Result<StatementRequest, StatementError> {
    Ok(StatementRequest::deserialize(record)?)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
