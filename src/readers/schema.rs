use crate::error::{ProcessingError, Result};
use csv::StringRecord;

/// Resolve the index of every required column, failing with all missing names at once
pub fn require_columns(
    headers: &StringRecord,
    required: &[&str],
    table: &'static str,
) -> Result<Vec<usize>> {
    let mut indices = Vec::with_capacity(required.len());
    let mut missing = Vec::new();

    for name in required {
        match headers.iter().position(|h| h == *name) {
            Some(index) => indices.push(index),
            None => missing.push(name.to_string()),
        }
    }

    if !missing.is_empty() {
        return Err(ProcessingError::MissingColumns {
            table,
            columns: missing,
        });
    }

    Ok(indices)
}
