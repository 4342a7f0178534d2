//! Distinct-value listing.

use crate::error::ReshapeResult;
use crate::types::{DataSet, Value};

/// List the distinct values of `column`, in first-occurrence order.
///
/// Fails with [`crate::ReshapeError::MissingColumn`] if `column` is absent. A null appears at
/// most once, like any other value.
pub fn list_all_countries(dataset: &DataSet, column: &str) -> ReshapeResult<Vec<Value>> {
    let mut out: Vec<Value> = Vec::new();
    for value in dataset.column(column)? {
        if !out.contains(value) {
            out.push(value.clone());
        }
    }
    Ok(out)
}

/// Whether `country` appears as a text value of `column`.
pub fn contains_country(dataset: &DataSet, column: &str, country: &str) -> ReshapeResult<bool> {
    Ok(dataset
        .column(column)?
        .any(|v| matches!(v, Value::Utf8(s) if s == country)))
}
