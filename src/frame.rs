//! Date-indexed tables.
//!
//! [`TimeSeriesFrame`] is the output shape of every operation in this crate: one row per index
//! date, value columns described by a [`Schema`]. The column axis carries nothing but the column
//! names themselves.

use chrono::NaiveDate;

use crate::error::{ReshapeError, ReshapeResult};
use crate::types::{Field, Schema, Value};

/// A table whose rows are keyed by calendar date.
///
/// The index may contain repeated dates (e.g. one mobility row per sub-region and day).
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesFrame {
    /// Name of the index axis (usually `"date"`).
    pub index_name: String,
    /// Row keys, aligned with `rows`.
    pub index: Vec<NaiveDate>,
    /// Value columns.
    pub schema: Schema,
    /// Row-major value storage, in the same order as the [`Schema`] fields.
    pub rows: Vec<Vec<Value>>,
}

impl TimeSeriesFrame {
    /// Create a frame from its parts.
    ///
    /// # Panics
    ///
    /// Panics if `index` and `rows` have different lengths.
    pub fn new(
        index_name: impl Into<String>,
        index: Vec<NaiveDate>,
        schema: Schema,
        rows: Vec<Vec<Value>>,
    ) -> Self {
        assert!(
            index.len() == rows.len(),
            "index length {} does not match row count {}",
            index.len(),
            rows.len()
        );
        Self {
            index_name: index_name.into(),
            index,
            schema,
            rows,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Value column names in order (for a tidy table: the country names).
    pub fn column_names(&self) -> Vec<String> {
        self.schema.field_names().map(str::to_owned).collect()
    }

    /// Look up a single cell by date position and column name.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.schema.index_of(column)?;
        self.rows.get(row)?.get(idx)
    }

    /// Values of one column, top to bottom.
    pub fn column(&self, name: &str) -> ReshapeResult<Vec<Value>> {
        let idx = self.schema.require(name)?;
        Ok(self
            .rows
            .iter()
            .map(|row| row.get(idx).cloned().unwrap_or(Value::Null))
            .collect())
    }

    /// One-column frame holding `name`, relabelled as `rename_to`.
    pub fn select_as(&self, name: &str, rename_to: &str) -> ReshapeResult<Self> {
        let idx = self.schema.require(name)?;
        let field = Field::new(rename_to, self.schema.fields[idx].data_type.clone());
        Ok(Self {
            index_name: self.index_name.clone(),
            index: self.index.clone(),
            schema: Schema::new(vec![field]),
            rows: self.column(name)?.into_iter().map(|v| vec![v]).collect(),
        })
    }

    /// Inner join on the index.
    ///
    /// Output rows follow the order of `self`; a date repeated on either side yields every
    /// pairing of the matching rows. Columns are `self`'s followed by `other`'s.
    pub fn inner_join(&self, other: &Self) -> Self {
        let mut fields = self.schema.fields.clone();
        fields.extend(other.schema.fields.iter().cloned());

        let mut index = Vec::new();
        let mut rows = Vec::new();
        for (date, left) in self.index.iter().zip(&self.rows) {
            for (_, right) in other
                .index
                .iter()
                .zip(&other.rows)
                .filter(|(d, _)| *d == date)
            {
                let mut row = Vec::with_capacity(fields.len());
                row.extend(left.iter().cloned());
                row.extend(right.iter().cloned());
                index.push(*date);
                rows.push(row);
            }
        }

        Self {
            index_name: self.index_name.clone(),
            index,
            schema: Schema::new(fields),
            rows,
        }
    }

    /// Distinct index dates in first-occurrence order.
    pub fn unique_dates(&self) -> Vec<NaiveDate> {
        let mut out: Vec<NaiveDate> = Vec::new();
        for d in &self.index {
            if !out.contains(d) {
                out.push(*d);
            }
        }
        out
    }
}

/// Parse a date label with an explicit `chrono` format string.
pub fn parse_date(label: &str, format: &str) -> ReshapeResult<NaiveDate> {
    NaiveDate::parse_from_str(label.trim(), format).map_err(|e| ReshapeError::InvalidDate {
        label: label.to_owned(),
        format: format.to_owned(),
        message: e.to_string(),
    })
}
