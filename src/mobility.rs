//! Country filter for Google community mobility reports.
//!
//! A mobility report row is keyed by `(country_region, sub_region_1, sub_region_2, date)` and
//! carries one percent-change column per place category (e.g.
//! `workplaces_percent_change_from_baseline`). [`mobility_per_country`] cuts out one
//! country and turns it into a date-indexed frame.

use serde::{Deserialize, Serialize};

use crate::countries::contains_country;
use crate::error::{ReshapeError, ReshapeResult};
use crate::frame::{parse_date, TimeSeriesFrame};
use crate::types::{DataSet, Schema, Value};

pub const COUNTRY_COLUMN: &str = "country_region";
pub const COUNTRY_CODE_COLUMN: &str = "country_region_code";
pub const SUB_REGION_1_COLUMN: &str = "sub_region_1";
pub const SUB_REGION_2_COLUMN: &str = "sub_region_2";
pub const DATE_COLUMN: &str = "date";

/// Options controlling [`mobility_per_country`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MobilityOptions {
    /// `chrono` format used when the `date` column holds text.
    pub date_format: String,
    /// Label written into empty `sub_region_1` cells (the country-wide row).
    pub all_label: String,
}

impl Default for MobilityOptions {
    fn default() -> Self {
        Self {
            date_format: "%Y-%m-%d".to_string(),
            all_label: "all".to_string(),
        }
    }
}

/// Extract one country from a mobility report.
///
/// Rules:
///
/// - `country` must be one of the values of `country_region`, otherwise
///   [`ReshapeError::MissingCountry`].
/// - `sub_region_1`, `sub_region_2`, `country_region_code` and `date` must exist, otherwise
///   [`ReshapeError::MissingColumn`]. All columns are checked before any row is copied.
/// - Rows keep their original order. Empty `sub_region_1` cells become `options.all_label`.
/// - `date` becomes the index. Text dates are parsed with `options.date_format`; any other
///   non-date cell fails with [`ReshapeError::InvalidDate`].
/// - `country_region_code`, `country_region` and `sub_region_2` are dropped.
pub fn mobility_per_country(
    country: &str,
    report: &DataSet,
    options: &MobilityOptions,
) -> ReshapeResult<TimeSeriesFrame> {
    if !contains_country(report, COUNTRY_COLUMN, country)? {
        return Err(ReshapeError::MissingCountry {
            country: country.to_string(),
            column: COUNTRY_COLUMN.to_string(),
        });
    }

    let schema = &report.schema;
    let country_idx = schema.require(COUNTRY_COLUMN)?;
    let sub_region_idx = schema.require(SUB_REGION_1_COLUMN)?;
    let date_idx = schema.require(DATE_COLUMN)?;
    let dropped = [
        schema.require(COUNTRY_CODE_COLUMN)?,
        country_idx,
        schema.require(SUB_REGION_2_COLUMN)?,
    ];

    let subset = report
        .filter_rows(|row| matches!(row.get(country_idx), Some(Value::Utf8(s)) if s == country));

    let keep: Vec<usize> = (0..schema.fields.len())
        .filter(|i| *i != date_idx && !dropped.contains(i))
        .collect();

    let mut index = Vec::with_capacity(subset.row_count());
    let mut rows: Vec<Vec<Value>> = Vec::with_capacity(subset.row_count());
    for row in &subset.rows {
        let date = match row.get(date_idx) {
            Some(cell) => date_cell(cell, &options.date_format)?,
            None => date_cell(&Value::Null, &options.date_format)?,
        };
        index.push(date);
        rows.push(
            keep.iter()
                .map(|&i| match row.get(i) {
                    Some(Value::Null) | None if i == sub_region_idx => {
                        Value::utf8(options.all_label.as_str())
                    }
                    Some(cell) => cell.clone(),
                    None => Value::Null,
                })
                .collect(),
        );
    }

    let out_schema = Schema::new(keep.iter().map(|&i| schema.fields[i].clone()).collect());

    Ok(TimeSeriesFrame::new(DATE_COLUMN, index, out_schema, rows))
}

fn date_cell(cell: &Value, format: &str) -> ReshapeResult<chrono::NaiveDate> {
    match cell {
        Value::Date(d) => Ok(*d),
        Value::Utf8(s) => parse_date(s, format),
        other => Err(ReshapeError::InvalidDate {
            label: other.to_string(),
            format: format.to_string(),
            message: "expected a date or text cell".to_string(),
        }),
    }
}
