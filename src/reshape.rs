//! Wide-to-tidy transform for time-series tables.
//!
//! Input is a "wide" [`DataSet`]: one row per region, a handful of descriptive columns
//! (`Province/State`, `Country/Region`, `Lat`, `Long`) and then one numeric column per day,
//! labelled in `M/D/YY` form. Output is a [`TimeSeriesFrame`] with one row per day and one
//! column per country, each cell holding the national total for that day.

use serde::{Deserialize, Serialize};

use crate::error::ReshapeResult;
use crate::frame::{parse_date, TimeSeriesFrame};
use crate::types::{DataSet, DataType, Field, Schema, Value};

/// Options controlling [`transform_df`].
///
/// Use [`Default`] for the Johns Hopkins CSSE time-series layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReshapeOptions {
    /// Descriptive columns removed before aggregation. Every one must exist.
    pub columns_to_drop: Vec<String>,
    /// Column whose values become the output column labels.
    pub group_column: String,
    /// `chrono` format used to parse the date column labels.
    pub date_format: String,
    /// Name given to the output index.
    pub index_name: String,
}

impl Default for ReshapeOptions {
    fn default() -> Self {
        Self {
            columns_to_drop: vec![
                "Lat".to_string(),
                "Long".to_string(),
                "Province/State".to_string(),
            ],
            group_column: "Country/Region".to_string(),
            date_format: "%m/%d/%y".to_string(),
            index_name: "date".to_string(),
        }
    }
}

/// Reshape a wide time-series table into a tidy, date-indexed table.
///
/// Steps:
///
/// 1. drop `options.columns_to_drop` (fails with
///    [`crate::ReshapeError::MissingColumn`] if any is absent)
/// 2. group rows by `options.group_column`, summing every other numeric column; rows with a
///    null group key are skipped and groups are ordered by label
/// 3. transpose, so day columns become rows and groups become columns
/// 4. parse each former column label with `options.date_format` (fails with
///    [`crate::ReshapeError::InvalidDate`])
///
/// Non-numeric columns left after step 1 are not summable and are left out of the result.
/// Nulls are skipped while summing, so a group with no values for a day totals zero. Integer
/// totals wrap on overflow.
///
/// ```rust
/// use epi_reshape::reshape::{transform_df, ReshapeOptions};
/// use epi_reshape::types::{DataSet, DataType, Field, Schema, Value};
///
/// let schema = Schema::new(vec![
///     Field::new("Province/State", DataType::Utf8),
///     Field::new("Country/Region", DataType::Utf8),
///     Field::new("Lat", DataType::Float64),
///     Field::new("Long", DataType::Float64),
///     Field::new("1/22/20", DataType::Int64),
/// ]);
/// let usa = |lat: f64, long: f64, count: i64| {
///     vec![
///         Value::Null,
///         Value::utf8("USA"),
///         Value::Float64(lat),
///         Value::Float64(long),
///         Value::Int64(count),
///     ]
/// };
/// let wide = DataSet::new(schema, vec![usa(1.0, 2.0, 10), usa(3.0, 4.0, 5)]);
///
/// let tidy = transform_df(&wide, &ReshapeOptions::default()).unwrap();
/// assert_eq!(tidy.column_names(), vec!["USA"]);
/// assert_eq!(tidy.get(0, "USA"), Some(&Value::Int64(15)));
/// ```
pub fn transform_df(wide: &DataSet, options: &ReshapeOptions) -> ReshapeResult<TimeSeriesFrame> {
    let ds = wide.drop_columns(options.columns_to_drop.as_slice())?;
    let key_idx = ds.schema.require(&options.group_column)?;

    let value_idxs: Vec<usize> = ds
        .schema
        .fields
        .iter()
        .enumerate()
        .filter(|(i, f)| *i != key_idx && f.data_type.is_numeric())
        .map(|(i, _)| i)
        .collect();

    let out_type = if value_idxs
        .iter()
        .any(|&i| ds.schema.fields[i].data_type == DataType::Float64)
    {
        DataType::Float64
    } else {
        DataType::Int64
    };
    let zero = match out_type {
        DataType::Float64 => Value::Float64(0.0),
        _ => Value::Int64(0),
    };

    // (label, per-day totals)
    let mut groups: Vec<(String, Vec<Value>)> = Vec::new();
    for row in &ds.rows {
        let Some(label) = row.get(key_idx).and_then(Value::label) else {
            continue;
        };
        let pos = match groups.iter().position(|(g, _)| *g == label) {
            Some(pos) => pos,
            None => {
                groups.push((label, vec![zero.clone(); value_idxs.len()]));
                groups.len() - 1
            }
        };
        let totals = &mut groups[pos].1;
        for (slot, &col) in value_idxs.iter().enumerate() {
            if let Some(cell) = row.get(col) {
                totals[slot] = add(&totals[slot], cell);
            }
        }
    }

    groups.sort_by(|a, b| a.0.cmp(&b.0));

    let mut index = Vec::with_capacity(value_idxs.len());
    let mut rows: Vec<Vec<Value>> = Vec::with_capacity(value_idxs.len());
    for (slot, &col) in value_idxs.iter().enumerate() {
        index.push(parse_date(&ds.schema.fields[col].name, &options.date_format)?);
        rows.push(groups.iter().map(|(_, totals)| totals[slot].clone()).collect());
    }

    let schema = Schema::new(
        groups
            .iter()
            .map(|(label, _)| Field::new(label.clone(), out_type.clone()))
            .collect(),
    );

    Ok(TimeSeriesFrame::new(
        options.index_name.clone(),
        index,
        schema,
        rows,
    ))
}

fn add(acc: &Value, cell: &Value) -> Value {
    match (acc, cell) {
        (Value::Int64(a), Value::Int64(b)) => Value::Int64(a.wrapping_add(*b)),
        (Value::Int64(a), Value::Float64(b)) => Value::Float64(*a as f64 + b),
        (Value::Float64(a), Value::Int64(b)) => Value::Float64(a + *b as f64),
        (Value::Float64(a), Value::Float64(b)) => Value::Float64(a + b),
        // nulls (and anything non-numeric) don't contribute
        _ => acc.clone(),
    }
}
