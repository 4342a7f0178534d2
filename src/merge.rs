//! Per-country merge of the confirmed/deaths/recovered tidy tables.

use std::collections::HashMap;
use std::fmt;

use crate::error::{ReshapeError, ReshapeResult};
use crate::frame::TimeSeriesFrame;

/// The three datasets a per-country merge needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    Confirmed,
    Deaths,
    Recovered,
}

impl DatasetKind {
    /// All kinds, in merge (and validation) order.
    pub const ALL: [DatasetKind; 3] = [Self::Confirmed, Self::Deaths, Self::Recovered];

    /// Map key and output column name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Deaths => "deaths",
            Self::Recovered => "recovered",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Merge one country's series from the `confirmed`, `deaths` and `recovered` tidy tables.
///
/// - Fails with [`ReshapeError::MissingKey`] for the first absent key, before any table is read.
/// - Fails with [`ReshapeError::MissingColumn`] if `country` is not a column of one of the tables.
///
/// The result has exactly the columns `confirmed`, `deaths`, `recovered` and keeps only dates
/// present in all three tables, in the order of the `confirmed` index. Extra entries in
/// `datasets` are ignored.
///
/// A country spelled differently across the tables is not detected; dates are aligned on what
/// matches and the rest fall out of the join.
pub fn get_merged_country_data(
    country: &str,
    datasets: &HashMap<String, TimeSeriesFrame>,
) -> ReshapeResult<TimeSeriesFrame> {
    let mut tables = Vec::with_capacity(DatasetKind::ALL.len());
    for kind in DatasetKind::ALL {
        match datasets.get(kind.as_str()) {
            Some(t) => tables.push((kind, t)),
            None => {
                return Err(ReshapeError::MissingKey {
                    key: kind.as_str().to_string(),
                });
            }
        }
    }

    let mut selected = Vec::with_capacity(tables.len());
    for (kind, table) in tables {
        selected.push(table.select_as(country, kind.as_str())?);
    }

    let merged = selected[1..]
        .iter()
        .fold(selected[0].clone(), |merged, next| merged.inner_join(next));
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::NaiveDate;

    use super::{get_merged_country_data, DatasetKind};
    use crate::error::ReshapeError;
    use crate::frame::TimeSeriesFrame;
    use crate::types::{DataType, Field, Schema, Value};

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 3, day).unwrap()
    }

    fn tidy(days: &[u32], countries: &[(&str, Vec<i64>)]) -> TimeSeriesFrame {
        let schema = Schema::new(
            countries
                .iter()
                .map(|(c, _)| Field::new(*c, DataType::Int64))
                .collect(),
        );
        let rows = (0..days.len())
            .map(|r| countries.iter().map(|(_, v)| Value::Int64(v[r])).collect())
            .collect();
        TimeSeriesFrame::new("date", days.iter().map(|x| d(*x)).collect(), schema, rows)
    }

    fn datasets() -> HashMap<String, TimeSeriesFrame> {
        HashMap::from([
            (
                "confirmed".to_string(),
                tidy(
                    &[1, 2, 3],
                    &[("Italy", vec![1694, 2036, 2502]), ("Spain", vec![84, 120, 165])],
                ),
            ),
            (
                "deaths".to_string(),
                tidy(&[1, 2, 3], &[("Spain", vec![0, 0, 1]), ("Italy", vec![34, 52, 79])]),
            ),
            (
                "recovered".to_string(),
                tidy(&[2, 3], &[("Italy", vec![149, 160]), ("Spain", vec![2, 2])]),
            ),
        ])
    }

    #[test]
    fn merges_one_country_across_three_tables() {
        let out = get_merged_country_data("Italy", &datasets()).unwrap();
        assert_eq!(out.column_names(), vec!["confirmed", "deaths", "recovered"]);
        assert_eq!(out.index, vec![d(2), d(3)]);
        assert_eq!(
            out.rows,
            vec![
                vec![Value::Int64(2036), Value::Int64(52), Value::Int64(149)],
                vec![Value::Int64(2502), Value::Int64(79), Value::Int64(160)],
            ]
        );
    }

    #[test]
    fn missing_key_is_reported_before_data_access() {
        let mut ds = datasets();
        ds.remove("recovered");
        match get_merged_country_data("Nowhere", &ds).unwrap_err() {
            ReshapeError::MissingKey { key } => assert_eq!(key, "recovered"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_country_column_is_reported() {
        let err = get_merged_country_data("France", &datasets()).unwrap_err();
        assert!(matches!(
            err,
            ReshapeError::MissingColumn { ref column, .. } if column == "France"
        ));
    }

    #[test]
    fn extra_datasets_are_ignored() {
        let mut ds = datasets();
        ds.insert("active".to_string(), tidy(&[1], &[("Italy", vec![1])]));
        let out = get_merged_country_data("Spain", &ds).unwrap();
        assert_eq!(out.row_count(), 2);
    }

    #[test]
    fn kinds_render_as_map_keys() {
        let keys: Vec<String> = DatasetKind::ALL.iter().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["confirmed", "deaths", "recovered"]);
    }
}
