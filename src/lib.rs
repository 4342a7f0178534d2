//! `epi-reshape` reshapes epidemiological time-series tables into date-indexed frames.
//!
//! Inputs are in-memory [`types::DataSet`]s (loading the upstream CSVs is left to the caller):
//!
//! - the Johns Hopkins CSSE "wide" tables
//!   (`time_series_covid19_{confirmed,deaths,recovered}_global`): one row per region, one
//!   column per day
//! - Google community mobility reports: one row per `(country, sub-region, day)`
//!
//! Outputs are [`frame::TimeSeriesFrame`]s: one row per date, typed value columns.
//!
//! ## Operations
//!
//! - [`reshape::transform_df`]: wide table → one column per country, national totals per day
//! - [`merge::get_merged_country_data`]: one country's `confirmed`/`deaths`/`recovered` series,
//!   aligned on dates common to all three
//! - [`countries::list_all_countries`]: distinct values of a column, first-occurrence order
//! - [`mobility::mobility_per_country`]: one country's mobility rows, indexed by date, with the
//!   country-wide row labelled `"all"`
//!
//! All four are pure functions. [`toolkit::Toolkit`] bundles their configuration (deserializable
//! from JSON) with an optional [`observability::TransformObserver`].
//!
//! ## Example: reshape → merge
//!
//! ```rust
//! use std::collections::HashMap;
//!
//! use epi_reshape::merge::get_merged_country_data;
//! use epi_reshape::reshape::{transform_df, ReshapeOptions};
//! use epi_reshape::types::{DataSet, DataType, Field, Schema, Value};
//!
//! fn wide(count: i64) -> DataSet {
//!     let schema = Schema::new(vec![
//!         Field::new("Province/State", DataType::Utf8),
//!         Field::new("Country/Region", DataType::Utf8),
//!         Field::new("Lat", DataType::Float64),
//!         Field::new("Long", DataType::Float64),
//!         Field::new("3/1/20", DataType::Int64),
//!     ]);
//!     DataSet::new(
//!         schema,
//!         vec![vec![
//!             Value::Null,
//!             Value::utf8("Italy"),
//!             Value::Float64(43.0),
//!             Value::Float64(12.0),
//!             Value::Int64(count),
//!         ]],
//!     )
//! }
//!
//! # fn main() -> Result<(), epi_reshape::ReshapeError> {
//! let opts = ReshapeOptions::default();
//! let datasets = HashMap::from([
//!     ("confirmed".to_string(), transform_df(&wide(1694), &opts)?),
//!     ("deaths".to_string(), transform_df(&wide(34), &opts)?),
//!     ("recovered".to_string(), transform_df(&wide(83), &opts)?),
//! ]);
//!
//! let italy = get_merged_country_data("Italy", &datasets)?;
//! assert_eq!(italy.column_names(), vec!["confirmed", "deaths", "recovered"]);
//! assert_eq!(italy.rows[0], vec![Value::Int64(1694), Value::Int64(34), Value::Int64(83)]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`types`]: schema + in-memory dataset types
//! - [`frame`]: the date-indexed output frame
//! - [`reshape`], [`merge`], [`countries`], [`mobility`]: the operations
//! - [`observability`]: observer trait and sinks
//! - [`toolkit`]: configured, observed entrypoint
//! - [`error`]: error type used across the crate

pub mod countries;
pub mod error;
pub mod frame;
pub mod merge;
pub mod mobility;
pub mod observability;
pub mod reshape;
pub mod toolkit;
pub mod types;

pub use error::{ReshapeError, ReshapeResult};
