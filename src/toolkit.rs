//! Configured entrypoint over the four operations.
//!
//! [`Toolkit`] holds a [`ToolkitConfig`] (deserializable from JSON) and an optional
//! [`TransformObserver`]. Each method calls the corresponding free function and reports the
//! outcome:
//!
//! - `on_success` with the output shape
//! - `on_failure` with a computed [`TransformSeverity`]
//! - `on_alert` when that severity is >= [`Toolkit::alert_at_or_above`]
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use epi_reshape::observability::{StdErrObserver, TransformSeverity};
//! use epi_reshape::toolkit::{Toolkit, ToolkitConfig};
//!
//! # fn main() -> Result<(), epi_reshape::ReshapeError> {
//! let config = ToolkitConfig::from_json_str(r#"{ "mobility": { "all_label": "national" } }"#)?;
//! let toolkit = Toolkit::new(config)
//!     .with_observer(Arc::new(StdErrObserver))
//!     .alert_at_or_above(TransformSeverity::Error);
//! assert_eq!(toolkit.config().reshape.group_column, "Country/Region");
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::countries::list_all_countries;
use crate::error::ReshapeResult;
use crate::frame::TimeSeriesFrame;
use crate::merge::get_merged_country_data;
use crate::mobility::{mobility_per_country, MobilityOptions};
use crate::observability::{
    TransformContext, TransformKind, TransformObserver, TransformSeverity, TransformStats,
};
use crate::reshape::{transform_df, ReshapeOptions};
use crate::types::{DataSet, Value};

/// Options for every operation, grouped by operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolkitConfig {
    pub reshape: ReshapeOptions,
    pub mobility: MobilityOptions,
}

impl ToolkitConfig {
    /// Parse a JSON document; missing sections and fields take their defaults.
    pub fn from_json_str(s: &str) -> ReshapeResult<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

/// Runs the operations with a fixed configuration and reports outcomes to an observer.
#[derive(Clone)]
pub struct Toolkit {
    config: ToolkitConfig,
    observer: Option<Arc<dyn TransformObserver>>,
    alert_at_or_above: TransformSeverity,
}

impl fmt::Debug for Toolkit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toolkit")
            .field("config", &self.config)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for Toolkit {
    fn default() -> Self {
        Self::new(ToolkitConfig::default())
    }
}

impl Toolkit {
    pub fn new(config: ToolkitConfig) -> Self {
        Self {
            config,
            observer: None,
            alert_at_or_above: TransformSeverity::Critical,
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn TransformObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Severity threshold at which `on_alert` is invoked (default: `Critical`).
    pub fn alert_at_or_above(mut self, severity: TransformSeverity) -> Self {
        self.alert_at_or_above = severity;
        self
    }

    pub fn config(&self) -> &ToolkitConfig {
        &self.config
    }

    /// [`transform_df`] with the configured [`ReshapeOptions`].
    pub fn transform_df(&self, wide: &DataSet) -> ReshapeResult<TimeSeriesFrame> {
        let ctx = TransformContext {
            operation: TransformKind::Reshape,
            subject: None,
        };
        let result = transform_df(wide, &self.config.reshape);
        self.report(&ctx, &result, frame_stats);
        result
    }

    /// [`get_merged_country_data`].
    pub fn merged_country_data(
        &self,
        country: &str,
        datasets: &HashMap<String, TimeSeriesFrame>,
    ) -> ReshapeResult<TimeSeriesFrame> {
        let ctx = TransformContext {
            operation: TransformKind::Merge,
            subject: Some(country.to_string()),
        };
        let result = get_merged_country_data(country, datasets);
        self.report(&ctx, &result, frame_stats);
        result
    }

    /// [`list_all_countries`].
    pub fn list_all_countries(&self, dataset: &DataSet, column: &str) -> ReshapeResult<Vec<Value>> {
        let ctx = TransformContext {
            operation: TransformKind::ListCountries,
            subject: Some(column.to_string()),
        };
        let result = list_all_countries(dataset, column);
        self.report(&ctx, &result, |values| TransformStats {
            rows: values.len(),
            columns: 1,
        });
        result
    }

    /// [`mobility_per_country`] with the configured [`MobilityOptions`].
    pub fn mobility_per_country(
        &self,
        country: &str,
        report: &DataSet,
    ) -> ReshapeResult<TimeSeriesFrame> {
        let ctx = TransformContext {
            operation: TransformKind::Mobility,
            subject: Some(country.to_string()),
        };
        let result = mobility_per_country(country, report, &self.config.mobility);
        self.report(&ctx, &result, frame_stats);
        result
    }

    fn report<T>(
        &self,
        ctx: &TransformContext,
        result: &ReshapeResult<T>,
        stats: impl FnOnce(&T) -> TransformStats,
    ) {
        let Some(obs) = self.observer.as_ref() else {
            return;
        };
        match result {
            Ok(out) => obs.on_success(ctx, stats(out)),
            Err(e) => {
                let sev = TransformSeverity::for_error(e);
                obs.on_failure(ctx, sev, e);
                if sev >= self.alert_at_or_above {
                    obs.on_alert(ctx, sev, e);
                }
            }
        }
    }
}

fn frame_stats(frame: &TimeSeriesFrame) -> TransformStats {
    TransformStats {
        rows: frame.row_count(),
        columns: frame.schema.fields.len(),
    }
}
