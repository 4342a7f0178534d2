use thiserror::Error;

/// Convenience result type for reshape operations.
pub type ReshapeResult<T> = Result<T, ReshapeError>;

/// Error type returned by reshape, merge, listing and mobility functions.
///
/// All variants are precondition violations: nothing is retried and no partial result is
/// returned.
#[derive(Debug, Error)]
pub enum ReshapeError {
    /// A named column is absent from a table.
    #[error("column '{column}' not found. columns={available:?}")]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    /// A required dataset (`confirmed`, `deaths` or `recovered`) is absent from the input map.
    #[error("'{key}' does not exist in datasets")]
    MissingKey { key: String },

    /// The requested country does not appear in the table.
    #[error("country '{country}' not found in column '{column}'")]
    MissingCountry { country: String, column: String },

    /// A row label or date cell could not be parsed into a calendar date.
    #[error("failed to parse date '{label}' with format '{format}': {message}")]
    InvalidDate {
        label: String,
        format: String,
        message: String,
    },

    /// Configuration could not be deserialized.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl ReshapeError {
    pub(crate) fn missing_column<'a>(
        column: &str,
        available: impl Iterator<Item = &'a str>,
    ) -> Self {
        Self::MissingColumn {
            column: column.to_owned(),
            available: available.map(str::to_owned).collect(),
        }
    }
}
