//! Error types for the Leapline library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Leapline operations.
#[derive(Debug, Error)]
pub enum LeaplineError {
    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid delimiter detected or specified.
    #[error("Invalid delimiter: {0}")]
    InvalidDelimiter(String),

    /// Empty file or no data to load.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// No column could be identified as the year column.
    #[error(
        "No 'Year' column found in the dataset (columns: {}). \
         Please ensure the data has a 'Year' column.",
        format_columns(.columns)
    )]
    Schema { columns: Vec<String> },

    /// A caller-supplied Leap_Reason contradicts the row's leap flag.
    ///
    /// Only raised under [`ReasonPolicy::Strict`](crate::ReasonPolicy::Strict).
    #[error("Row {row}: Leap_Reason '{reason}' disagrees with Is_Leap_Year = {is_leap}")]
    InconsistentReason {
        row: usize,
        reason: String,
        is_leap: bool,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

fn format_columns(columns: &[String]) -> String {
    if columns.is_empty() {
        "none".to_string()
    } else {
        columns.join(", ")
    }
}

impl LeaplineError {
    /// Whether this is the fatal "no year column" schema failure.
    pub fn is_schema_error(&self) -> bool {
        matches!(self, LeaplineError::Schema { .. })
    }
}

/// Result type alias for Leapline operations.
pub type Result<T> = std::result::Result<T, LeaplineError>;
