//! Error handling for the validators.
//!
//! Only structural problems are errors: a file that cannot be read, a CSV that
//! cannot be parsed, a dataset whose key columns are missing. Data defects found
//! by the checks are never errors; they are reported as check results.

pub mod util;

use std::io;
use std::path::PathBuf;

use arrow::error::ArrowError;

/// Specialized error type for loading and validating datasets
#[derive(Debug, thiserror::Error)]
pub enum QcError {
    /// Error opening or reading a file
    #[error("IO error for {}: {context}: {source}", .path.display())]
    Io {
        path: PathBuf,
        context: String,
        #[source]
        source: io::Error,
    },

    /// A path that should exist does not, or has the wrong kind
    #[error("{reason}: {}", .path.display())]
    MissingPath { path: PathBuf, reason: String },

    /// Error parsing CSV data into Arrow arrays
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// The dataset cannot be recognised as the expected table
    #[error("Malformed dataset '{dataset}': {reason}")]
    Structure { dataset: String, reason: String },

    /// A column that a check relies on is absent from the table
    #[error("Column not found: {column}")]
    ColumnNotFound { column: String },

    /// A column exists but does not hold the expected Arrow type
    #[error("Column '{column}' is not a {expected} column")]
    ColumnType { column: String, expected: String },

    /// Error serializing the report artifact
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid validator configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl QcError {
    /// Create a structural error for a named dataset
    pub fn structure(dataset: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Structure {
            dataset: dataset.into(),
            reason: reason.into(),
        }
    }

    /// Create an IO error with the path and operation that failed
    pub fn io(path: impl Into<PathBuf>, context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            context: context.into(),
            source,
        }
    }
}

/// Result type for validator operations
pub type Result<T> = std::result::Result<T, QcError>;
