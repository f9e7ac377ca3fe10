//! Error types for data operations
//!
//! Provides unified error handling for ingestion and export of track tables.

use thiserror::Error;

pub use crate::constants::{MAX_INGEST_ROWS, MAX_INGEST_SIZE_MB};

/// Errors that can occur during data operations
#[derive(Error, Debug)]
pub enum DataError {
    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed delimited text (bad quoting, invalid UTF-8, ...)
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// File is too large to ingest
    #[error("File too large: {size_mb}MB (max {max_mb}MB)")]
    TooLarge { size_mb: u64, max_mb: usize },

    /// Too many rows to ingest
    #[error("Too many rows: {rows} (max {max_rows})")]
    TooManyRows { rows: usize, max_rows: usize },

    /// Stream has no header row
    #[error("Empty file")]
    EmptyFile,

    /// Header row has no fields at all
    #[error("No columns found")]
    NoColumns,

    /// Header row has fields, but none of them name a track field
    #[error("No recognized track columns in header: {0}")]
    MissingColumns(String),

    /// Generic error message
    #[error("{0}")]
    Other(String),
}

/// Result type alias for data operations
pub type DataResult<T> = Result<T, DataError>;

impl From<String> for DataError {
    fn from(s: String) -> Self {
        DataError::Other(s)
    }
}

impl From<&str> for DataError {
    fn from(s: &str) -> Self {
        DataError::Other(s.to_string())
    }
}
