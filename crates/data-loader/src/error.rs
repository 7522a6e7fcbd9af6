//! Error types for the data-loader crate.
//!
//! Every failure here means the catalog artifacts cannot be served. Callers
//! treat these as a data-unavailable condition rather than retrying.

use thiserror::Error;

/// Errors that can occur while loading the catalog and similarity artifacts
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line in an artifact couldn't be parsed
    ///
    /// Carries the artifact name and 1-based line number
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// A similarity row has the wrong number of columns
    #[error("Similarity matrix is not square: row {row} has {found} columns, expected {expected}")]
    NotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Catalog and similarity matrix disagree on the number of rows
    #[error("Similarity matrix has {matrix_rows} rows but catalog has {catalog_rows} movies")]
    DimensionMismatch {
        catalog_rows: usize,
        matrix_rows: usize,
    },

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
