//! Error types for the data-loader crate.

use thiserror::Error;

/// Errors that can occur while loading, parsing, or appending rating data.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// I/O error occurred while reading a data file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Line in a data file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Structurally valid input that violates a domain invariant
    /// (e.g. a rating outside the 1.0-5.0 scale)
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
