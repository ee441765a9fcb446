//! Error types for the schedule join.
//!
//! - [`CsvError`] - reading, decoding and writing tabular files
//! - [`ConfigError`] - invalid options, environment values or override files
//! - [`JoinError`] - top-level run errors
//!
//! Conversions are automatic via `From`, so `?` works across layers.
//! A lookup that finds nothing is never an error: it yields an empty cell.

use std::path::PathBuf;

use thiserror::Error;

// =============================================================================
// CSV Errors
// =============================================================================

/// Errors while reading or writing a CSV file.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read or create a file.
    #[error("Cannot access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Bytes could not be decoded with the detected encoding.
    #[error("Failed to decode content as {0}")]
    Encoding(String),

    /// Malformed CSV content.
    #[error("Invalid CSV at line {line}: {message}")]
    Parse { line: u64, message: String },

    /// Failed to serialize an output row.
    #[error("Failed to write CSV: {0}")]
    Write(#[from] csv::Error),
}

impl CsvError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors in run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable holds a value that cannot be parsed.
    #[error("Invalid value for {key}: '{value}'")]
    InvalidEnv { key: String, value: String },

    /// Home and away names cannot come from the same column.
    #[error("Home and away columns must differ (both are {0})")]
    SameColumns(usize),

    /// The competitions override file is unreadable or not a JSON object of strings.
    #[error("Invalid competitions file '{path}': {message}")]
    Competitions { path: PathBuf, message: String },
}

// =============================================================================
// Run Errors (top-level)
// =============================================================================

/// Top-level error returned by [`crate::transform::pipeline::run`].
#[derive(Debug, Error)]
pub enum JoinError {
    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The run summary could not be written.
    #[error("Failed to write report '{path}': {message}")]
    Report { path: PathBuf, message: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for a join run.
pub type JoinResult<T> = Result<T, JoinError>;
