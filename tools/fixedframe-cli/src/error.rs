//! Error types for the CLI.

use std::path::PathBuf;

use fixedframe_core::FrameError;
use thiserror::Error;

/// CLI-specific result type.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI error types.
#[derive(Error, Debug)]
pub enum CliError {
    /// Schema or codec error outside any single record.
    #[error("{0}")]
    Frame(#[from] FrameError),

    /// Codec error while processing one record of the input.
    #[error("record {index}: {source}")]
    Record {
        /// Zero-based position of the record in the input.
        index: usize,
        /// The underlying error.
        source: FrameError,
    },

    /// A JSON value cannot be stored in a field.
    #[error("cannot convert {path}: {reason}")]
    Conversion {
        /// Dotted field path.
        path: String,
        /// What was wrong with the value.
        reason: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid logging directive.
    #[error("invalid log filter: {0}")]
    LogFilter(#[from] tracing_subscriber::filter::ParseError),

    /// Invalid input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// File not found.
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),
}

impl CliError {
    /// Create a conversion error for the field at `path`.
    pub fn conversion(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Conversion { path: path.into(), reason: reason.into() }
    }
}
