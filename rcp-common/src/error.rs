//! Common error types for the recipe pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across pipeline steps
#[derive(Error, Debug)]
pub enum Error {
    /// Expected input file is missing, unreadable or cannot be parsed
    #[error("Input unavailable: {path}: {reason}")]
    InputUnavailable { path: PathBuf, reason: String },

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error while writing an artifact
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error while writing an artifact
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or command-line value
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Build an [`Error::InputUnavailable`] for `path`
    pub fn input_unavailable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Error::InputUnavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
