//! CLI error types.

use spline_core::types::InterpolationError;
use thiserror::Error;

/// Errors surfaced by the `spline` commands.
#[derive(Error, Debug)]
pub enum CliError {
    /// Input file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Flag value that cannot be used
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Sample file with missing or malformed content
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Construction or evaluation failure
    #[error(transparent)]
    Interpolation(#[from] InterpolationError),

    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed CSV
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Unreadable configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
}

impl CliError {
    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
