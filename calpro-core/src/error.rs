//! Error types for calpro.

use thiserror::Error;

/// Errors that can occur in calpro operations.
#[derive(Error, Debug)]
pub enum CalProError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid file name pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Invalid value '{value}' for setting '{key}': {reason}")]
    InvalidSetting {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Host error: {0}")]
    Host(String),

    #[error("Path '{0}' is outside the vault")]
    PathOutsideVault(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for calpro operations.
pub type CalProResult<T> = Result<T, CalProError>;
