//! Error types for roster.

use thiserror::Error;

use crate::forms::FieldErrors;

/// Errors that can occur in roster operations.
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// The store answered with a non-success status (auth, constraint, bad RPC).
    #[error("Store error ({status}): {message}")]
    Store { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Unknown column '{0}'. Expected one of: id, event, assigned, date")]
    UnknownColumn(String),
}

impl From<reqwest::Error> for RosterError {
    fn from(e: reqwest::Error) -> Self {
        RosterError::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for RosterError {
    fn from(e: serde_json::Error) -> Self {
        RosterError::Serialization(e.to_string())
    }
}

/// Result type alias for roster operations.
pub type RosterResult<T> = Result<T, RosterError>;
