//! Error types for famplan.

use thiserror::Error;

/// Errors that can occur in famplan operations.
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("An event with id '{0}' already exists")]
    DuplicateEvent(String),

    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("Invalid time '{0}'. Expected HH:MM (24-hour)")]
    InvalidTime(String),

    #[error("Invalid passcode")]
    InvalidPasscode,

    #[error("Session expired, log in again")]
    SessionExpired,

    #[error("Remote store error: {0}")]
    Remote(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for PlannerError {
    fn from(err: serde_json::Error) -> Self {
        PlannerError::Serialization(err.to_string())
    }
}

/// Result type alias for famplan operations.
pub type PlannerResult<T> = Result<T, PlannerError>;
