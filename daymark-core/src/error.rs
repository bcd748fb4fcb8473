//! Error types for the daymark ecosystem.

use thiserror::Error;

/// Errors that can occur in daymark operations.
#[derive(Error, Debug)]
pub enum DaymarkError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Sync transport error: {0}")]
    Transport(String),

    #[error("Invalid sync token: {0}")]
    InvalidToken(String),

    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rusqlite::Error> for DaymarkError {
    fn from(err: rusqlite::Error) -> Self {
        DaymarkError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for DaymarkError {
    fn from(err: serde_json::Error) -> Self {
        DaymarkError::Serialization(err.to_string())
    }
}

/// Result type alias for daymark operations.
pub type DaymarkResult<T> = Result<T, DaymarkError>;
