//! Error types for the streak tracker.

use thiserror::Error;

/// Main error type for tracker operations.
#[derive(Debug, Error)]
pub enum StreakError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("State file is locked by another process")]
    Locked,

    #[error("Delivery failed: {0}")]
    Delivery(String),
}

impl From<serde_json::Error> for StreakError {
    fn from(e: serde_json::Error) -> Self {
        StreakError::Serialization(e.to_string())
    }
}

/// Result type for tracker operations.
pub type Result<T> = std::result::Result<T, StreakError>;
