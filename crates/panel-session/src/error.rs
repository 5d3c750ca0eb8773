//! Storage error types.

use thiserror::Error;

/// Errors raised by a session storage backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backend could not be reached at all (storage disabled, no window).
    #[error("session storage unavailable: {0}")]
    Unavailable(String),

    /// A single read or write failed.
    #[error("session storage operation on {key} failed: {message}")]
    Operation { key: String, message: String },
}

impl StoreError {
    /// Build an operation error for a key.
    pub fn operation(key: &str, message: impl Into<String>) -> Self {
        StoreError::Operation {
            key: key.to_string(),
            message: message.into(),
        }
    }
}
