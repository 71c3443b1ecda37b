use thiserror::Error;

/// Errors that can arise while interacting with the quest tracker.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Wrapper around IO errors (directory creation, store writes).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapper around serde_json serialization errors.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Returned when a username or quest name fails validation.
    #[error("validation error: {0}")]
    Validation(#[from] crate::validation::ValidationError),
}
