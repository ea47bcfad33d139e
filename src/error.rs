use thiserror::Error;

/// Result type for booker operations.
pub type Result<T> = std::result::Result<T, BookerError>;

/// Errors that can occur while preparing or sending a booking submission.
#[derive(Debug, Error)]
pub enum BookerError {
    /// Form input failed validation; nothing was sent
    #[error("invalid booking field: {0}")]
    Validation(String),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A submission is already in flight on this controller
    #[error("a submission is already in flight")]
    AlreadyInFlight,

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}
