//! Scoring-service error types.
//!
//! Defined in `blocks-core` so the score reporter can downcast and
//! classify failures from any [`crate::traits::ScoreService`]
//! implementation without string matching.

use thiserror::Error;

/// Errors that can occur when talking to the flashcard or scoring API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API rejected the bearer token.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The set or leaderboard does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    Status { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),

    /// The response body could not be decoded.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build the appropriate variant for an HTTP error status.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => ApiError::Unauthorized(message),
            404 => ApiError::NotFound(message),
            _ => ApiError::Status { status, message },
        }
    }
}
