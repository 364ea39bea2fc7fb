//! Error types for the Rave API client.

use thiserror::Error;

/// Errors that can occur when talking to the Rave API.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Authentication required but no token available, or the token was rejected
    #[error("Authentication required")]
    AuthRequired,

    /// Login failed (invalid credentials)
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// Resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid base URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Rejected before sending (empty query, empty name, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),
}

impl From<url::ParseError> for ClientError {
    fn from(e: url::ParseError) -> Self {
        Self::InvalidUrl(e.to_string())
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
