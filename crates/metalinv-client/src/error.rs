//! Error types for the enrollment API client

use thiserror::Error;

/// Errors that can occur when talking to the enrollment API
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP transport failed
    #[error("HTTP request failed: {0}")]
    Http(reqwest::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Request timeout
    #[error("Request timed out")]
    Timeout,

    /// API returned an error status
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from server
        message: String,
    },
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else {
            ClientError::Http(err)
        }
    }
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
