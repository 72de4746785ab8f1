//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed at the network level
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status code
    #[error("HTTP error: status {0}")]
    Status(reqwest::StatusCode),

    /// API envelope reported a failure
    #[error("API error: {0}")]
    Api(String),

    /// Response body did not match a recognized envelope shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<shared::EnvelopeError> for ClientError {
    fn from(err: shared::EnvelopeError) -> Self {
        match err {
            shared::EnvelopeError::Api(message) => ClientError::Api(message),
            err @ shared::EnvelopeError::MissingPagination => {
                ClientError::InvalidResponse(err.to_string())
            }
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
