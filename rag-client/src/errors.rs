//! Unified error type for backend requests.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors produced by [`RagClient`](crate::RagClient).
#[derive(Debug, Error)]
pub enum ClientError {
    /// Invalid base URL (empty or missing http/https).
    #[error("invalid backend endpoint: {0}")]
    InvalidEndpoint(String),

    /// Transport/HTTP client error.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-successful HTTP status from the backend.
    #[error("unexpected HTTP status {status} from {url}: {snippet}")]
    HttpStatus {
        /// Numeric HTTP status code.
        status: StatusCode,
        /// Request URL.
        url: String,
        /// Short snippet of the response body.
        snippet: String,
    },

    /// Backend envelope reported `status != "success"`.
    #[error("{0}")]
    Backend(String),

    /// Unexpected/invalid response payload.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// Result alias for backend operations.
pub type Result<T> = std::result::Result<T, ClientError>;
