//! Error types for class-gateway.

use thiserror::Error;

/// Errors that can occur when talking to the class management backend.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// HTTP request failed (transport, timeout or body decoding).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The backend answered with a non-success status code.
    #[error("upstream status {status}: {message}")]
    Status { status: i64, message: String },

    /// A field the caller depends on was absent from the response.
    #[error("response missing field: {0}")]
    MissingField(&'static str),

    /// Invalid configuration (bad header name or value, bad URL).
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl GatewayError {
    /// Whether the failure happened below the HTTP response level
    /// (connection refused, timeout, request could not be sent).
    ///
    /// Only these are worth retrying; a well-formed error response is not.
    pub fn is_transport(&self) -> bool {
        match self {
            GatewayError::Http(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            _ => false,
        }
    }
}
