//! Structured error types for backend calls.
//!
//! Errors are displayed inline by the UI, so every variant renders as a short
//! human-readable line. `ApiError` is `Clone` because it travels from the
//! worker thread to the UI inside a response message.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response (connect, timeout, body read).
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-2xx status.
    #[error("HTTP {status} {status_text}")]
    Http { status: u16, status_text: String },

    /// The response body was not the JSON shape we expected.
    #[error("unexpected response: {0}")]
    Parse(String),
}

impl ApiError {
    pub fn http(status: reqwest::StatusCode) -> Self {
        ApiError::Http {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
        }
    }

    /// True for transport failures, as opposed to answers the backend gave.
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Parse(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Parse(e.to_string())
    }
}
