//! Error types and handling for the relay proxy.
//!
//! The proxy reports exactly one kind of failure to callers: every error,
//! whatever its source, becomes HTTP 500 with a `{"detail": "..."}` body
//! carrying the error's message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP request errors from the reqwest client (connect, timeout, body read)
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    /// A single upstream phase (headers, buffered body) exceeded the configured timeout
    #[error("{0}")]
    Timeout(String),

    /// JSON parse errors for either the inbound body or the upstream reply
    #[error("{0}")]
    Serialization(#[from] serde_json::Error),

    /// Inbound body parsed but is not usable (e.g. not a JSON object)
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Generic internal server errors with custom message
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Short classification used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Request(e) if e.is_timeout() => "timeout",
            AppError::Request(e) if e.is_connect() => "connect",
            AppError::Request(_) => "request",
            AppError::Timeout(_) => "timeout",
            AppError::Serialization(_) => "serialization",
            AppError::InvalidBody(_) => "invalid_body",
            AppError::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(kind = self.kind(), error = %self, "request failed");

        let body = Json(json!({ "detail": self.to_string() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

/// Convenience type alias for Results using [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;
