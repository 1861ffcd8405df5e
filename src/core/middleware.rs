//! HTTP middleware for request tracking and access logging.

use crate::core::logging::{generate_request_id, REQUEST_ID};
use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

pub static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Assign every request an ID and run the rest of the stack inside its scope.
///
/// An inbound `x-request-id` is reused when it is a sane length; otherwise a
/// fresh UUID is generated. The ID is echoed on the response.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty() && v.len() <= 128)
        .map(str::to_string)
        .unwrap_or_else(generate_request_id);

    let mut response = REQUEST_ID
        .scope(request_id.clone(), next.run(request))
        .await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(X_REQUEST_ID.clone(), value);
    }

    response
}

/// Access log: method, path, status and duration, leveled by status class.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let duration_ms = start.elapsed().as_millis() as u64;
    let request_id = crate::core::logging::get_request_id();

    match status {
        500.. => tracing::error!(request_id, method, path, status, duration_ms, "request"),
        400..=499 => tracing::warn!(request_id, method, path, status, duration_ms, "request"),
        _ => tracing::info!(request_id, method, path, status, duration_ms, "request"),
    }

    response
}
