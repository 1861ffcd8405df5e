//! API layer for the relay proxy.
//!
//! This module contains the HTTP handlers, request/response models, the
//! streaming relay, and router assembly.

pub mod handlers;
pub mod models;
pub mod openapi;
pub mod streaming;

// Re-export commonly used types
pub use handlers::{chat_completions, list_models, root, AppState};
pub use models::{ChatCompletionRequest, ErrorDetail, ModelInfo, ModelList, RootResponse};
pub use openapi::{openapi_json, ApiDoc};
pub use streaming::{relay_response, UpstreamRelay};

use crate::core::middleware::{logging_middleware, request_id_middleware};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the router with every endpoint and the logging middleware stack.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/v1/models", get(list_models))
        .route("/v1/chat/completions", post(chat_completions))
        .route("/openapi.json", get(openapi_json))
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(logging_middleware))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state)
}
