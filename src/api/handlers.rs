//! HTTP request handlers for the relay proxy.

use crate::api::models::{ErrorDetail, ModelList, RootResponse};
use crate::api::streaming::relay_response;
use crate::core::config::AppConfig;
use crate::core::{AppError, Result};
use crate::services::provider::ProviderProfile;
use crate::services::UpstreamClient;
use crate::transformer::translate_chat_body;
use axum::{
    body::Body,
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use std::time::Duration;

/// Shared application state. Immutable for the life of the process.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub profile: &'static ProviderProfile,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let profile = config.provider.kind.profile();
        Self { config, profile }
    }

    fn upstream_client(&self) -> Result<UpstreamClient> {
        UpstreamClient::new(
            &self.config.provider,
            Duration::from_secs(self.config.request_timeout_secs),
        )
    }
}

/// Liveness/info endpoint. Never touches the upstream.
#[utoipa::path(
    get,
    path = "/",
    tag = "proxy",
    responses((status = 200, description = "Proxy status", body = RootResponse))
)]
pub async fn root(State(state): State<Arc<AppState>>) -> Json<RootResponse> {
    Json(RootResponse::for_profile(state.profile))
}

/// List available models.
///
/// Served locally for variants with a fixed catalog, otherwise forwarded to
/// the upstream and relayed verbatim.
#[utoipa::path(
    get,
    path = "/v1/models",
    tag = "proxy",
    responses(
        (status = 200, description = "Model list", body = ModelList),
        (status = 500, description = "Upstream failure", body = ErrorDetail)
    )
)]
#[tracing::instrument(skip(state), fields(provider = %state.profile.kind))]
pub async fn list_models(State(state): State<Arc<AppState>>) -> Result<Response> {
    if let Some(list) = ModelList::from_catalog(&state.profile.catalog) {
        return Ok(Json(list).into_response());
    }

    tracing::debug!("Forwarding model listing to upstream");
    let client = state.upstream_client()?;
    let models = client.list_models().await?;
    Ok(Json(models).into_response())
}

/// Handle chat completion requests.
///
/// The body is parsed loosely, translated to the whitelisted upstream shape,
/// and forwarded. Streamed replies are relayed chunk by chunk; buffered
/// replies are returned as the upstream's JSON with status 200.
#[utoipa::path(
    post,
    path = "/v1/chat/completions",
    tag = "proxy",
    request_body = crate::api::models::ChatCompletionRequest,
    responses(
        (status = 200, description = "Upstream chat completion, or a text/event-stream relay when stream is true"),
        (status = 500, description = "Any processing or upstream failure", body = ErrorDetail)
    )
)]
#[tracing::instrument(skip(state, body), fields(provider = %state.profile.kind))]
pub async fn chat_completions(State(state): State<Arc<AppState>>, body: Body) -> Result<Response> {
    let raw = axum::body::to_bytes(body, usize::MAX)
        .await
        .map_err(|e| AppError::Internal(format!("failed to read request body: {}", e)))?;

    let upstream_body = translate_chat_body(&raw, &state.profile.defaults)?;
    let is_stream = upstream_body.is_stream();

    tracing::debug!(
        model = %upstream_body.model_name(),
        stream = is_stream,
        "Processing chat completion request"
    );

    let client = state.upstream_client()?;

    if is_stream {
        let idle_timeout = client.timeout();
        let upstream = client.chat_stream(&upstream_body).await?;
        Ok(relay_response(upstream, idle_timeout))
    } else {
        let response_data = client.chat_json(&upstream_body).await?;
        Ok(Json(response_data).into_response())
    }
}
