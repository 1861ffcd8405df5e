//! OpenAPI document for the proxy endpoints.

use crate::api::models::{
    ChatCompletionRequest, ErrorDetail, Message, ModelInfo, ModelList, RootResponse,
};
use axum::Json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Chat Relay Proxy",
        description = "OpenAI-compatible chat-completions relay to a single upstream provider."
    ),
    paths(
        crate::api::handlers::root,
        crate::api::handlers::list_models,
        crate::api::handlers::chat_completions,
    ),
    components(schemas(
        RootResponse,
        ModelList,
        ModelInfo,
        ChatCompletionRequest,
        Message,
        ErrorDetail,
    )),
    tags((name = "proxy", description = "Relay endpoints"))
)]
pub struct ApiDoc;

/// Serve the generated OpenAPI document.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
