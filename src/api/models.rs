//! API request and response models.
//!
//! Inbound chat bodies are handled as raw JSON (see [`crate::transformer`]);
//! [`ChatCompletionRequest`] documents the recognized shape for the OpenAPI
//! schema only.

use crate::services::provider::{ModelCatalog, ProviderProfile};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Payload of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[schema(example = json!({
    "status": "DeepSeek Proxy is running!",
    "models": ["deepseek-chat", "deepseek-reasoner"]
}))]
pub struct RootResponse {
    pub status: String,

    /// Supported model ids, for variants with a fixed catalog
    #[serde(skip_serializing_if = "Option::is_none")]
    pub models: Option<Vec<String>>,
}

impl RootResponse {
    pub fn for_profile(profile: &ProviderProfile) -> Self {
        Self {
            status: profile.status_message.to_string(),
            models: profile
                .advertised_models()
                .map(|models| models.iter().map(|m| m.to_string()).collect()),
        }
    }
}

/// Model list in OpenAI format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ModelList {
    pub object: String,
    pub data: Vec<ModelInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[schema(example = json!({"id": "deepseek-chat", "object": "model", "owned_by": "deepseek"}))]
pub struct ModelInfo {
    pub id: String,
    pub object: String,
    pub owned_by: String,
}

impl ModelList {
    /// The locally served list, or `None` when the catalog lives upstream.
    pub fn from_catalog(catalog: &ModelCatalog) -> Option<Self> {
        match catalog {
            ModelCatalog::Static { models, owned_by } => Some(Self {
                object: "list".to_string(),
                data: models
                    .iter()
                    .map(|id| ModelInfo {
                        id: id.to_string(),
                        object: "model".to_string(),
                        owned_by: owned_by.to_string(),
                    })
                    .collect(),
            }),
            ModelCatalog::Upstream => None,
        }
    }
}

/// Chat completion request following OpenAI API format.
///
/// Every field is optional; omitted fields take the provider default and any
/// other field is dropped before forwarding.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "model": "deepseek-chat",
    "messages": [
        {"role": "system", "content": "You are a helpful assistant."},
        {"role": "user", "content": "Hello!"}
    ],
    "temperature": 0.7,
    "top_p": 1.0,
    "max_tokens": 2048,
    "stream": false
}))]
pub struct ChatCompletionRequest {
    pub model: Option<String>,
    pub messages: Option<Vec<Message>>,
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
    pub max_tokens: Option<u32>,
    pub stream: Option<bool>,
}

/// A single message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"role": "user", "content": "Hello!"}))]
pub struct Message {
    /// Role: "system", "user", or "assistant"
    pub role: String,

    /// Message content
    pub content: String,
}

/// Failure body. Every error is reported this way with status 500.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({"detail": "error sending request for url (https://api.deepseek.com/v1/chat/completions)"}))]
pub struct ErrorDetail {
    pub detail: String,
}
