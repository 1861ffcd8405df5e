//! Request translation from the OpenAI chat-completions shape to the
//! upstream provider's body.
//!
//! Translation is a whitelist: only the six recognized fields are carried
//! over, each taking the caller's value when present or the provider default
//! when absent. Every other inbound field is dropped.

use crate::core::{AppError, Result};
use crate::services::provider::ChatDefaults;
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Fields forwarded upstream, in the order they are serialized.
pub const WHITELISTED_FIELDS: [&str; 6] = [
    "model",
    "messages",
    "temperature",
    "top_p",
    "max_tokens",
    "stream",
];

/// Body sent to the upstream chat-completions endpoint.
///
/// Values are kept as raw JSON so that whatever the caller sent (including
/// `null` or an unusual type) reaches the upstream untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpstreamChatRequest {
    pub model: Value,
    pub messages: Value,
    pub temperature: Value,
    pub top_p: Value,
    pub max_tokens: Value,
    pub stream: Value,
}

impl UpstreamChatRequest {
    /// Whether the caller asked for a streamed response.
    pub fn is_stream(&self) -> bool {
        is_truthy(&self.stream)
    }

    /// Model name for logging; empty when the caller sent a non-string.
    pub fn model_name(&self) -> &str {
        self.model.as_str().unwrap_or_default()
    }
}

/// Build the upstream body from an already-parsed inbound JSON value.
pub fn translate_chat_request(body: &Value, defaults: &ChatDefaults) -> Result<UpstreamChatRequest> {
    let obj = body.as_object().ok_or_else(|| {
        AppError::InvalidBody(format!(
            "expected a JSON object, got {}",
            json_type_name(body)
        ))
    })?;

    Ok(UpstreamChatRequest {
        model: field_or(obj, "model", || json!(defaults.model)),
        messages: field_or(obj, "messages", || Value::Array(Vec::new())),
        temperature: field_or(obj, "temperature", || json!(defaults.temperature)),
        top_p: field_or(obj, "top_p", || json!(defaults.top_p)),
        max_tokens: field_or(obj, "max_tokens", || json!(defaults.max_tokens)),
        stream: field_or(obj, "stream", || Value::Bool(defaults.stream)),
    })
}

/// Parse raw request bytes and translate them.
pub fn translate_chat_body(raw: &[u8], defaults: &ChatDefaults) -> Result<UpstreamChatRequest> {
    let body: Value = serde_json::from_slice(raw)?;
    translate_chat_request(&body, defaults)
}

fn field_or(obj: &Map<String, Value>, key: &str, default: impl FnOnce() -> Value) -> Value {
    obj.get(key).cloned().unwrap_or_else(default)
}

/// JSON truthiness: `false`, `null`, zero, and empty containers are false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
