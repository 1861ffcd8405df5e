//! Chat Relay Proxy - an OpenAI-compatible front for a single LLM provider
//!
//! This library accepts OpenAI-style chat-completions calls, maps them onto
//! one upstream provider's schema, and relays the reply:
//!
//! - **Whitelisted translation**: only `model`, `messages`, `temperature`,
//!   `top_p`, `max_tokens` and `stream` are forwarded, with per-provider defaults
//! - **Streaming relay**: upstream Server-Sent Events are forwarded byte for byte
//! - **Provider variants**: DeepSeek-compatible and NVIDIA NIM-compatible upstreams
//!
//! # Architecture
//!
//! - [`core`]: Configuration, errors, logging, middleware
//! - [`api`]: HTTP handlers, models, streaming relay, router
//! - [`services`]: Provider profiles and the upstream client
//! - [`transformer`]: Inbound-to-upstream request translation
//!
//! # Configuration
//!
//! - `PROXY_PROVIDER`: `deepseek` (default) or `nim`
//! - `DEEPSEEK_API_KEY` / `DEEPSEEK_BASE_URL`, or `NVIDIA_API_KEY` / `NVIDIA_BASE_URL`
//! - `HOST` (default: 0.0.0.0), `PORT` (default: 8000)
//! - `REQUEST_TIMEOUT_SECS`: Upstream timeout in seconds (default: 120)
//! - `LOG_FORMAT`: `text` (default) or `json`

pub mod api;
pub mod core;
pub mod services;
pub mod transformer;

// Re-export commonly used types for convenience
pub use api::{build_router, AppState};
pub use self::core::{AppConfig, AppError, Result};
pub use services::{ProviderKind, UpstreamClient};
