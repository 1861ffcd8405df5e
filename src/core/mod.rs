//! Core functionality for the relay proxy.
//!
//! This module contains fundamental components used throughout the application:
//! - Configuration management
//! - Error handling
//! - Logging setup and request context
//! - HTTP middleware

pub mod config;
pub mod error;
pub mod logging;
pub mod middleware;

// Re-export commonly used types
pub use config::{AppConfig, LogFormat, ProviderConfig, ServerConfig};
pub use error::{AppError, Result};
pub use logging::{get_request_id, init_tracing, REQUEST_ID};
pub use middleware::{logging_middleware, request_id_middleware};
