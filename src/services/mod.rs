//! Provider-facing services.
//!
//! This module holds the per-variant provider profiles and the HTTP client
//! that talks to the upstream.

pub mod provider;
pub mod upstream;

// Re-export commonly used types
pub use provider::{ChatDefaults, ModelCatalog, ProviderKind, ProviderProfile};
pub use upstream::{UpstreamByteStream, UpstreamClient};
