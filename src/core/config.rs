//! Configuration management for the relay proxy.
//!
//! Configuration is read once from the process environment at startup and is
//! immutable afterwards. Handlers receive it through axum state rather than
//! reading the environment themselves.

use crate::services::provider::ProviderKind;
use anyhow::{Context, Result};
use serde::Serialize;

/// Main application configuration.
///
/// The log format is not part of it: tracing is set up from
/// [`LogFormat::from_env`] before this is read, so parse warnings are visible.
#[derive(Debug, Clone, Serialize)]
pub struct AppConfig {
    /// The single upstream provider this instance relays to
    pub provider: ProviderConfig,

    /// Server configuration (host, port)
    pub server: ServerConfig,

    /// Timeout in seconds for each upstream phase (connect, response headers,
    /// buffered body) and for idle gaps in a streamed reply
    pub request_timeout_secs: u64,
}

/// Upstream provider settings.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderConfig {
    /// Which provider variant to emulate
    pub kind: ProviderKind,

    /// Base URL for the provider's API, without trailing slash
    pub api_base: String,

    /// API key sent as a bearer token. Empty means unauthenticated calls.
    #[serde(skip_serializing)]
    pub api_key: String,
}

/// Server-specific configuration.
#[derive(Debug, Clone, Serialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// `LOG_FORMAT=json` selects JSON output; anything else is text.
    pub fn from_env() -> Self {
        match std::env::var("LOG_FORMAT") {
            Ok(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_request_timeout() -> u64 {
    120
}

impl ProviderConfig {
    /// Read the provider's key and base URL from its environment variables.
    ///
    /// A missing key is not an error here; the upstream rejects the call.
    pub fn from_env(kind: ProviderKind) -> Self {
        let profile = kind.profile();

        let api_key = std::env::var(profile.api_key_env).unwrap_or_default();
        let api_base = std::env::var(profile.base_url_env)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| profile.default_base_url.to_string());

        Self {
            kind,
            api_base: normalize_base_url(&api_base),
            api_key,
        }
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}

impl AppConfig {
    /// Build configuration from environment variables.
    ///
    /// `.env` loading is the caller's job so tests are not affected by a stray file.
    pub fn from_env() -> Result<Self> {
        let kind = match std::env::var("PROXY_PROVIDER") {
            Ok(raw) => raw
                .parse::<ProviderKind>()
                .with_context(|| format!("Invalid PROXY_PROVIDER value: {}", raw))?,
            Err(_) => ProviderKind::default(),
        };

        let mut server = ServerConfig::default();
        if let Ok(host) = std::env::var("HOST") {
            server.host = host;
        }
        if let Some(port) = parse_env::<u16>("PORT") {
            server.port = port;
        }

        let request_timeout_secs =
            parse_env::<u64>("REQUEST_TIMEOUT_SECS").unwrap_or_else(default_request_timeout);

        Ok(Self {
            provider: ProviderConfig::from_env(kind),
            server,
            request_timeout_secs,
        })
    }

    /// Convenience constructor used by tests and embedders.
    pub fn for_provider(kind: ProviderKind, api_base: &str, api_key: &str) -> Self {
        Self {
            provider: ProviderConfig {
                kind,
                api_base: normalize_base_url(api_base),
                api_key: api_key.to_string(),
            },
            server: ServerConfig::default(),
            request_timeout_secs: default_request_timeout(),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Parse a numeric environment variable, warning and ignoring it when malformed.
fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(var = name, value = %raw, "ignoring unparseable environment variable");
            None
        }
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        unsafe {
            for var in [
                "PROXY_PROVIDER",
                "HOST",
                "PORT",
                "REQUEST_TIMEOUT_SECS",
                "LOG_FORMAT",
                "DEEPSEEK_API_KEY",
                "DEEPSEEK_BASE_URL",
                "NVIDIA_API_KEY",
                "NVIDIA_BASE_URL",
            ] {
                std::env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_default_values() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(default_request_timeout(), 120);
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("https://api.deepseek.com/v1/"),
            "https://api.deepseek.com/v1"
        );
        assert_eq!(normalize_base_url(" http://x "), "http://x");
    }

    #[test]
    #[serial]
    fn test_from_env_defaults_to_deepseek() {
        clear_env();

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.provider.kind, ProviderKind::DeepSeek);
        assert_eq!(config.provider.api_base, "https://api.deepseek.com/v1");
        assert_eq!(config.provider.api_key, "");
        assert!(!config.provider.has_api_key());
        assert_eq!(config.bind_addr(), "0.0.0.0:8000");
        assert_eq!(config.request_timeout_secs, 120);
        assert_eq!(LogFormat::from_env(), LogFormat::Text);
    }

    #[test]
    #[serial]
    fn test_from_env_nim_variant() {
        clear_env();
        unsafe {
            std::env::set_var("PROXY_PROVIDER", "nim");
            std::env::set_var("NVIDIA_API_KEY", "nvapi-test");
        }

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.provider.kind, ProviderKind::Nim);
        assert_eq!(
            config.provider.api_base,
            "https://integrate.api.nvidia.com/v1"
        );
        assert_eq!(config.provider.api_key, "nvapi-test");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_env_var_overrides() {
        clear_env();
        unsafe {
            std::env::set_var("DEEPSEEK_BASE_URL", "http://127.0.0.1:9999/v1/");
            std::env::set_var("HOST", "127.0.0.1");
            std::env::set_var("PORT", "9000");
            std::env::set_var("REQUEST_TIMEOUT_SECS", "30");
            std::env::set_var("LOG_FORMAT", "JSON");
        }

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.provider.api_base, "http://127.0.0.1:9999/v1");
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(LogFormat::from_env(), LogFormat::Json);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_malformed_numbers_fall_back() {
        clear_env();
        unsafe {
            std::env::set_var("PORT", "not-a-port");
            std::env::set_var("REQUEST_TIMEOUT_SECS", "-5");
        }

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.request_timeout_secs, 120);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_unknown_provider_is_error() {
        clear_env();
        unsafe {
            std::env::set_var("PROXY_PROVIDER", "openrouter");
        }

        let result = AppConfig::from_env();
        assert!(result.is_err());

        clear_env();
    }

    #[test]
    fn test_api_key_not_serialized() {
        let config =
            AppConfig::for_provider(ProviderKind::DeepSeek, "http://localhost/v1", "secret");
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
        assert!(json.contains("http://localhost/v1"));
    }
}
