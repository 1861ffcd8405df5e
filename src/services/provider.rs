//! Provider variants and their fixed per-variant behavior.
//!
//! Both variants share one proxy implementation; everything that differs
//! between them (environment variable names, default base URL, default
//! request fields, model listing) lives in a [`ProviderProfile`].

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Supported upstream provider variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// DeepSeek-compatible endpoint with a static model list
    #[default]
    DeepSeek,
    /// NVIDIA NIM-compatible endpoint; models are listed by the upstream
    Nim,
}

impl ProviderKind {
    pub fn profile(self) -> &'static ProviderProfile {
        match self {
            ProviderKind::DeepSeek => &DEEPSEEK_PROFILE,
            ProviderKind::Nim => &NIM_PROFILE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProviderKind::DeepSeek => "deepseek",
            ProviderKind::Nim => "nim",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown provider '{0}' (expected 'deepseek' or 'nim')")]
pub struct UnknownProvider(String);

impl FromStr for ProviderKind {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "deepseek" => Ok(ProviderKind::DeepSeek),
            "nim" | "nvidia" | "nvidia-nim" => Ok(ProviderKind::Nim),
            other => Err(UnknownProvider(other.to_string())),
        }
    }
}

/// Defaults substituted for chat-completion fields the caller omitted.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatDefaults {
    pub model: &'static str,
    pub temperature: f64,
    pub top_p: f64,
    pub max_tokens: u32,
    pub stream: bool,
}

/// How `GET /v1/models` is answered.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelCatalog {
    /// A fixed list served locally, tagged with an owner
    Static {
        models: &'static [&'static str],
        owned_by: &'static str,
    },
    /// Forwarded to the upstream's own models endpoint
    Upstream,
}

/// Fixed description of one provider variant.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderProfile {
    pub kind: ProviderKind,
    /// Human-readable status line returned by `GET /`
    pub status_message: &'static str,
    pub api_key_env: &'static str,
    pub base_url_env: &'static str,
    pub default_base_url: &'static str,
    pub defaults: ChatDefaults,
    pub catalog: ModelCatalog,
}

impl ProviderProfile {
    /// Model ids advertised on `GET /`, if this variant advertises any.
    pub fn advertised_models(&self) -> Option<&'static [&'static str]> {
        match self.catalog {
            ModelCatalog::Static { models, .. } => Some(models),
            ModelCatalog::Upstream => None,
        }
    }
}

static DEEPSEEK_PROFILE: ProviderProfile = ProviderProfile {
    kind: ProviderKind::DeepSeek,
    status_message: "DeepSeek Proxy is running!",
    api_key_env: "DEEPSEEK_API_KEY",
    base_url_env: "DEEPSEEK_BASE_URL",
    default_base_url: "https://api.deepseek.com/v1",
    defaults: ChatDefaults {
        model: "deepseek-chat",
        temperature: 0.7,
        top_p: 1.0,
        max_tokens: 2048,
        stream: false,
    },
    catalog: ModelCatalog::Static {
        models: &["deepseek-chat", "deepseek-reasoner"],
        owned_by: "deepseek",
    },
};

static NIM_PROFILE: ProviderProfile = ProviderProfile {
    kind: ProviderKind::Nim,
    status_message: "NVIDIA NIM Proxy is running!",
    api_key_env: "NVIDIA_API_KEY",
    base_url_env: "NVIDIA_BASE_URL",
    default_base_url: "https://integrate.api.nvidia.com/v1",
    defaults: ChatDefaults {
        model: "meta/llama-3.1-8b-instruct",
        temperature: 0.7,
        top_p: 1.0,
        max_tokens: 1024,
        stream: false,
    },
    catalog: ModelCatalog::Upstream,
};
