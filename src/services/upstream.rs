//! HTTP client for the upstream provider.
//!
//! A client is built for a single inbound request and dropped with it. For
//! streamed calls the client is consumed and the returned byte stream keeps
//! the upstream connection alive until it is dropped.
//!
//! The configured timeout bounds each phase separately (connect, waiting for
//! response headers, reading a buffered body). It never caps the total length
//! of a streamed reply; idle gaps in a stream are bounded by the relay.

use crate::core::config::ProviderConfig;
use crate::core::{AppError, Result};
use crate::transformer::UpstreamChatRequest;
use bytes::Bytes;
use futures::stream::Stream;
use serde_json::Value;
use std::error::Error;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Boxed upstream body stream, ready to hand to the relay.
pub type UpstreamByteStream =
    Pin<Box<dyn Stream<Item = std::result::Result<Bytes, reqwest::Error>> + Send>>;

/// Per-request client bound to one provider's base URL and key.
pub struct UpstreamClient {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    timeout: Duration,
}

impl UpstreamClient {
    pub fn new(provider: &ProviderConfig, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            api_base: provider.api_base.clone(),
            api_key: provider.api_key.clone(),
            timeout,
        })
    }

    /// Per-phase timeout; streamed replies use it as the idle limit between chunks.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run one upstream phase under the configured timeout.
    async fn within_timeout<T, F>(&self, url: &str, phase: &str, fut: F) -> Result<T>
    where
        F: Future<Output = std::result::Result<T, reqwest::Error>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result.map_err(|e| log_send_error(url, e)),
            Err(_) => {
                tracing::error!(
                    url = %url,
                    phase = phase,
                    timeout_secs = self.timeout.as_secs_f64(),
                    "HTTP request to provider timed out"
                );
                Err(AppError::Timeout(format!(
                    "upstream {} timed out after {:?}",
                    phase, self.timeout
                )))
            }
        }
    }

    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }

    pub fn models_url(&self) -> String {
        format!("{}/models", self.api_base)
    }

    fn post_chat(&self, body: &UpstreamChatRequest) -> reqwest::RequestBuilder {
        self.client
            .post(self.chat_completions_url())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(body)
    }

    /// Buffered chat completion. The upstream status is not inspected; its
    /// body is decoded as JSON and returned as-is.
    pub async fn chat_json(&self, body: &UpstreamChatRequest) -> Result<Value> {
        let url = self.chat_completions_url();
        let response = self
            .within_timeout(&url, "response", self.post_chat(body).send())
            .await?;

        tracing::debug!(
            url = %url,
            status = %response.status(),
            method = "POST",
            "HTTP request completed"
        );

        self.within_timeout(&url, "body read", response.json::<Value>())
            .await
    }

    /// Streamed chat completion. Resolves once response headers arrive; the
    /// body is returned unread.
    pub async fn chat_stream(self, body: &UpstreamChatRequest) -> Result<UpstreamByteStream> {
        let url = self.chat_completions_url();
        let response = self
            .within_timeout(&url, "response", self.post_chat(body).send())
            .await?;

        tracing::debug!(
            url = %url,
            status = %response.status(),
            method = "POST",
            "HTTP stream opened"
        );

        Ok(Box::pin(response.bytes_stream()))
    }

    /// Fetch the upstream's own model list and return it verbatim.
    pub async fn list_models(&self) -> Result<Value> {
        let url = self.models_url();
        let request = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json");
        let response = self
            .within_timeout(&url, "response", request.send())
            .await?;

        tracing::debug!(
            url = %url,
            status = %response.status(),
            method = "GET",
            "HTTP request completed"
        );

        self.within_timeout(&url, "body read", response.json::<Value>())
            .await
    }
}

fn log_send_error(url: &str, e: reqwest::Error) -> AppError {
    tracing::error!(
        url = %url,
        error = %e,
        error_source = ?e.source(),
        is_timeout = e.is_timeout(),
        is_connect = e.is_connect(),
        "HTTP request failed to provider"
    );
    AppError::from(e)
}
