//! Chat Relay Proxy - Main entry point
//!
//! Reads configuration from the environment, then serves the relay until
//! SIGINT or SIGTERM.

use anyhow::{Context, Result};
use chat_relay_proxy::{
    build_router,
    core::{init_tracing, AppConfig, LogFormat},
    AppState,
};
use std::sync::Arc;
use tokio::signal;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (before reading any environment variables)
    dotenvy::dotenv().ok();

    // Tracing first, so configuration warnings are not lost
    init_tracing(LogFormat::from_env());
    let config = AppConfig::from_env()?;

    let provider = &config.provider;
    if !provider.has_api_key() {
        tracing::warn!(
            provider = %provider.kind,
            env = provider.kind.profile().api_key_env,
            "API key not set; upstream will reject requests"
        );
    }

    tracing::info!(
        provider = %provider.kind,
        base_url = %provider.api_base,
        api_key_configured = provider.has_api_key(),
        timeout_secs = config.request_timeout_secs,
        "using upstream provider"
    );

    let addr = config.bind_addr();
    let app = build_router(Arc::new(AppState::new(config)));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!("Starting chat relay proxy on {}", addr);
    tracing::info!("Endpoints: GET /, GET /v1/models, POST /v1/chat/completions, GET /openapi.json");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl+c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received SIGINT, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
