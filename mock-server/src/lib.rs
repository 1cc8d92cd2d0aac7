//! Mock model-serving server for integration tests.
//!
//! # Overview
//! Emulates an OpenAI-style chat-completions API and an Ollama-style
//! generate/embeddings API. Every answer is a canned literal chosen by method
//! and path; nothing is remembered between requests.
//!
//! # Design
//! - Unknown paths, and known paths hit with the wrong method, get an empty
//!   404 (never 405).
//! - A middleware checks the declared Content-Length against
//!   `ServerConfig::max_request_bytes` before any handler runs.
//! - The router's only state is the immutable `ServerConfig`.

pub mod config;
pub mod error;
pub mod guard;
pub mod ollama;
pub mod openai;
pub mod types;

use std::future::Future;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;

pub use config::{Cli, ServerConfig, DEFAULT_PORT, MAX_REQUEST_BYTES};
pub use error::MockError;

pub fn app(config: ServerConfig) -> Router {
    let body_limit = usize::try_from(config.max_request_bytes).unwrap_or(usize::MAX);

    Router::new()
        .route("/health", get(health))
        .route("/v1/models", get(openai::list_models))
        .route("/v1/chat/completions", post(openai::chat_completions))
        .route("/api/tags", get(ollama::list_tags))
        .route("/api/version", get(ollama::version))
        .route("/api/generate", post(ollama::generate))
        .route("/api/pull", post(ollama::pull))
        .route("/api/embeddings", post(ollama::embeddings))
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn_with_state(config, guard::limit_request_size))
        .with_state(config)
}

/// Serve until Ctrl+C (or SIGTERM on Unix).
pub async fn run(listener: TcpListener, config: ServerConfig) -> Result<(), std::io::Error> {
    serve(listener, config, shutdown_signal()).await
}

/// Serve until `shutdown` resolves, then let in-flight responses finish.
pub async fn serve<F>(
    listener: TcpListener,
    config: ServerConfig,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app(config))
        .with_graceful_shutdown(shutdown)
        .await
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down mock server");
}

async fn health() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain")], "OK")
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
