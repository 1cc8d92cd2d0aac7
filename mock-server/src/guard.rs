//! Request-size guard and per-request logging.
//!
//! Runs in front of every route, including the 404 fallbacks. The declared
//! Content-Length is compared against the limit before anything reads the
//! body; missing or unparseable lengths count as zero.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::config::ServerConfig;
use crate::error::MockError;

pub async fn limit_request_size(
    State(config): State<ServerConfig>,
    request: Request,
    next: Next,
) -> Response {
    let declared = declared_length(request.headers());
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    if declared > config.max_request_bytes {
        tracing::warn!(
            %method,
            %path,
            declared,
            limit = config.max_request_bytes,
            "rejecting oversized request"
        );
        return MockError::RequestTooLarge {
            limit: config.max_request_bytes,
        }
        .into_response();
    }

    tracing::info!(%method, %path, bytes = declared, "request");
    next.run(request).await
}

/// Content-Length as declared by the client, or 0 when absent or invalid.
pub fn declared_length(headers: &HeaderMap) -> u64 {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(0)
}
