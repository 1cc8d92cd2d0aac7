//! Ollama-style endpoints.
//!
//! `generate` and `embeddings` are the only handlers that read the body, and
//! only to check it is JSON. Nothing in the payload changes the answer except
//! a boolean `stream` flag on generate.

use std::time::Duration;

use axum::{
    body::{Body, Bytes},
    extract::{rejection::BytesRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use futures_util::{stream, StreamExt};
use serde::Serialize;
use serde_json::Value;

use crate::config::ServerConfig;
use crate::error::MockError;
use crate::types::{Embedding, GenerateResponse, PullStatus, TagList, VersionInfo};

pub const NDJSON_CONTENT_TYPE: &str = "application/x-ndjson";

/// Pause before each streamed chunk after the first, so every chunk reaches
/// the client as its own write.
pub const STREAM_CHUNK_INTERVAL: Duration = Duration::from_millis(10);

pub async fn list_tags() -> Json<TagList> {
    Json(TagList::canned())
}

pub async fn version() -> Json<VersionInfo> {
    Json(VersionInfo::canned())
}

pub async fn pull() -> Json<PullStatus> {
    Json(PullStatus::canned())
}

pub async fn generate(
    State(config): State<ServerConfig>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, MockError> {
    let request = read_json(body, config.max_request_bytes)?;
    if wants_stream(&request) {
        Ok(stream_generate(STREAM_CHUNK_INTERVAL))
    } else {
        Ok(Json(GenerateResponse::canned()).into_response())
    }
}

pub async fn embeddings(
    State(config): State<ServerConfig>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Embedding>, MockError> {
    read_json(body, config.max_request_bytes)?;
    Ok(Json(Embedding::canned()))
}

/// Parse a body as arbitrary JSON. A body that overflowed the limit while
/// being read (no usable Content-Length) is reported as too large.
fn read_json(body: Result<Bytes, BytesRejection>, limit: u64) -> Result<Value, MockError> {
    let bytes = match body {
        Ok(bytes) => bytes,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return Err(MockError::RequestTooLarge { limit });
        }
        Err(rejection) => return Err(MockError::InvalidJson(rejection.body_text())),
    };
    Ok(serde_json::from_slice(&bytes)?)
}

/// Only a literal `true` turns streaming on.
fn wants_stream(request: &Value) -> bool {
    request
        .get("stream")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

fn stream_generate(interval: Duration) -> Response {
    let chunks = GenerateResponse::canned_chunks();
    let lines = stream::iter(chunks.into_iter().enumerate()).then(move |(index, chunk)| async move {
        if index > 0 {
            tokio::time::sleep(interval).await;
        }
        tracing::debug!(index, done = chunk.done, "sending generate chunk");
        ndjson_line(&chunk)
    });

    (
        [(header::CONTENT_TYPE, NDJSON_CONTENT_TYPE)],
        Body::from_stream(lines),
    )
        .into_response()
}

fn ndjson_line<T: Serialize>(value: &T) -> Result<Bytes, serde_json::Error> {
    let mut line = serde_json::to_vec(value)?;
    line.push(b'\n');
    Ok(Bytes::from(line))
}
