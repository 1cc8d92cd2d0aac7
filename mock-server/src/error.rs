//! Error responses produced by the mock.
//!
//! Unknown routes are not errors here; they fall through to an empty 404.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Message returned to clients for any unparseable body.
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON in request body";

/// Message returned to clients when the size guard trips.
pub const TOO_LARGE_MESSAGE: &str = "Request body too large";

#[derive(Debug, Error)]
pub enum MockError {
    #[error("request body exceeds the {limit} byte limit")]
    RequestTooLarge { limit: u64 },

    #[error("invalid JSON in request body: {0}")]
    InvalidJson(String),
}

impl From<serde_json::Error> for MockError {
    fn from(err: serde_json::Error) -> Self {
        MockError::InvalidJson(err.to_string())
    }
}

impl IntoResponse for MockError {
    fn into_response(self) -> Response {
        match self {
            MockError::RequestTooLarge { limit } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                Json(json!({ "error": TOO_LARGE_MESSAGE, "max_bytes": limit })),
            )
                .into_response(),
            MockError::InvalidJson(detail) => {
                tracing::debug!(%detail, "rejecting malformed body");
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": INVALID_JSON_MESSAGE })),
                )
                    .into_response()
            }
        }
    }
}
