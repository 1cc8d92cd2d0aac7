//! Error types for the model API client.
//!
//! # Design
//! The mock only produces three error statuses (400, 404, 413), so each gets
//! its own variant. Anything else lands in `HttpError` with the raw status
//! and body for debugging.

use thiserror::Error;

/// Errors returned by `ModelApiClient` parse and build methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404: no such route for this method and path.
    #[error("resource not found")]
    NotFound,

    /// The server returned 400, carrying its `error` message when present.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The server returned 413: the declared body exceeded its limit.
    #[error("request body too large")]
    PayloadTooLarge,

    /// The server returned some other unexpected status.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// A streamed generate response ended without a `done` chunk.
    #[error("stream ended before a done chunk")]
    IncompleteStream,
}
