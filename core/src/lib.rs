//! Synchronous client core for the mock model APIs.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round-trip, keeping the core deterministic and testable.
//!
//! # Design
//! - `ModelApiClient` is stateless; it holds only `base_url`.
//! - Each endpoint is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::ModelApiClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{
    ChatChoice, ChatCompletion, ChatCompletionRequest, ChatMessage, Embedding, EmbeddingsRequest,
    ErrorBody, GenerateRequest, GenerateResponse, LocalModel, ModelCard, ModelList, PullRequest,
    PullStatus, TagList, Usage, VersionInfo,
};
