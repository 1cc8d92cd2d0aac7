//! Stateless HTTP request builder and response parser for the model APIs.
//!
//! # Design
//! `ModelApiClient` holds only a `base_url` and carries no mutable state
//! between calls. Each endpoint is split into a `build_*` method that produces
//! an `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! Streamed generate responses arrive as one NDJSON body and are split by
//! `parse_generate_stream`.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    ChatCompletion, ChatCompletionRequest, Embedding, EmbeddingsRequest, ErrorBody,
    GenerateRequest, GenerateResponse, ModelList, PullRequest, PullStatus, TagList, VersionInfo,
};

/// Synchronous, stateless client for the OpenAI- and Ollama-style APIs.
#[derive(Debug, Clone)]
pub struct ModelApiClient {
    base_url: String,
}

impl ModelApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // --- build ---

    pub fn build_health(&self) -> HttpRequest {
        self.get("/health")
    }

    pub fn build_list_models(&self) -> HttpRequest {
        self.get("/v1/models")
    }

    pub fn build_chat_completion(
        &self,
        input: &ChatCompletionRequest,
    ) -> Result<HttpRequest, ApiError> {
        self.post_json("/v1/chat/completions", input)
    }

    pub fn build_list_tags(&self) -> HttpRequest {
        self.get("/api/tags")
    }

    pub fn build_version(&self) -> HttpRequest {
        self.get("/api/version")
    }

    /// Build a generate request. Whether the answer streams is decided by
    /// `input.stream`; pair with `parse_generate` or `parse_generate_stream`.
    pub fn build_generate(&self, input: &GenerateRequest) -> Result<HttpRequest, ApiError> {
        self.post_json("/api/generate", input)
    }

    pub fn build_pull(&self, input: &PullRequest) -> Result<HttpRequest, ApiError> {
        self.post_json("/api/pull", input)
    }

    pub fn build_embeddings(&self, input: &EmbeddingsRequest) -> Result<HttpRequest, ApiError> {
        self.post_json("/api/embeddings", input)
    }

    // --- parse ---

    pub fn parse_health(&self, response: HttpResponse) -> Result<String, ApiError> {
        check_status(&response, 200)?;
        Ok(response.body)
    }

    pub fn parse_list_models(&self, response: HttpResponse) -> Result<ModelList, ApiError> {
        parse_json(response)
    }

    pub fn parse_chat_completion(
        &self,
        response: HttpResponse,
    ) -> Result<ChatCompletion, ApiError> {
        parse_json(response)
    }

    pub fn parse_list_tags(&self, response: HttpResponse) -> Result<TagList, ApiError> {
        parse_json(response)
    }

    pub fn parse_version(&self, response: HttpResponse) -> Result<VersionInfo, ApiError> {
        parse_json(response)
    }

    pub fn parse_generate(&self, response: HttpResponse) -> Result<GenerateResponse, ApiError> {
        parse_json(response)
    }

    /// Split an NDJSON generate body into its chunks. The stream must end
    /// with a `done` chunk.
    pub fn parse_generate_stream(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<GenerateResponse>, ApiError> {
        check_status(&response, 200)?;
        let chunks = response
            .body
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str::<GenerateResponse>(line)
                    .map_err(|e| ApiError::DeserializationError(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        match chunks.last() {
            Some(last) if last.done => Ok(chunks),
            _ => Err(ApiError::IncompleteStream),
        }
    }

    pub fn parse_pull(&self, response: HttpResponse) -> Result<PullStatus, ApiError> {
        parse_json(response)
    }

    pub fn parse_embeddings(&self, response: HttpResponse) -> Result<Embedding, ApiError> {
        parse_json(response)
    }

    fn get(&self, path: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}{path}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    fn post_json<T: Serialize>(&self, path: &str, input: &T) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}{path}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response, 200)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    match response.status {
        status if status == expected => Ok(()),
        400 => {
            let message = serde_json::from_str::<ErrorBody>(&response.body)
                .map(|b| b.error)
                .unwrap_or_else(|_| response.body.clone());
            Err(ApiError::BadRequest(message))
        }
        404 => Err(ApiError::NotFound),
        413 => Err(ApiError::PayloadTooLarge),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}
