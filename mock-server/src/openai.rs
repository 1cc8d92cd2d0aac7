//! OpenAI-style endpoints.

use axum::Json;

use crate::types::{ChatCompletion, ModelList};

pub async fn list_models() -> Json<ModelList> {
    Json(ModelList::canned())
}

/// The request body is never inspected; any payload gets the same answer.
pub async fn chat_completions() -> Json<ChatCompletion> {
    Json(ChatCompletion::canned())
}
