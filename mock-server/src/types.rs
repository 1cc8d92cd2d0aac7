//! Response bodies served by the mock, and the canned values that fill them.
//!
//! Field names mirror the upstream APIs exactly: consumers of the mock parse
//! these shapes, so renaming a field is a breaking change.

use serde::{Deserialize, Serialize};

pub const MODEL_NAME: &str = "qwen2.5-coder:32b";
pub const CREATED: i64 = 1_700_000_000;
pub const CREATED_AT: &str = "2024-01-01T00:00:00Z";
pub const MODEL_SIZE: i64 = 19_851_336_814;
pub const MODEL_DIGEST: &str =
    "sha256:4bd6cbf2d094264457a17aab6bd6acd1ed7a72fb8f8be3cfb193f63c78dd56df";
pub const VERSION: &str = "0.1.0";

pub const EMBEDDING_DIMENSIONS: usize = 768;
pub const EMBEDDING_VALUE: f64 = 0.1;

/// Fragments of the generated text, one per streamed chunk.
pub const GENERATE_FRAGMENTS: [&str; 3] = ["This is ", "a mock ", "response."];

// ---------------------------------------------------------------------------
// OpenAI-style
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelCard {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub owned_by: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelList {
    pub models: Vec<ModelCard>,
}

impl ModelList {
    pub fn canned() -> Self {
        Self {
            models: vec![ModelCard {
                id: MODEL_NAME.to_string(),
                object: "model".to_string(),
                created: CREATED,
                owned_by: "mistral".to_string(),
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatChoice {
    pub index: u32,
    pub message: ChatMessage,
    pub finish_reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl Usage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletion {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub model: String,
    pub choices: Vec<ChatChoice>,
    pub usage: Usage,
}

impl ChatCompletion {
    pub fn canned() -> Self {
        Self {
            id: "chatcmpl-123".to_string(),
            object: "chat.completion".to_string(),
            created: CREATED,
            model: MODEL_NAME.to_string(),
            choices: vec![ChatChoice {
                index: 0,
                message: ChatMessage {
                    role: "assistant".to_string(),
                    content: "Hello! This is a mock response.".to_string(),
                },
                finish_reason: "stop".to_string(),
            }],
            usage: Usage::new(10, 20),
        }
    }
}

// ---------------------------------------------------------------------------
// Ollama-style
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalModel {
    pub name: String,
    pub modified_at: String,
    pub size: i64,
    pub digest: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagList {
    pub models: Vec<LocalModel>,
}

impl TagList {
    pub fn canned() -> Self {
        Self {
            models: vec![LocalModel {
                name: MODEL_NAME.to_string(),
                modified_at: CREATED_AT.to_string(),
                size: MODEL_SIZE,
                digest: MODEL_DIGEST.to_string(),
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    pub version: String,
}

impl VersionInfo {
    pub fn canned() -> Self {
        Self {
            version: VERSION.to_string(),
        }
    }
}

/// Timing and token statistics attached to a finished generation.
/// Durations are nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateStats {
    pub total_duration: u64,
    pub load_duration: u64,
    pub prompt_eval_count: u32,
    pub prompt_eval_duration: u64,
    pub eval_count: u32,
    pub eval_duration: u64,
}

impl GenerateStats {
    pub fn canned() -> Self {
        Self {
            total_duration: 1_000_000_000,
            load_duration: 100_000_000,
            prompt_eval_count: 10,
            prompt_eval_duration: 200_000_000,
            eval_count: 20,
            eval_duration: 700_000_000,
        }
    }
}

/// One generate object: either the whole answer or one streamed chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub model: String,
    pub created_at: String,
    pub response: String,
    pub done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Vec<i32>>,
    #[serde(flatten)]
    pub stats: Option<GenerateStats>,
}

impl GenerateResponse {
    pub fn canned() -> Self {
        Self {
            model: MODEL_NAME.to_string(),
            created_at: CREATED_AT.to_string(),
            response: GENERATE_FRAGMENTS.concat(),
            done: true,
            context: Some(vec![1, 2, 3]),
            stats: Some(GenerateStats::canned()),
        }
    }

    /// The streamed form of [`GenerateResponse::canned`]. Only the last
    /// chunk is `done` and carries statistics.
    pub fn canned_chunks() -> Vec<Self> {
        let last = GENERATE_FRAGMENTS.len() - 1;
        GENERATE_FRAGMENTS
            .iter()
            .enumerate()
            .map(|(i, fragment)| {
                let done = i == last;
                Self {
                    model: MODEL_NAME.to_string(),
                    created_at: CREATED_AT.to_string(),
                    response: (*fragment).to_string(),
                    done,
                    context: done.then(|| vec![1, 2, 3]),
                    stats: done.then(GenerateStats::canned),
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullStatus {
    pub status: String,
    pub digest: String,
    pub total: i64,
    pub completed: i64,
}

impl PullStatus {
    pub fn canned() -> Self {
        Self {
            status: "success".to_string(),
            digest: MODEL_DIGEST.to_string(),
            total: MODEL_SIZE,
            completed: MODEL_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding {
    pub embedding: Vec<f64>,
}

impl Embedding {
    pub fn canned() -> Self {
        Self {
            embedding: vec![EMBEDDING_VALUE; EMBEDDING_DIMENSIONS],
        }
    }
}
