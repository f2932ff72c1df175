//! Text-completion capability used for code analysis

mod ollama;

pub use ollama::OllamaClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Result;

/// Parameters of one completion call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub prompt: String,
    /// Backend default is used when absent
    pub model: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// What a backend hands back: plain text or a structured body
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionOutput {
    Text(String),
    Structured(Value),
}

#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionOutput>;
}
