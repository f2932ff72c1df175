//! Free-form questions and code generation over the completion backend

mod prompts;

pub use prompts::{code_generation_prompt, networking_prompt};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::{
    analysis::{ERROR_KEY, RESPONSE_KEY},
    completion::{CompletionBackend, CompletionOutput, CompletionRequest},
    error::Error,
    Result,
};

pub const ASK_MAX_TOKENS: u32 = 700;
pub const GENERATE_CODE_MAX_TOKENS: u32 = 1200;
pub const CHAT_CODE_MAX_TOKENS: u32 = 1000;
/// Language used when a chat message asks for code
pub const CHAT_CODE_LANGUAGE: &str = "python";

const CODE_REQUEST_PREFIX: &str = "generate code";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyKind {
    Code,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(rename = "type")]
    pub kind: ReplyKind,
    pub response: String,
}

/// True when a chat message should be answered with generated code
pub fn is_code_request(message: &str) -> bool {
    message.to_lowercase().starts_with(CODE_REQUEST_PREFIX)
}

pub struct Assistant {
    backend: Arc<dyn CompletionBackend>,
    temperature: f32,
}

impl Assistant {
    pub fn new(backend: Arc<dyn CompletionBackend>, temperature: f32) -> Self {
        Self {
            backend,
            temperature,
        }
    }

    pub async fn ask(&self, query: &str, model: Option<&str>) -> Result<String> {
        self.generate(networking_prompt(query), model, ASK_MAX_TOKENS).await
    }

    pub async fn generate_code(&self, task: &str, language: &str, model: Option<&str>) -> Result<String> {
        self.generate(
            code_generation_prompt(task, language),
            model,
            GENERATE_CODE_MAX_TOKENS,
        )
        .await
    }

    /// Messages starting with "generate code" get Python code back, anything
    /// else a networking answer.
    pub async fn chat(&self, message: &str, model: Option<&str>) -> Result<ChatReply> {
        if is_code_request(message) {
            let prompt = code_generation_prompt(message, CHAT_CODE_LANGUAGE);
            let response = self.generate(prompt, model, CHAT_CODE_MAX_TOKENS).await?;
            return Ok(ChatReply {
                kind: ReplyKind::Code,
                response,
            });
        }

        let response = self.ask(message, model).await?;
        Ok(ChatReply {
            kind: ReplyKind::Text,
            response,
        })
    }

    async fn generate(&self, prompt: String, model: Option<&str>, max_tokens: u32) -> Result<String> {
        let request = CompletionRequest {
            prompt,
            model: model.map(str::to_string),
            max_tokens,
            temperature: self.temperature,
        };

        debug!("Requesting {} tokens at most", max_tokens);
        reply_text(self.backend.complete(request).await?)
    }
}

/// Text of a completion, trimmed. An `error` field or a body without a
/// `response` field is an error.
pub fn reply_text(output: CompletionOutput) -> Result<String> {
    let value = match output {
        CompletionOutput::Text(text) => return Ok(text.trim().to_string()),
        CompletionOutput::Structured(value) => value,
    };

    match (value.get(RESPONSE_KEY), value.get(ERROR_KEY)) {
        (Some(Value::String(text)), _) => Ok(text.trim().to_string()),
        (Some(other), _) => Ok(other.to_string()),
        (None, Some(error)) => {
            let reason = match error {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            warn!("Completion backend reported an error: {}", reason);
            Err(Error::Completion(reason))
        }
        (None, None) => Err(Error::Completion(format!(
            "completion body has no {} field",
            RESPONSE_KEY
        ))),
    }
}
