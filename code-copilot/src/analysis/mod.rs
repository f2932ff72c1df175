//! Model-assisted code analysis

pub mod normalizer;
mod prompt;

pub use normalizer::normalize;
pub use prompt::analysis_prompt;

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::{
    completion::{CompletionBackend, CompletionOutput, CompletionRequest},
    types::AnalysisSections,
    Result,
};

/// Key holding the generated text in a structured completion body
pub const RESPONSE_KEY: &str = "response";
/// Key holding a failure description in a structured completion body
pub const ERROR_KEY: &str = "error";

/// Asks a completion backend about a piece of code and normalizes the answer
pub struct CodeAnalyzer {
    backend: Arc<dyn CompletionBackend>,
    max_tokens: u32,
    temperature: f32,
}

impl CodeAnalyzer {
    pub fn new(backend: Arc<dyn CompletionBackend>, max_tokens: u32, temperature: f32) -> Self {
        Self {
            backend,
            max_tokens,
            temperature,
        }
    }

    /// Never fails: a backend error becomes a visible notice in the description
    pub async fn analyze(&self, language: &str, code: &str, model: Option<&str>) -> AnalysisSections {
        let request = CompletionRequest {
            prompt: analysis_prompt(language, code),
            model: model.map(str::to_string),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let raw_text = raw_analysis_text(self.backend.complete(request).await);
        debug!("Normalizing {} bytes of analysis text", raw_text.len());
        normalize(&raw_text)
    }
}

/// Reduce a completion outcome to the text handed to [`normalize`].
///
/// Structured bodies yield their `response` field, or a failure notice for
/// an `error` field, or else their JSON rendering.
pub fn raw_analysis_text(outcome: Result<CompletionOutput>) -> String {
    match outcome {
        Ok(CompletionOutput::Text(text)) => text,
        Ok(CompletionOutput::Structured(value)) => structured_text(&value),
        Err(e) => {
            warn!("Analysis backend failed: {}", e);
            failure_notice(&e.to_string())
        }
    }
}

fn structured_text(value: &Value) -> String {
    if let Some(text) = value.get(RESPONSE_KEY) {
        return match text {
            Value::String(s) => s.trim().to_string(),
            other => other.to_string(),
        };
    }

    if let Some(error) = value.get(ERROR_KEY) {
        let reason = match error {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        warn!("Analysis backend reported an error: {}", reason);
        return failure_notice(&reason);
    }

    value.to_string()
}

/// Analysis text that normalizes to a description explaining the failure
pub fn failure_notice(reason: &str) -> String {
    format!(
        "{}\nAnalysis unavailable: {}",
        normalizer::DESCRIPTION_MARKER,
        reason
    )
}
