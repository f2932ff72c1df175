use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use crate::{
    completion::{CompletionBackend, CompletionOutput, CompletionRequest},
    config::OllamaConfig,
    error::Error,
    Result,
};

/// Client for the Ollama `/api/generate` endpoint
pub struct OllamaClient {
    client: Client,
    config: OllamaConfig,
}

impl OllamaClient {
    pub fn new(config: OllamaConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(Error::Http)?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &OllamaConfig {
        &self.config
    }
}

#[async_trait]
impl CompletionBackend for OllamaClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionOutput> {
        let model = request
            .model
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| self.config.default_model.clone());

        debug!("Requesting completion from {} with model {}", self.config.api_url, model);

        let response = self
            .client
            .post(self.config.api_url.as_str())
            .json(&json!({
                "model": model,
                "prompt": request.prompt,
                "stream": false,
                "options": {
                    "temperature": request.temperature,
                    "num_predict": request.max_tokens,
                },
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Api {
                status_code: response.status().as_u16(),
                message: response.text().await?,
            });
        }

        let body: Value = response.json().await.map_err(Error::Http)?;
        Ok(CompletionOutput::Structured(body))
    }
}
