use std::sync::Arc;
use tokio::sync::{AcquireError, Semaphore};
use tracing::{debug, error, info};

use crate::{
    analysis::CodeAnalyzer,
    assistant::{Assistant, ChatReply},
    completion::{CompletionBackend, OllamaClient},
    config::ServiceConfig,
    executor::CodeExecutor,
    types::{AnalysisReport, ExecutionRequest, ExecutionResult},
    Result,
};

/// Entry point for the `execute` and `analyze` operations.
///
/// Both operations are total: every failure is reported inside the
/// returned value. The assistant operations (`ask`, `chat`,
/// `generate_code`) return backend failures as errors.
#[derive(Clone)]
pub struct CodeCopilotService {
    executor: Arc<CodeExecutor>,
    analyzer: Arc<CodeAnalyzer>,
    assistant: Arc<Assistant>,
    semaphore: Arc<Semaphore>,
}

impl CodeCopilotService {
    /// Build the service with an Ollama backend
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let backend = OllamaClient::new(config.ollama.clone())?;
        Ok(Self::with_backend(config, Arc::new(backend)))
    }

    /// Build the service around any completion backend
    pub fn with_backend(config: ServiceConfig, backend: Arc<dyn CompletionBackend>) -> Self {
        let analyzer = CodeAnalyzer::new(
            backend.clone(),
            config.ollama.max_tokens,
            config.ollama.temperature,
        );
        let assistant = Assistant::new(backend, config.ollama.temperature);

        Self {
            executor: Arc::new(CodeExecutor::new(config.toolchain)),
            analyzer: Arc::new(analyzer),
            assistant: Arc::new(assistant),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent_executions.max(1))),
        }
    }

    pub async fn execute(&self, request: &ExecutionRequest) -> ExecutionResult {
        // Acquire execution permit
        let _permit = match self.semaphore.acquire().await {
            Ok(permit) => permit,
            Err(e) => return permit_failure(e),
        };

        debug!("Starting code execution for language: {}", request.language);
        let result = self.executor.execute(&request.language, &request.code).await;
        info!(
            "Code execution for {} finished with exit code {}",
            request.language, result.exit_code
        );
        result
    }

    /// Run the model analysis and the execution side by side and merge them.
    /// Neither half can prevent the other from being reported.
    pub async fn analyze(&self, request: &ExecutionRequest, model: Option<&str>) -> AnalysisReport {
        let (analysis, execution) = tokio::join!(
            self.analyzer.analyze(&request.language, &request.code, model),
            self.execute(request),
        );

        AnalysisReport::new(analysis, execution)
    }

    /// Syntax-only check; shares the execution permits since it spawns a toolchain
    pub async fn check_syntax(&self, request: &ExecutionRequest) -> ExecutionResult {
        let _permit = match self.semaphore.acquire().await {
            Ok(permit) => permit,
            Err(e) => return permit_failure(e),
        };

        debug!("Starting syntax check for language: {}", request.language);
        self.executor
            .check_syntax(&request.language, &request.code)
            .await
    }

    pub async fn ask(&self, query: &str, model: Option<&str>) -> Result<String> {
        self.assistant.ask(query, model).await
    }

    pub async fn chat(&self, message: &str, model: Option<&str>) -> Result<ChatReply> {
        self.assistant.chat(message, model).await
    }

    pub async fn generate_code(&self, task: &str, language: &str, model: Option<&str>) -> Result<String> {
        self.assistant.generate_code(task, language, model).await
    }

    pub fn available_slots(&self) -> usize {
        self.semaphore.available_permits()
    }
}

fn permit_failure(e: AcquireError) -> ExecutionResult {
    error!("Failed to acquire execution permit: {}", e);
    ExecutionResult {
        compile_output: String::new(),
        run_output: format!("Failed to acquire execution permit: {}", e),
        exit_code: -1,
    }
}
