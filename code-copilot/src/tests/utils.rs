pub mod defaults {
    use crate::{OllamaConfig, ServiceConfig, ToolchainConfig};
    use std::path::Path;
    use tokio::time::Duration;

    pub fn test_toolchain(workspace_root: &Path) -> ToolchainConfig {
        ToolchainConfig::default()
            .with_workspace_root(workspace_root)
            .with_compile_timeout(Duration::from_secs(60))
            .with_run_timeout(Duration::from_secs(10))
    }

    pub fn test_config(workspace_root: &Path) -> ServiceConfig {
        ServiceConfig {
            toolchain: test_toolchain(workspace_root),
            // Nothing listens on the discard port
            ollama: OllamaConfig::default()
                .with_api_url("http://127.0.0.1:9/api/generate")
                .with_request_timeout(Duration::from_secs(2)),
            max_concurrent_executions: 4,
        }
    }

    /// Number of entries left under a workspace root
    pub fn workspace_count(root: &Path) -> usize {
        std::fs::read_dir(root).map(|entries| entries.count()).unwrap_or(0)
    }
}

pub mod backends {
    use crate::{CompletionBackend, CompletionOutput, CompletionRequest, Error, Result};
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// Replies with the same output to every request
    pub struct StaticBackend(pub CompletionOutput);

    #[async_trait]
    impl CompletionBackend for StaticBackend {
        async fn complete(&self, _request: CompletionRequest) -> Result<CompletionOutput> {
            Ok(self.0.clone())
        }
    }

    /// Fails every request
    pub struct FailingBackend;

    #[async_trait]
    impl CompletionBackend for FailingBackend {
        async fn complete(&self, _request: CompletionRequest) -> Result<CompletionOutput> {
            Err(Error::Completion("backend offline".to_string()))
        }
    }

    /// Records every request and answers with a fixed text
    pub struct RecordingBackend {
        reply: CompletionOutput,
        seen: Mutex<Vec<CompletionRequest>>,
    }

    impl RecordingBackend {
        pub fn replying(reply: CompletionOutput) -> Arc<Self> {
            Arc::new(Self {
                reply,
                seen: Mutex::new(Vec::new()),
            })
        }

        pub fn requests(&self) -> Vec<CompletionRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionBackend for RecordingBackend {
        async fn complete(&self, request: CompletionRequest) -> Result<CompletionOutput> {
            self.seen.lock().unwrap().push(request);
            Ok(self.reply.clone())
        }
    }

    pub fn text(reply: &str) -> Arc<dyn CompletionBackend> {
        Arc::new(StaticBackend(CompletionOutput::Text(reply.to_string())))
    }

    pub fn failing() -> Arc<dyn CompletionBackend> {
        Arc::new(FailingBackend)
    }
}
