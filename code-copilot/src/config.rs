use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434/api/generate";
pub const DEFAULT_MODEL: &str = "llama3";

/// External toolchain locations and time bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolchainConfig {
    /// Java compiler executable
    pub javac: String,
    /// Java runtime executable
    pub java: String,
    /// Python interpreter executable
    pub python: String,
    /// Wall-clock bound for a compile step
    #[serde(with = "duration_serde")]
    pub compile_timeout: Duration,
    /// Wall-clock bound for a run step
    #[serde(with = "duration_serde")]
    pub run_timeout: Duration,
    /// Directory under which per-request workspaces are created
    pub workspace_root: PathBuf,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            javac: "javac".to_string(),
            java: "java".to_string(),
            python: "python3".to_string(),
            compile_timeout: Duration::from_secs(20),
            run_timeout: Duration::from_secs(10),
            workspace_root: std::env::temp_dir(),
        }
    }
}

impl ToolchainConfig {
    pub fn with_javac(mut self, javac: impl Into<String>) -> Self {
        self.javac = javac.into();
        self
    }

    pub fn with_java(mut self, java: impl Into<String>) -> Self {
        self.java = java.into();
        self
    }

    pub fn with_python(mut self, python: impl Into<String>) -> Self {
        self.python = python.into();
        self
    }

    pub fn with_compile_timeout(mut self, timeout: Duration) -> Self {
        self.compile_timeout = timeout;
        self
    }

    pub fn with_run_timeout(mut self, timeout: Duration) -> Self {
        self.run_timeout = timeout;
        self
    }

    pub fn with_workspace_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.workspace_root = root.into();
        self
    }
}

/// Settings for the Ollama text-completion backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Full URL of the generate endpoint
    pub api_url: String,
    /// Model used when a request names none
    pub default_model: String,
    #[serde(with = "duration_serde")]
    pub request_timeout: Duration,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_OLLAMA_URL.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            request_timeout: Duration::from_secs(180),
            max_tokens: 1200,
            temperature: 0.0,
        }
    }
}

impl OllamaConfig {
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Top-level service configuration, assembled once at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub toolchain: ToolchainConfig,
    pub ollama: OllamaConfig,
    pub max_concurrent_executions: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            toolchain: ToolchainConfig::default(),
            ollama: OllamaConfig::default(),
            max_concurrent_executions: 10,
        }
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
