//! # Code Copilot
//!
//! Compiles and runs source code in per-request workspaces, asks a language
//! model to analyze the same code, and merges both into one structured report.
//! Java and Python toolchains are supported; every external process carries a
//! wall-clock timeout and every failure is reported as data. The same model
//! backend also answers networking questions and generates code.

pub mod analysis;
pub mod assistant;
pub mod completion;
pub mod config;
mod error;
mod executor;
pub mod languages;
pub mod process;
mod service;
mod types;
pub mod workspace;

#[cfg(test)]
mod tests;

pub use analysis::{normalize, CodeAnalyzer};
pub use assistant::{Assistant, ChatReply, ReplyKind};
pub use completion::{CompletionBackend, CompletionOutput, CompletionRequest, OllamaClient};
pub use config::{OllamaConfig, ServiceConfig, ToolchainConfig};
pub use error::Error;
pub use executor::CodeExecutor;
pub use service::CodeCopilotService;
pub use types::{AnalysisReport, AnalysisSections, ExecutionRequest, ExecutionResult, Language};
pub use workspace::Workspace;

/// Result type for code copilot operations
pub type Result<T> = std::result::Result<T, Error>;
