//! Language-specific toolchain descriptions

mod java;
mod python;

pub use java::JavaExecutor;
pub use python::PythonExecutor;

use std::path::Path;

use crate::{error::Error, process::ToolInvocation};

/// Describes how one language is staged, compiled and run
pub trait LanguageExecutor: Send + Sync {
    /// Canonical file name the source is staged under
    fn source_file_name(&self) -> &str;

    /// Installation advice shown when a tool is missing
    fn install_hint(&self) -> &str;

    /// Compile step, if the language has one
    fn compile_invocation(&self, _workspace_dir: &Path, _source_file: &Path) -> Option<ToolInvocation> {
        None
    }

    /// Run step
    fn run_invocation(&self, workspace_dir: &Path, source_file: &Path) -> ToolInvocation;

    /// Check that only parses (or compiles) the source without running it
    fn syntax_check_invocation(&self, workspace_dir: &Path, source_file: &Path) -> ToolInvocation;

    /// Human-readable text for a failed tool invocation
    fn describe_failure(&self, error: &Error) -> String {
        match error {
            Error::ToolMissing { program } => format!(
                "{} not found on PATH. {} and ensure {} is available.",
                program,
                self.install_hint(),
                program
            ),
            Error::Timeout { program, timeout } => {
                format!("{} timed out after {:?}.", program, timeout)
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
pub(crate) fn skip_if_not_available(tools: &[&str]) -> bool {
    let missing: Vec<_> = tools
        .iter()
        .filter(|tool| which::which(**tool).is_err())
        .map(|s| (*s).to_string())
        .collect();

    if !missing.is_empty() {
        eprintln!("Skipping test: {} not available", missing.join(", "));
        return true;
    }
    false
}
