use super::utils::defaults::test_toolchain;
use crate::{CodeExecutor, ExecutionResult, ToolchainConfig};
use tempfile::TempDir;

pub mod java;
pub mod python;

/// Executor rooted in a fresh temporary directory
pub(crate) fn test_executor() -> (CodeExecutor, TempDir) {
    test_executor_with(test_toolchain)
}

pub(crate) fn test_executor_with(
    configure: impl FnOnce(&std::path::Path) -> ToolchainConfig,
) -> (CodeExecutor, TempDir) {
    let root = tempfile::tempdir().expect("temp workspace root");
    let executor = CodeExecutor::new(configure(root.path()));
    (executor, root)
}

pub(crate) async fn execute(language: &str, code: &str) -> ExecutionResult {
    let (executor, _root) = test_executor();
    executor.execute(language, code).await
}
