use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::{
    config::ToolchainConfig,
    error::Error,
    languages::{JavaExecutor, LanguageExecutor, PythonExecutor},
    process::{run_tool, EXIT_TIMEOUT, EXIT_TOOL_MISSING},
    types::{ExecutionResult, Language},
    workspace::Workspace,
};

/// Dispatches source code to the toolchain of its language.
///
/// Every call stages into its own [`Workspace`], so concurrent calls never
/// share files or child processes.
pub struct CodeExecutor {
    config: ToolchainConfig,
}

impl CodeExecutor {
    pub fn new(config: ToolchainConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ToolchainConfig {
        &self.config
    }

    /// Compile (when needed) and run `code`.
    ///
    /// Always returns a result: unsupported languages, missing tools,
    /// timeouts and workspace failures are all reported as data.
    pub async fn execute(&self, language: &str, code: &str) -> ExecutionResult {
        let (executor, workspace, source_file) = match self.prepare(language, code).await {
            Ok(prepared) => prepared,
            Err(result) => return result,
        };

        debug!("Executing {} code in workspace {}", language, workspace.id());
        self.execute_in_workspace(executor.as_ref(), &workspace, &source_file)
            .await
    }

    /// Parse (Python, `py_compile`) or compile (Java, `javac`) `code` without
    /// running it. Diagnostics land in `compile_output`.
    pub async fn check_syntax(&self, language: &str, code: &str) -> ExecutionResult {
        let (executor, workspace, source_file) = match self.prepare(language, code).await {
            Ok(prepared) => prepared,
            Err(result) => return result,
        };

        debug!("Checking {} syntax in workspace {}", language, workspace.id());
        let check = executor.syntax_check_invocation(workspace.root_dir(), &source_file);
        match run_tool(&check, self.config.compile_timeout).await {
            Ok(output) => ExecutionResult {
                compile_output: output.combined(),
                run_output: String::new(),
                exit_code: output.exit_code,
            },
            Err(e) => {
                warn!("Syntax check did not complete: {}", e);
                ExecutionResult {
                    compile_output: executor.describe_failure(&e),
                    run_output: String::new(),
                    exit_code: failure_exit_code(&e),
                }
            }
        }
    }

    /// Resolve the language and stage `code` into a fresh workspace
    async fn prepare(
        &self,
        language: &str,
        code: &str,
    ) -> Result<(Box<dyn LanguageExecutor>, Workspace, PathBuf), ExecutionResult> {
        let Some(resolved) = Language::resolve(language) else {
            info!("Rejecting unsupported language: {}", language);
            return Err(ExecutionResult::unsupported(language));
        };

        let executor = self.create_executor(resolved);

        let workspace = Workspace::create(&self.config.workspace_root)
            .await
            .map_err(|e| {
                error!("Failed to prepare workspace: {}", e);
                setup_failure(&e)
            })?;

        let source_file = workspace
            .write_source(executor.source_file_name(), code)
            .await
            .map_err(|e| {
                error!("Failed to stage source: {}", e);
                setup_failure(&e)
            })?;

        Ok((executor, workspace, source_file))
    }

    async fn execute_in_workspace(
        &self,
        executor: &dyn LanguageExecutor,
        workspace: &Workspace,
        source_file: &Path,
    ) -> ExecutionResult {
        let mut compile_output = String::new();
        if let Some(compile) = executor.compile_invocation(workspace.root_dir(), source_file) {
            match run_tool(&compile, self.config.compile_timeout).await {
                Ok(output) if output.success() => compile_output = output.combined(),
                Ok(output) => {
                    info!("Compilation failed with exit code {}", output.exit_code);
                    return ExecutionResult {
                        compile_output: output.combined(),
                        run_output: String::new(),
                        exit_code: output.exit_code,
                    };
                }
                Err(e) => {
                    warn!("Compile step did not complete: {}", e);
                    return ExecutionResult {
                        compile_output: executor.describe_failure(&e),
                        run_output: String::new(),
                        exit_code: failure_exit_code(&e),
                    };
                }
            }
        }

        let run = executor.run_invocation(workspace.root_dir(), source_file);
        match run_tool(&run, self.config.run_timeout).await {
            Ok(output) => {
                debug!("Run finished in {:?}", output.elapsed);
                ExecutionResult {
                    compile_output,
                    run_output: output.combined(),
                    exit_code: output.exit_code,
                }
            }
            Err(e) => {
                warn!("Run step did not complete: {}", e);
                ExecutionResult {
                    compile_output,
                    run_output: executor.describe_failure(&e),
                    exit_code: failure_exit_code(&e),
                }
            }
        }
    }

    fn create_executor(&self, language: Language) -> Box<dyn LanguageExecutor> {
        match language {
            Language::Java => Box::new(JavaExecutor::new(&self.config.javac, &self.config.java)),
            Language::Python => Box::new(PythonExecutor::new(&self.config.python)),
        }
    }
}

fn setup_failure(error: &Error) -> ExecutionResult {
    ExecutionResult {
        compile_output: String::new(),
        run_output: error.to_string(),
        exit_code: -1,
    }
}

fn failure_exit_code(error: &Error) -> i32 {
    match error {
        Error::ToolMissing { .. } => EXIT_TOOL_MISSING,
        Error::Timeout { .. } => EXIT_TIMEOUT,
        _ => -1,
    }
}
