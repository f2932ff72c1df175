use std::path::Path;

use crate::{languages::LanguageExecutor, process::ToolInvocation};

/// Runs the staged script directly; syntax errors surface at run time
pub struct PythonExecutor {
    python: String,
}

impl PythonExecutor {
    pub const SOURCE_FILE: &'static str = "script.py";

    pub fn new(python: impl Into<String>) -> Self {
        Self {
            python: python.into(),
        }
    }
}

impl Default for PythonExecutor {
    fn default() -> Self {
        Self::new("python3")
    }
}

impl LanguageExecutor for PythonExecutor {
    fn source_file_name(&self) -> &str {
        Self::SOURCE_FILE
    }

    fn install_hint(&self) -> &str {
        "Install Python 3"
    }

    fn run_invocation(&self, workspace_dir: &Path, source_file: &Path) -> ToolInvocation {
        ToolInvocation::new(&self.python, workspace_dir).arg(source_file.to_string_lossy())
    }

    fn syntax_check_invocation(&self, workspace_dir: &Path, source_file: &Path) -> ToolInvocation {
        ToolInvocation::new(&self.python, workspace_dir)
            .arg("-m")
            .arg("py_compile")
            .arg(source_file.to_string_lossy())
    }
}
