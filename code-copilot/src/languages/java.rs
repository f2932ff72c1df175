use std::path::Path;

use crate::{languages::LanguageExecutor, process::ToolInvocation};

/// Compiles with `javac` and runs class `Main` from the workspace classpath
pub struct JavaExecutor {
    javac: String,
    java: String,
}

impl JavaExecutor {
    pub const SOURCE_FILE: &'static str = "Main.java";
    pub const MAIN_CLASS: &'static str = "Main";

    pub fn new(javac: impl Into<String>, java: impl Into<String>) -> Self {
        Self {
            javac: javac.into(),
            java: java.into(),
        }
    }
}

impl Default for JavaExecutor {
    fn default() -> Self {
        Self::new("javac", "java")
    }
}

impl LanguageExecutor for JavaExecutor {
    fn source_file_name(&self) -> &str {
        Self::SOURCE_FILE
    }

    fn install_hint(&self) -> &str {
        "Install JDK"
    }

    fn compile_invocation(&self, workspace_dir: &Path, source_file: &Path) -> Option<ToolInvocation> {
        Some(self.syntax_check_invocation(workspace_dir, source_file))
    }

    fn run_invocation(&self, workspace_dir: &Path, _source_file: &Path) -> ToolInvocation {
        ToolInvocation::new(&self.java, workspace_dir)
            .arg("-cp")
            .arg(workspace_dir.to_string_lossy())
            .arg(Self::MAIN_CLASS)
    }

    fn syntax_check_invocation(&self, workspace_dir: &Path, source_file: &Path) -> ToolInvocation {
        ToolInvocation::new(&self.javac, workspace_dir).arg(source_file.to_string_lossy())
    }
}
