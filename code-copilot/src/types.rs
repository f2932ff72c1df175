use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Languages with a known toolchain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Java,
    Python,
}

impl Language {
    /// Resolve a request's language tag.
    ///
    /// `java` matches case-insensitively. `python` and every tag starting with
    /// `py` (`py`, `py3`, `python3`, ...) resolve to Python. Anything else is
    /// unsupported and yields `None`.
    pub fn resolve(tag: &str) -> Option<Self> {
        let tag = tag.trim().to_lowercase();
        if tag == "java" {
            Some(Language::Java)
        } else if tag.starts_with("py") {
            Some(Language::Python)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Java => "java",
            Language::Python => "python",
        }
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::resolve(s).ok_or_else(|| Error::UnsupportedLanguage(s.to_string()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Code execution request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionRequest {
    /// Raw language tag as supplied by the caller
    pub language: String,
    /// Source code to compile and run
    pub code: String,
}

impl ExecutionRequest {
    pub fn new(language: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            code: code.into(),
        }
    }
}

/// Outcome of one compile-and-run pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Compiler stdout followed by stderr; empty without a compile phase
    pub compile_output: String,
    /// Program stdout followed by stderr; empty when compilation failed
    pub run_output: String,
    pub exit_code: i32,
}

impl ExecutionResult {
    pub fn unsupported(language: &str) -> Self {
        Self {
            compile_output: String::new(),
            run_output: format!("Language {} not supported.", language),
            exit_code: -1,
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Structured view over free-form analysis text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSections {
    pub description: String,
    pub security_issues: Vec<String>,
    pub suggestions: Vec<String>,
}

impl AnalysisSections {
    pub fn is_empty(&self) -> bool {
        self.description.is_empty() && self.security_issues.is_empty() && self.suggestions.is_empty()
    }
}

/// Merged analysis and execution response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub analysis: AnalysisSections,
    pub compile_output: String,
    pub run_output: String,
    pub exit_code: i32,
}

impl AnalysisReport {
    pub fn new(analysis: AnalysisSections, execution: ExecutionResult) -> Self {
        Self {
            analysis,
            compile_output: execution.compile_output,
            run_output: execution.run_output,
            exit_code: execution.exit_code,
        }
    }
}
