use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tokio::fs;
use tracing::{debug, error};
use uuid::Uuid;

use crate::{error::Error, types::Language, Result};

const WORKSPACE_PREFIX: &str = "netcop_";

static PUBLIC_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"public\s+class\s+([A-Za-z_][A-Za-z0-9_]*)").expect("valid class pattern")
});

/// Request-scoped directory holding one staged source file.
///
/// The directory is removed recursively when the value is dropped, so every
/// exit path of the owning request cleans up after itself.
#[derive(Debug)]
pub struct Workspace {
    root_dir: PathBuf,
    id: String,
}

impl Workspace {
    /// Create a fresh, uniquely named workspace under `base_dir`
    pub async fn create(base_dir: &Path) -> Result<Self> {
        let id = Uuid::new_v4().simple().to_string();
        let root_dir = base_dir.join(format!("{}{}", WORKSPACE_PREFIX, id));

        // create_dir (not create_dir_all) so a name collision fails instead of sharing
        fs::create_dir(&root_dir).await.map_err(|e| {
            Error::Workspace(format!(
                "Failed to create workspace {}: {}",
                root_dir.display(),
                e
            ))
        })?;

        debug!("Created workspace {}", root_dir.display());
        Ok(Self { root_dir, id })
    }

    /// Create a workspace and write `source` under a name chosen by
    /// [`source_file_name`]. Returns the workspace together with the file path.
    pub async fn stage(
        base_dir: &Path,
        language: &str,
        source: &str,
        filename_hint: Option<&str>,
    ) -> Result<(Self, PathBuf)> {
        let workspace = Self::create(base_dir).await?;
        let file_name = source_file_name(language, source, filename_hint);
        let path = workspace.write_source(&file_name, source).await?;
        Ok((workspace, path))
    }

    /// Write `source` as UTF-8 into the workspace under `file_name`
    pub async fn write_source(&self, file_name: &str, source: &str) -> Result<PathBuf> {
        let path = self.root_dir.join(file_name);
        fs::write(&path, source.as_bytes()).await.map_err(|e| {
            Error::Workspace(format!("Failed to write {}: {}", path.display(), e))
        })?;
        debug!("Staged source file {}", path.display());
        Ok(path)
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        match std::fs::remove_dir_all(&self.root_dir) {
            Ok(()) => debug!("Removed workspace {}", self.root_dir.display()),
            Err(e) => error!(
                "Failed to clean up workspace directory {}: {}",
                self.root_dir.display(),
                e
            ),
        }
    }
}

/// Pick the file name a source artifact is staged under.
///
/// Java sources are named after their public class when one is declared,
/// since `javac` rejects a public class in a file of another name.
pub fn source_file_name(language: &str, source: &str, filename_hint: Option<&str>) -> String {
    let hint = filename_hint.and_then(bare_file_name);

    match Language::resolve(language) {
        Some(Language::Java) => {
            if let Some(class) = public_class_name(source) {
                format!("{}.java", class)
            } else if let Some(hint) = hint {
                if hint.ends_with(".java") {
                    hint.to_string()
                } else {
                    format!("{}.java", hint)
                }
            } else {
                "Main.java".to_string()
            }
        }
        Some(Language::Python) => match hint {
            Some(hint) if hint.ends_with(".py") => hint.to_string(),
            _ => "script.py".to_string(),
        },
        None => hint.unwrap_or("code.txt").to_string(),
    }
}

/// Name of the first `public class` declared in `source`
pub fn public_class_name(source: &str) -> Option<&str> {
    PUBLIC_CLASS
        .captures(source)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

// Hints are reduced to their final component so they cannot escape the workspace
fn bare_file_name(hint: &str) -> Option<&str> {
    Path::new(hint)
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
}
