use std::path::PathBuf;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::{process::Command, time};
use tracing::{debug, warn};

use crate::{error::Error, Result};

/// Exit code reported when a required executable is absent
pub const EXIT_TOOL_MISSING: i32 = 127;
/// Exit code reported when an invocation exceeds its time bound
pub const EXIT_TIMEOUT: i32 = 124;

/// One external program call
#[derive(Debug, Clone)]
pub struct ToolInvocation {
    pub program: String,
    pub args: Vec<String>,
    pub current_dir: PathBuf,
}

impl ToolInvocation {
    pub fn new(program: impl Into<String>, current_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: current_dir.into(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

/// Captured result of a finished process
#[derive(Debug, Clone, Default)]
pub struct ProcessOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub elapsed: Duration,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Stdout followed by stderr
    pub fn combined(&self) -> String {
        let mut out = String::with_capacity(self.stdout.len() + self.stderr.len());
        out.push_str(&self.stdout);
        out.push_str(&self.stderr);
        out
    }
}

/// Run `invocation` to completion, bounded by `timeout`.
///
/// A missing executable yields [`Error::ToolMissing`] and an exceeded bound
/// yields [`Error::Timeout`]; in the latter case the child is killed.
pub async fn run_tool(invocation: &ToolInvocation, timeout: Duration) -> Result<ProcessOutput> {
    let program_path = which::which(&invocation.program).map_err(|_| Error::ToolMissing {
        program: invocation.program.clone(),
    })?;

    debug!(
        "Running {} {:?} in {}",
        program_path.display(),
        invocation.args,
        invocation.current_dir.display()
    );

    let child = Command::new(&program_path)
        .args(&invocation.args)
        .current_dir(&invocation.current_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::ToolMissing {
                program: invocation.program.clone(),
            },
            _ => Error::Io(e),
        })?;

    let start = Instant::now();
    // On timeout the wait future is dropped, taking the child with it
    let output = match time::timeout(timeout, child.wait_with_output()).await {
        Ok(output) => output?,
        Err(_) => {
            warn!("{} exceeded {:?}, killed", invocation.program, timeout);
            return Err(Error::Timeout {
                program: invocation.program.clone(),
                timeout,
            });
        }
    };

    let exit_code = exit_code(&output.status);
    debug!("{} exited with {}", invocation.program, exit_code);

    Ok(ProcessOutput {
        exit_code,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        elapsed: start.elapsed(),
    })
}

fn exit_code(status: &std::process::ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    -1
}
