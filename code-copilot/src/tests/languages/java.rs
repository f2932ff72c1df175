use super::{execute, test_executor_with};
use crate::{
    languages::skip_if_not_available,
    process::EXIT_TIMEOUT,
    tests::{
        fixtures::{code_samples::*, failing_code::*},
        utils::defaults::{test_toolchain, workspace_count},
    },
};
use tokio::time::Duration;

#[tokio::test]
async fn test_java_hello() {
    if skip_if_not_available(&["javac", "java"]) {
        return;
    }

    let result = execute("java", JAVA_HELLO).await;
    assert_eq!(result.exit_code, 0, "compile output: {}", result.compile_output);
    assert!(result.run_output.contains("Hello from Java!"));
}

#[tokio::test]
async fn test_java_compile_error_skips_run() {
    if skip_if_not_available(&["javac", "java"]) {
        return;
    }

    let (executor, root) = test_executor_with(test_toolchain);
    let result = executor.execute("Java", JAVA_COMPILE_ERROR).await;

    assert_ne!(result.exit_code, 0);
    assert!(result.compile_output.contains("error"));
    assert!(result.run_output.is_empty());
    assert!(!result.run_output.contains("never printed"));
    assert_eq!(workspace_count(root.path()), 0);
}

#[tokio::test]
async fn test_java_canonical_file_name() {
    if skip_if_not_available(&["javac", "java"]) {
        return;
    }

    // Execution always stages Main.java, so another public class cannot compile
    let result = execute("java", JAVA_WRONG_CLASS_NAME).await;
    assert_ne!(result.exit_code, 0);
    assert!(result.compile_output.contains("Greeter"));
    assert!(result.run_output.is_empty());
}

#[tokio::test]
async fn test_java_runtime_error() {
    if skip_if_not_available(&["javac", "java"]) {
        return;
    }

    let result = execute("java", JAVA_RUNTIME_ERROR).await;
    assert_eq!(result.exit_code, 1);
    assert!(result.run_output.contains("IllegalStateException"));
    assert!(result.run_output.contains("boom"));
}

#[tokio::test]
async fn test_java_compile_timeout() {
    if skip_if_not_available(&["javac", "java"]) {
        return;
    }

    let (executor, _root) = test_executor_with(|root| {
        test_toolchain(root).with_compile_timeout(Duration::from_millis(1))
    });

    let result = executor.execute("java", JAVA_HELLO).await;
    assert_eq!(result.exit_code, EXIT_TIMEOUT);
    assert_eq!(result.compile_output, "javac timed out after 1ms.");
    assert!(result.run_output.is_empty());
}

/// Executable shell script written next to the workspaces
#[cfg(unix)]
fn write_stub(dir: &std::path::Path, name: &str, body: &str) -> String {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path.to_string_lossy().into_owned()
}

#[cfg(unix)]
#[tokio::test]
async fn test_failed_compile_never_starts_runtime() {
    let tools = tempfile::tempdir().unwrap();
    let marker = tools.path().join("runtime-started");
    let javac = write_stub(tools.path(), "javac", "echo 'Main.java:1: error: broken' >&2\nexit 1");
    let java = write_stub(
        tools.path(),
        "java",
        &format!("touch '{}'", marker.display()),
    );

    let (executor, root) =
        test_executor_with(|root| test_toolchain(root).with_javac(javac).with_java(java));
    let result = executor.execute("java", JAVA_HELLO).await;

    assert_eq!(result.exit_code, 1);
    assert_eq!(result.compile_output, "Main.java:1: error: broken\n");
    assert!(result.run_output.is_empty());
    assert!(!marker.exists());
    assert_eq!(workspace_count(root.path()), 0);
}

#[cfg(unix)]
#[tokio::test]
async fn test_successful_compile_starts_runtime() {
    let tools = tempfile::tempdir().unwrap();
    let marker = tools.path().join("runtime-started");
    let javac = write_stub(tools.path(), "javac", "exit 0");
    let java = write_stub(
        tools.path(),
        "java",
        &format!("touch '{}'\necho \"args: $*\"", marker.display()),
    );

    let (executor, root) =
        test_executor_with(|root| test_toolchain(root).with_javac(javac).with_java(java));
    let result = executor.execute("java", JAVA_HELLO).await;

    assert_eq!(result.exit_code, 0);
    assert!(marker.exists());
    assert!(result.run_output.starts_with("args: -cp "));
    assert!(result.run_output.trim_end().ends_with(" Main"));
    assert_eq!(workspace_count(root.path()), 0);
}
