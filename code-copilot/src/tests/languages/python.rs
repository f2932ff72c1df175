use super::{execute, test_executor, test_executor_with};
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
async fn test_python_prints_ok() {
    if skip_if_not_available(&["python3"]) {
        return;
    }

    let result = execute("python", PYTHON_OK).await;
    assert_eq!(result.exit_code, 0);
    assert!(result.run_output.contains("ok"));
    assert!(result.compile_output.is_empty());
}

#[tokio::test]
async fn test_python_aliases() {
    if skip_if_not_available(&["python3"]) {
        return;
    }

    for tag in ["PYTHON", "py", "python3"] {
        let result = execute(tag, PYTHON_HELLO).await;
        assert_eq!(result.exit_code, 0, "tag {}", tag);
        assert_eq!(result.run_output.trim(), "Hello from Python!");
    }
}

#[tokio::test]
async fn test_python_syntax_error_is_a_run_failure() {
    if skip_if_not_available(&["python3"]) {
        return;
    }

    let result = execute("python", PYTHON_SYNTAX_ERROR).await;
    assert_ne!(result.exit_code, 0);
    assert!(result.compile_output.is_empty());
    assert!(result.run_output.contains("SyntaxError"));
}

#[tokio::test]
async fn test_python_runtime_error() {
    if skip_if_not_available(&["python3"]) {
        return;
    }

    let result = execute("python", PYTHON_RUNTIME_ERROR).await;
    assert_eq!(result.exit_code, 1);
    assert!(result.run_output.contains("Traceback"));
    assert!(result.run_output.contains("ZeroDivisionError"));
}

#[tokio::test]
async fn test_python_merges_stdout_then_stderr() {
    if skip_if_not_available(&["python3"]) {
        return;
    }

    let result = execute("python", PYTHON_BOTH_STREAMS).await;
    assert_eq!(result.exit_code, 4);
    assert_eq!(result.run_output, "to stdout\nto stderr\n");
}

#[tokio::test]
async fn test_python_timeout() {
    if skip_if_not_available(&["python3"]) {
        return;
    }

    let (executor, root) = test_executor_with(|root| {
        test_toolchain(root).with_run_timeout(Duration::from_millis(500))
    });

    let result = executor.execute("python", PYTHON_SLEEP).await;
    assert_eq!(result.exit_code, EXIT_TIMEOUT);
    assert_eq!(result.run_output, "python3 timed out after 500ms.");
    assert_eq!(workspace_count(root.path()), 0);
}

#[tokio::test]
async fn test_python_syntax_check_reports_error() {
    if skip_if_not_available(&["python3"]) {
        return;
    }

    let (executor, root) = test_executor();
    let result = executor.check_syntax("python", PYTHON_SYNTAX_ERROR).await;

    assert_ne!(result.exit_code, 0);
    assert!(result.compile_output.contains("SyntaxError"));
    assert!(result.run_output.is_empty());
    assert_eq!(workspace_count(root.path()), 0);
}

#[tokio::test]
async fn test_python_syntax_check_does_not_run() {
    if skip_if_not_available(&["python3"]) {
        return;
    }

    let (executor, _root) = test_executor();
    let result = executor
        .check_syntax("py", "print('should not appear')\n")
        .await;

    assert_eq!(result.exit_code, 0);
    assert!(result.compile_output.is_empty());
    assert!(result.run_output.is_empty());
}
