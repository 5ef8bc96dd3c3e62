//! Tests for timeout enforcement and termination.

use std::time::{Duration, Instant};

use cli_bridge::executor::{ExecError, ExecutionRequest, Executor};
use tempfile::TempDir;

#[tokio::test]
async fn long_running_process_times_out() {
    let request = ExecutionRequest::new("sleep").arg("10").timeout_ms(200);

    let started = Instant::now();
    let err = Executor::new().execute(&request).await.unwrap_err();
    let elapsed = started.elapsed();

    assert!(matches!(err, ExecError::Timeout { timeout_ms: 200 }));
    assert!(err.to_string().contains("200ms"));
    assert!(elapsed >= Duration::from_millis(200));
    assert!(elapsed < Duration::from_secs(5), "took {elapsed:?}");
}

#[tokio::test]
async fn partial_output_is_discarded_on_timeout() {
    let request = ExecutionRequest::new("sh")
        .args(["-c", "echo partial; sleep 10"])
        .timeout_ms(200);

    let result = Executor::new().execute(&request).await;
    assert!(matches!(result, Err(ExecError::Timeout { .. })));
}

#[tokio::test]
async fn sigterm_ignoring_process_is_killed_after_grace() {
    let request = ExecutionRequest::new("sh")
        .args(["-c", "trap '' TERM; while true; do sleep 0.05; done"])
        .timeout_ms(200);
    let executor = Executor::new().with_terminate_grace(Duration::from_millis(100));

    let started = Instant::now();
    let err = executor.execute(&request).await.unwrap_err();

    assert!(err.is_timeout());
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn grandchild_holding_pipe_is_terminated() {
    let temp_dir = TempDir::new().unwrap();
    let marker = temp_dir.path().join("survived");

    // The shell exits at once; its backgrounded subshell keeps stdout open.
    let request = ExecutionRequest::new("sh")
        .args(["-c", "(sleep 1; touch \"$MARKER\") & exit 0"])
        .env("MARKER", marker.to_str().unwrap())
        .timeout_ms(300);
    let executor = Executor::new().with_terminate_grace(Duration::from_millis(200));

    let err = executor.execute(&request).await.unwrap_err();
    assert!(matches!(err, ExecError::Timeout { timeout_ms: 300 }));

    tokio::time::sleep(Duration::from_millis(1_500)).await;
    assert!(!marker.exists(), "grandchild outlived the timeout");
}

#[tokio::test]
async fn fast_process_is_not_affected_by_timeout() {
    let request = ExecutionRequest::new("echo").arg("quick").timeout_ms(5_000);
    let result = Executor::new().execute(&request).await.unwrap();
    assert_eq!(result.stdout, "quick\n");
}

#[tokio::test]
async fn concurrent_timeouts_are_independent() {
    let executor = Executor::new();
    let slow = ExecutionRequest::new("sleep").arg("10").timeout_ms(150);
    let fast = ExecutionRequest::new("echo").arg("ok").timeout_ms(5_000);

    let (slow_result, fast_result) = tokio::join!(executor.execute(&slow), executor.execute(&fast));

    assert!(matches!(slow_result, Err(ExecError::Timeout { timeout_ms: 150 })));
    assert_eq!(fast_result.unwrap().stdout, "ok\n");
}
