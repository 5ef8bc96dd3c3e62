//! Executor module tests.

mod timeout_test;

/// Verify all public executor types are exported from the library.
#[test]
fn test_all_executor_types_exported() {
    use cli_bridge::executor::{
        ExecError, ExecutionRequest, ExecutionResult, Executor, DEFAULT_TERMINATE_GRACE,
        DEFAULT_TIMEOUT, SIGNAL_EXIT_CODE,
    };

    let _ = Executor::new().with_terminate_grace(DEFAULT_TERMINATE_GRACE);
    let request = ExecutionRequest::new("true");
    assert_eq!(request.get_timeout(), DEFAULT_TIMEOUT);

    let _: fn() -> ExecError = || ExecError::Timeout { timeout_ms: 1 };
    let result = ExecutionResult {
        exit_code: SIGNAL_EXIT_CODE,
        stdout: String::new(),
        stderr: String::new(),
        duration_ms: 0,
    };
    assert!(!result.success());
}
