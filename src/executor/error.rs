//! Executor error types.

/// Errors that fail an `execute` call outright.
///
/// A nonzero exit status is not an error; it is reported through
/// [`ExecutionResult::exit_code`](super::ExecutionResult).
#[derive(thiserror::Error, Debug)]
pub enum ExecError {
    /// The program binary was not found.
    #[error("Program not found: {program}")]
    NotFound { program: String },

    /// The program exists but could not be executed.
    #[error("Permission denied executing {program}")]
    PermissionDenied { program: String },

    /// Any other spawn failure.
    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    /// The process outlived its deadline and was terminated.
    #[error("Process timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// I/O error while waiting on the process or reading its output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExecError {
    /// Create a spawn error from an I/O error, classifying common cases.
    pub(crate) fn from_spawn(program: &str, err: std::io::Error) -> Self {
        let program = program.to_string();
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { program },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { program },
            _ => Self::Spawn {
                program,
                source: err,
            },
        }
    }

    /// Returns true if the process never started.
    #[must_use]
    pub fn is_spawn_failure(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::PermissionDenied { .. } | Self::Spawn { .. }
        )
    }

    /// Returns true if the process was killed for exceeding its timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
