//! Process spawning, output capture and timeout handling.

use std::process::Stdio;
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};

use super::{ExecError, ExecutionRequest};
use crate::ansi;

/// Exit code reported when the process ended without one (killed by a signal).
pub const SIGNAL_EXIT_CODE: i32 = -1;

/// Default grace period between SIGTERM and SIGKILL on timeout.
pub const DEFAULT_TERMINATE_GRACE: Duration = Duration::from_secs(2);

/// How often a terminating process group is checked for remaining members.
const GROUP_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Outcome of a process that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    /// Process exit code, or [`SIGNAL_EXIT_CODE`].
    pub exit_code: i32,
    /// Captured stdout with escape sequences removed.
    pub stdout: String,
    /// Captured stderr with escape sequences removed.
    pub stderr: String,
    /// Wall-clock time from spawn to exit.
    pub duration_ms: u64,
}

impl ExecutionResult {
    /// Returns true if the process exited with code zero.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs external programs. Holds no per-call state, so one executor can
/// serve any number of concurrent calls.
#[derive(Debug, Clone)]
pub struct Executor {
    terminate_grace: Duration,
}

impl Default for Executor {
    fn default() -> Self {
        Self {
            terminate_grace: DEFAULT_TERMINATE_GRACE,
        }
    }
}

impl Executor {
    /// Create an executor with the default termination grace period.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how long a timed-out process gets to exit after SIGTERM.
    #[must_use]
    pub fn with_terminate_grace(mut self, grace: Duration) -> Self {
        self.terminate_grace = grace;
        self
    }

    /// Run the request to completion.
    ///
    /// A nonzero exit code is returned as an ordinary result.
    ///
    /// # Errors
    ///
    /// Returns a spawn variant of `ExecError` if the program cannot be
    /// started, `ExecError::Timeout` if it outlives the request timeout
    /// (captured output is discarded), or `ExecError::Io` if waiting or
    /// reading fails.
    pub async fn execute(&self, request: &ExecutionRequest) -> Result<ExecutionResult, ExecError> {
        let args = request.build_args();

        let mut cmd = Command::new(request.program());
        cmd.args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        // Own process group, so a timeout can reach grandchildren too.
        #[cfg(unix)]
        cmd.process_group(0);

        for (key, value) in request.get_env() {
            cmd.env(key, value);
        }

        if let Some(dir) = request.get_working_dir() {
            cmd.current_dir(dir);
        }

        tracing::debug!(program = %request.program(), ?args, "Spawning process");

        let started = Instant::now();
        let mut child = cmd
            .spawn()
            .map_err(|e| ExecError::from_spawn(request.program(), e))?;
        // Taken now: `id()` returns None once the child has been reaped.
        let pid = child.id();

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let timeout = request.get_timeout();

        let outcome = tokio::time::timeout(timeout, async {
            tokio::join!(
                async {
                    let status = child.wait().await;
                    (status, started.elapsed())
                },
                read_stream(stdout),
                read_stream(stderr),
            )
        })
        .await;

        let Ok(((status, elapsed), stdout, stderr)) = outcome else {
            let timeout_ms = duration_millis(timeout);
            tracing::warn!(
                program = %request.program(),
                timeout_ms,
                "Process exceeded timeout, terminating"
            );
            terminate(&mut child, pid, self.terminate_grace).await;
            return Err(ExecError::Timeout { timeout_ms });
        };

        let status = status?;
        let result = ExecutionResult {
            exit_code: status.code().unwrap_or(SIGNAL_EXIT_CODE),
            stdout: stdout?,
            stderr: stderr?,
            duration_ms: duration_millis(elapsed),
        };

        tracing::debug!(
            program = %request.program(),
            exit_code = result.exit_code,
            duration_ms = result.duration_ms,
            "Process exited"
        );

        Ok(result)
    }
}

fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Read a pipe to the end, decode lossily, and strip escape sequences.
async fn read_stream<R>(pipe: Option<R>) -> std::io::Result<String>
where
    R: AsyncRead + Unpin,
{
    let Some(mut pipe) = pipe else {
        return Ok(String::new());
    };
    let mut buf = Vec::new();
    pipe.read_to_end(&mut buf).await?;
    let text = String::from_utf8_lossy(&buf);
    Ok(ansi::strip(&text).into_owned())
}

/// Stop a timed-out child and everything it started.
///
/// On Unix the child leads its own process group. The group gets SIGTERM,
/// then SIGKILL once `grace` elapses or as soon as the group is empty.
/// Signalling the group reaches grandchildren still holding our pipes, even
/// when the child itself has already exited. On other platforms, kills the
/// child immediately.
async fn terminate(child: &mut Child, pid: Option<u32>, grace: Duration) {
    #[cfg(unix)]
    {
        use nix::sys::signal::{killpg, Signal};
        use nix::unistd::Pid;

        if let Some(pid) = pid {
            let group = Pid::from_raw(i32::try_from(pid).unwrap_or(i32::MAX));
            if killpg(group, Signal::SIGTERM).is_ok() {
                let deadline = Instant::now() + grace;
                while Instant::now() < deadline {
                    // A zombie leader still counts as a group member.
                    let _ = child.try_wait();
                    if killpg(group, None).is_err() {
                        break;
                    }
                    tokio::time::sleep(GROUP_POLL_INTERVAL).await;
                }
            }
            if let Err(errno) = killpg(group, Signal::SIGKILL) {
                tracing::trace!(%errno, "Process group already gone");
            }
        }
    }

    #[cfg(not(unix))]
    let _ = (pid, grace);

    if matches!(child.try_wait(), Ok(None)) {
        if let Err(e) = child.kill().await {
            tracing::warn!(error = %e, "Failed to kill timed-out process");
        }
    }
}
