//! Execution request builder.

use std::path::PathBuf;
use std::time::Duration;

/// Timeout applied when a request does not set one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

/// A single invocation of an external program.
///
/// The child inherits the current process environment; entries added with
/// [`env`](Self::env) are layered on top.
#[derive(Debug, Clone)]
pub struct ExecutionRequest {
    program: String,
    command: Option<String>,
    args: Vec<String>,
    timeout: Duration,
    env: Vec<(String, String)>,
    working_dir: Option<PathBuf>,
}

impl ExecutionRequest {
    /// Create a request for the given program path or name.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            command: None,
            args: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
            env: Vec::new(),
            working_dir: None,
        }
    }

    /// Set the leading command token, placed before all other arguments.
    #[must_use]
    pub fn command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Append a single argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the timeout. Zero is raised to one millisecond.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout.max(Duration::from_millis(1));
        self
    }

    /// Set the timeout in milliseconds.
    #[must_use]
    pub fn timeout_ms(self, millis: u64) -> Self {
        self.timeout(Duration::from_millis(millis))
    }

    /// Add an environment variable for the child.
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Set the working directory for the child.
    #[must_use]
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Get the program.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Get the configured timeout.
    #[must_use]
    pub fn get_timeout(&self) -> Duration {
        self.timeout
    }

    /// Get the environment overrides.
    #[must_use]
    pub fn get_env(&self) -> &[(String, String)] {
        &self.env
    }

    /// Get the working directory, if set.
    #[must_use]
    pub fn get_working_dir(&self) -> Option<&PathBuf> {
        self.working_dir.as_ref()
    }

    /// Build the full argument vector: command token first, then args.
    #[must_use]
    pub fn build_args(&self) -> Vec<String> {
        self.command
            .iter()
            .chain(self.args.iter())
            .cloned()
            .collect()
    }
}
