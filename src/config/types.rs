//! Configuration types.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::executor::{ExecutionRequest, Executor, DEFAULT_TERMINATE_GRACE, DEFAULT_TIMEOUT};
use crate::output::OutputFormat;

/// Top-level configuration file contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// How the external program is run.
    pub executor: ExecutorConfig,
    /// How its output is handled.
    pub output: OutputConfig,
}

/// Settings for running the external program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutorConfig {
    /// Program to run when none is given on the command line.
    #[serde(default)]
    pub program: Option<String>,
    /// Timeout per run in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Grace period between SIGTERM and SIGKILL on timeout.
    #[serde(default = "default_terminate_grace_ms")]
    pub terminate_grace_ms: u64,
    /// Extra environment variables for the child.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    /// Working directory for the child.
    #[serde(default)]
    pub working_dir: Option<PathBuf>,
}

fn default_timeout_ms() -> u64 {
    u64::try_from(DEFAULT_TIMEOUT.as_millis()).unwrap_or(u64::MAX)
}

fn default_terminate_grace_ms() -> u64 {
    u64::try_from(DEFAULT_TERMINATE_GRACE.as_millis()).unwrap_or(u64::MAX)
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            program: None,
            timeout_ms: default_timeout_ms(),
            terminate_grace_ms: default_terminate_grace_ms(),
            env: BTreeMap::new(),
            working_dir: None,
        }
    }
}

impl ExecutorConfig {
    /// Build a request for `program` with the configured timeout,
    /// environment and working directory.
    #[must_use]
    pub fn request(&self, program: impl Into<String>) -> ExecutionRequest {
        let mut request = ExecutionRequest::new(program).timeout_ms(self.timeout_ms);
        for (key, value) in &self.env {
            request = request.env(key, value);
        }
        if let Some(dir) = &self.working_dir {
            request = request.working_dir(dir);
        }
        request
    }

    /// Build an executor with the configured termination grace period.
    #[must_use]
    pub fn executor(&self) -> Executor {
        Executor::new().with_terminate_grace(Duration::from_millis(self.terminate_grace_ms))
    }
}

/// Settings for output handling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Skip parsing and emit the raw execution result.
    pub raw: bool,
    /// Parse as this format instead of detecting it.
    pub format: Option<OutputFormat>,
}
