//! Run command: execute, then parse or classify.
//!
//! Ties the pieces together the way most callers want them: a successful
//! run yields parsed stdout, a nonzero exit yields a classified error.

use crate::classify::{classify, ClassifiedError};
use crate::config::BridgeConfig;
use crate::executor::{ExecError, ExecutionRequest, ExecutionResult};
use crate::output::{parse, parse_as, OutputFormat, ParsedOutput};

/// Errors that prevent the run command from producing an outcome.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// Neither the config nor the arguments named a program.
    #[error("No program given and none configured")]
    NoProgram,
    /// The executor failed to spawn or timed out.
    #[error(transparent)]
    Exec(#[from] ExecError),
}

impl RunError {
    /// Process exit code for the binary, following shell conventions
    /// (127 for spawn failures, 124 for timeouts).
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::NoProgram => 2,
            Self::Exec(e) if e.is_spawn_failure() => 127,
            Self::Exec(e) if e.is_timeout() => 124,
            Self::Exec(_) => 1,
        }
    }
}

/// What a run produced.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// Exit code zero; stdout parsed.
    Parsed {
        result: ExecutionResult,
        output: ParsedOutput,
    },
    /// Exit code zero; parsing disabled.
    Raw(ExecutionResult),
    /// Nonzero exit, classified from stderr.
    Failed {
        result: ExecutionResult,
        error: ClassifiedError,
    },
}

impl RunOutcome {
    /// The underlying execution result.
    #[must_use]
    pub fn result(&self) -> &ExecutionResult {
        match self {
            Self::Parsed { result, .. } | Self::Raw(result) | Self::Failed { result, .. } => result,
        }
    }
}

/// Options layered over the loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct RunCommand {
    program: Option<String>,
    args: Vec<String>,
    timeout_ms: Option<u64>,
    raw: Option<bool>,
    format: Option<OutputFormat>,
}

impl RunCommand {
    /// Create a run command. When no program is set, the configured
    /// program is used, or else the first argument.
    #[must_use]
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Override the program.
    #[must_use]
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = Some(program.into());
        self
    }

    /// Override the timeout.
    #[must_use]
    pub fn timeout_ms(mut self, millis: u64) -> Self {
        self.timeout_ms = Some(millis);
        self
    }

    /// Skip parsing.
    #[must_use]
    pub fn raw(mut self, raw: bool) -> Self {
        self.raw = Some(raw);
        self
    }

    /// Parse as a fixed format instead of detecting it.
    #[must_use]
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Build the execution request this command would run.
    ///
    /// # Errors
    ///
    /// Returns `RunError::NoProgram` if no program can be determined.
    pub fn request(&self, config: &BridgeConfig) -> Result<ExecutionRequest, RunError> {
        let mut args = self.args.iter();
        let program = self
            .program
            .clone()
            .or_else(|| config.executor.program.clone())
            .or_else(|| args.next().cloned())
            .ok_or(RunError::NoProgram)?;

        let mut request = config.executor.request(program).args(args.cloned());
        if let Some(millis) = self.timeout_ms {
            request = request.timeout_ms(millis);
        }
        Ok(request)
    }

    /// Execute and interpret the result.
    ///
    /// # Errors
    ///
    /// Returns `RunError` if no program is known, the program cannot be
    /// spawned, or it times out. A nonzero exit is `RunOutcome::Failed`.
    pub async fn execute(&self, config: &BridgeConfig) -> Result<RunOutcome, RunError> {
        let request = self.request(config)?;
        let result = config.executor.executor().execute(&request).await?;

        if !result.success() {
            let error = classify(&result);
            tracing::info!(code = %error.code, exit_code = result.exit_code, "Command failed");
            return Ok(RunOutcome::Failed { result, error });
        }

        if self.raw.unwrap_or(config.output.raw) {
            return Ok(RunOutcome::Raw(result));
        }

        let output = match self.format.or(config.output.format) {
            Some(format) => parse_as(&result.stdout, format),
            None => parse(&result.stdout),
        };
        tracing::debug!(format = %output.format, "Parsed command output");

        Ok(RunOutcome::Parsed { result, output })
    }
}
