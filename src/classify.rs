//! Failure classification from stderr text.
//!
//! Maps the stderr of a failed run onto a fixed error taxonomy, attaching a
//! remediation hint for every category except the generic fallback.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::executor::ExecutionResult;

/// HTTP status codes standing alone, not digits inside a longer number.
static STATUS_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(401|403|429)\b").expect("status code pattern is valid"));

/// Error taxonomy for failed CLI runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Missing, expired or rejected credentials.
    AuthError,
    /// Authenticated but not allowed.
    PermissionError,
    /// Bad arguments or unknown resources.
    ValidationError,
    /// Quota or rate limiting by the upstream API.
    ApiError,
    /// Nothing more specific matched.
    CliExecutionFailed,
}

impl ErrorCode {
    /// Wire name of the code.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AuthError => "AUTH_ERROR",
            Self::PermissionError => "PERMISSION_ERROR",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::ApiError => "API_ERROR",
            Self::CliExecutionFailed => "CLI_EXECUTION_FAILED",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Context carried by a classified error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetails {
    /// The stderr text that was classified.
    pub stderr: String,
    /// Exit code of the failed run.
    pub exit_code: i32,
    /// Remediation hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// A failed run described by taxonomy code, message and hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedError {
    pub code: ErrorCode,
    pub message: String,
    pub details: ErrorDetails,
}

impl ClassifiedError {
    /// Get the suggestion, if any.
    #[must_use]
    pub fn suggestion(&self) -> Option<&str> {
        self.details.suggestion.as_deref()
    }
}

impl std::fmt::Display for ClassifiedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

struct Rule {
    code: ErrorCode,
    phrases: &'static [&'static str],
    status_codes: &'static [&'static str],
    message: &'static str,
    suggestion: &'static str,
}

/// Checked in order; the first rule with a matching phrase or status code
/// wins.
const RULES: &[Rule] = &[
    Rule {
        code: ErrorCode::AuthError,
        phrases: &[
            "unauthorized",
            "unauthenticated",
            "authentication",
            "credential",
            "token",
            "login required",
            "forbidden",
        ],
        status_codes: &["401"],
        message: "Authentication failed",
        suggestion: "Log in again with the CLI and verify that your credentials or access token are valid and not expired.",
    },
    Rule {
        code: ErrorCode::PermissionError,
        phrases: &["permission denied", "permission", "access denied"],
        status_codes: &["403"],
        message: "Permission denied",
        suggestion: "Check that the active account has the roles or permissions required for this resource.",
    },
    Rule {
        code: ErrorCode::ValidationError,
        phrases: &["not found", "invalid", "does not exist"],
        status_codes: &[],
        message: "Invalid request or resource not found",
        suggestion: "Verify the resource names, IDs and arguments passed to the command.",
    },
    Rule {
        code: ErrorCode::ApiError,
        phrases: &["quota", "rate limit", "too many requests"],
        status_codes: &["429"],
        message: "API quota or rate limit exceeded",
        suggestion: "Wait for the quota to reset or request a quota increase, then retry.",
    },
];

/// Classify a failed execution by its stderr.
#[must_use]
pub fn classify(result: &ExecutionResult) -> ClassifiedError {
    classify_stderr(&result.stderr, result.exit_code)
}

/// Classify raw stderr text. Never fails; unmatched text yields
/// [`ErrorCode::CliExecutionFailed`].
#[must_use]
pub fn classify_stderr(stderr: &str, exit_code: i32) -> ClassifiedError {
    let haystack = stderr.to_lowercase();
    let status_codes: Vec<&str> = STATUS_CODE
        .find_iter(&haystack)
        .map(|m| m.as_str())
        .collect();

    let matched = RULES.iter().find(|rule| {
        rule.phrases.iter().any(|phrase| haystack.contains(phrase))
            || rule.status_codes.iter().any(|code| status_codes.contains(code))
    });

    let (code, message, suggestion) = match matched {
        Some(rule) => (
            rule.code,
            rule.message.to_string(),
            Some(rule.suggestion.to_string()),
        ),
        None => (
            ErrorCode::CliExecutionFailed,
            format!("Command failed with exit code {exit_code}"),
            None,
        ),
    };

    tracing::debug!(%code, exit_code, "Classified CLI failure");

    ClassifiedError {
        code,
        message,
        details: ErrorDetails {
            stderr: stderr.to_string(),
            exit_code,
            suggestion,
        },
    }
}
