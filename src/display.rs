//! Colored status lines for the `cli-bridge` binary.
//!
//! Everything here writes to stderr so stdout carries only the JSON
//! result.

use std::io::{self, Write};

use chrono::Utc;
use owo_colors::OwoColorize;

use crate::classify::ClassifiedError;
use crate::executor::ExecutionResult;

/// Get current timestamp in the same format as tracing.
fn timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

/// Truncate a string to at most `max_len` characters, adding an ellipsis
/// if truncated.
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".to_string()
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{kept}...")
    }
}

/// Print the command about to run.
pub fn print_exec_start(program: &str, args: &[String]) {
    eprintln!(
        "{} {} {} {}",
        timestamp().dimmed(),
        "[EXEC]".blue().bold(),
        program.cyan(),
        truncate(&args.join(" "), 120).dimmed()
    );
    let _ = io::stderr().flush();
}

/// Print the exit summary of a completed run.
pub fn print_exec_done(result: &ExecutionResult) {
    let status = format!("exit={}", result.exit_code);
    let status = if result.success() {
        status.green().to_string()
    } else {
        status.red().to_string()
    };
    eprintln!(
        "{} {} {} {}",
        timestamp().dimmed(),
        "[EXEC]".blue().bold(),
        status,
        format!("({}ms)", result.duration_ms).dimmed()
    );
    let _ = io::stderr().flush();
}

/// Print a classified failure with its hint.
pub fn print_classified_error(error: &ClassifiedError) {
    eprintln!(
        "{} {} {}",
        "[ERROR]".red().bold(),
        error.code.as_str().red(),
        error.message
    );
    let stderr = error.details.stderr.trim();
    if !stderr.is_empty() {
        eprintln!("{} {}", "[STDERR]".yellow().bold(), truncate(stderr, 300).dimmed());
    }
    if let Some(suggestion) = error.suggestion() {
        eprintln!("{} {}", "[HINT]".green().bold(), suggestion);
    }
    let _ = io::stderr().flush();
}

/// Print a parse fallback warning.
pub fn print_parse_fallback(reason: &str) {
    eprintln!(
        "{} {}",
        "[PARSE]".yellow().bold(),
        truncate(reason, 200).dimmed()
    );
    let _ = io::stderr().flush();
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "[ERROR]".red().bold(), message);
    let _ = io::stderr().flush();
}
