//! Output format detection and parsing.
//!
//! [`parse`] turns captured CLI output into a [`ParsedOutput`]: the text is
//! classified with [`detect`], handed to the matching parser, and any parse
//! failure falls back to the original text with `parse_error` set.

mod border;
mod coerce;
pub mod csv;
mod detect;
pub mod markdown;
pub mod table;

pub use border::*;
pub use coerce::*;
pub use detect::*;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A parsed row: column name to coerced scalar, in column order.
pub type Record = serde_json::Map<String, Value>;

/// Output formats the detector can assign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Markdown,
    Text,
}

impl OutputFormat {
    /// Lowercase tag for this format.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Table => "table",
            Self::Csv => "csv",
            Self::Markdown => "markdown",
            Self::Text => "text",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "table" => Ok(Self::Table),
            "csv" => Ok(Self::Csv),
            "markdown" | "md" => Ok(Self::Markdown),
            "text" => Ok(Self::Text),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

/// Parsed payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParsedData {
    /// Any JSON value.
    Json(Value),
    /// Rows from a table, CSV or Markdown table, in source order.
    Records(Vec<Record>),
    /// Unparsed text.
    Text(String),
}

/// Result of parsing CLI output.
///
/// When `parse_error` is set, `format` is [`OutputFormat::Text`] and `data`
/// holds the original input.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedOutput {
    pub format: OutputFormat,
    pub data: ParsedData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_error: Option<String>,
}

impl ParsedOutput {
    fn text(raw: &str) -> Self {
        Self {
            format: OutputFormat::Text,
            data: ParsedData::Text(raw.to_string()),
            parse_error: None,
        }
    }

    fn fallback(raw: &str, error: &ParseError) -> Self {
        Self {
            parse_error: Some(error.to_string()),
            ..Self::text(raw)
        }
    }

    /// Returns the records if the output was tabular.
    #[must_use]
    pub fn records(&self) -> Option<&[Record]> {
        match &self.data {
            ParsedData::Records(records) => Some(records),
            _ => None,
        }
    }

    /// Returns the JSON value if the output was JSON.
    #[must_use]
    pub fn json(&self) -> Option<&Value> {
        match &self.data {
            ParsedData::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the text if the output was left unparsed.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            ParsedData::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Errors raised by the structured parsers.
///
/// These never reach callers of [`parse`]; they become `parse_error`.
#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    /// Malformed JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// No header row could be found.
    #[error("No header row found in {0} output")]
    MissingHeader(OutputFormat),
}

/// Detect the format of `text` and parse it.
#[must_use]
pub fn parse(text: &str) -> ParsedOutput {
    parse_as(text, detect(text))
}

/// Parse `text` as the given format, falling back to text on failure.
#[must_use]
pub fn parse_as(text: &str, format: OutputFormat) -> ParsedOutput {
    let parsed = match format {
        OutputFormat::Json => parse_json(text).map(ParsedData::Json),
        OutputFormat::Table => table::parse(text).map(ParsedData::Records),
        OutputFormat::Csv => Ok(ParsedData::Records(csv::parse(text))),
        OutputFormat::Markdown => markdown::parse(text).map(ParsedData::Records),
        OutputFormat::Text => return ParsedOutput::text(text),
    };

    match parsed {
        Ok(data) => ParsedOutput {
            format,
            data,
            parse_error: None,
        },
        Err(e) => {
            tracing::debug!(%format, error = %e, "Parse failed, falling back to text");
            ParsedOutput::fallback(text, &e)
        }
    }
}

/// Parse JSON text.
///
/// # Errors
///
/// Returns `ParseError::Json` if the text is not valid JSON.
pub fn parse_json(text: &str) -> Result<Value, ParseError> {
    Ok(serde_json::from_str(text.trim())?)
}

pub(crate) fn non_blank_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().filter(|line| !line.trim().is_empty())
}

/// Zip cells against headers. Cells past the header are dropped; missing
/// cells are left out of the record.
pub(crate) fn zip_record(headers: &[String], cells: Vec<String>) -> Record {
    headers
        .iter()
        .zip(cells)
        .map(|(header, cell)| (header.clone(), coerce(&cell)))
        .collect()
}
