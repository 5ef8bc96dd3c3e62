//! Bordered table parser for box-drawing and `+---+` ASCII tables.

use serde_json::Value;

use super::border::{is_border_line, is_vertical_separator};
use super::{non_blank_lines, zip_record, OutputFormat, ParseError, Record};

/// Parse a bordered table.
///
/// Border rules are discarded. The first remaining line is the header and
/// the rest are data rows. Rows without any non-empty cell are dropped.
///
/// # Errors
///
/// Returns `ParseError::MissingHeader` if the text has no content lines.
pub fn parse(text: &str) -> Result<Vec<Record>, ParseError> {
    let mut content = non_blank_lines(text).filter(|line| !is_border_line(line));

    let headers = content
        .next()
        .map(split_cells)
        .filter(|headers| !headers.is_empty())
        .ok_or(ParseError::MissingHeader(OutputFormat::Table))?;

    Ok(content
        .map(|line| zip_record(&headers, split_cells(line)))
        .filter(is_populated)
        .collect())
}

/// Split a content line into trimmed cells, removing one outer separator
/// on each side.
fn split_cells(line: &str) -> Vec<String> {
    let mut inner = line.trim();
    if let Some(rest) = inner.strip_prefix(is_vertical_separator) {
        inner = rest;
    }
    if let Some(rest) = inner.strip_suffix(is_vertical_separator) {
        inner = rest;
    }

    inner
        .split(is_vertical_separator)
        .map(|cell| cell.trim().to_string())
        .collect()
}

fn is_populated(record: &Record) -> bool {
    record
        .values()
        .any(|value| !matches!(value, Value::String(s) if s.is_empty()))
}
