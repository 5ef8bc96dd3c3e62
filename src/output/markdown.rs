//! Markdown pipe table parser.

use super::border::is_markdown_separator;
use super::{non_blank_lines, zip_record, OutputFormat, ParseError, Record};

/// Parse a Markdown table.
///
/// The first line is the header and the second line (the `|---|`
/// separator) is skipped unconditionally. Later lines that look like
/// separators are skipped too.
///
/// # Errors
///
/// Returns `ParseError::MissingHeader` if the header row has no cells.
pub fn parse(text: &str) -> Result<Vec<Record>, ParseError> {
    let mut lines = non_blank_lines(text);

    let headers = lines
        .next()
        .map(split_row)
        .filter(|headers| !headers.is_empty())
        .ok_or(ParseError::MissingHeader(OutputFormat::Markdown))?;

    Ok(lines
        .skip(1)
        .filter(|line| !is_markdown_separator(line))
        .map(|line| zip_record(&headers, split_row(line)))
        .collect())
}

/// Split on `|`, dropping the empty cells produced by outer pipes.
fn split_row(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    let trimmed = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('|').unwrap_or(trimmed);
    if trimmed.trim().is_empty() {
        return Vec::new();
    }

    trimmed
        .split('|')
        .map(|cell| cell.trim().to_string())
        .collect()
}
