//! Comma-separated values parser.

use super::{non_blank_lines, zip_record, Record};

/// Parse CSV text. The first non-blank line is the header.
///
/// Fields may be double-quoted to contain commas; `""` inside quotes is a
/// literal quote. An unterminated quote runs to the end of the line.
/// Trailing empty header fields (from a trailing comma) are dropped.
#[must_use]
pub fn parse(text: &str) -> Vec<Record> {
    let mut lines = non_blank_lines(text);
    let Some(header_line) = lines.next() else {
        return Vec::new();
    };

    let mut headers = split_fields(header_line);
    while headers.last().is_some_and(String::is_empty) {
        headers.pop();
    }

    lines
        .map(|line| zip_record(&headers, split_fields(line)))
        .collect()
}

fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.trim().is_empty() => {
                field.clear();
                in_quotes = true;
            }
            ',' if !in_quotes => fields.push(std::mem::take(&mut field).trim().to_string()),
            _ => field.push(c),
        }
    }
    fields.push(field.trim().to_string());

    fields
}
