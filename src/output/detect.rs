//! Heuristic output format detection.

use super::border::{is_border_line, is_box_drawing, is_markdown_separator};
use super::{non_blank_lines, OutputFormat};

/// Classify `text` into one of the supported output formats.
///
/// Cues overlap, so checks run in a fixed priority order and the first
/// match wins:
/// 1. JSON: trimmed text wrapped in `{}` or `[]`
/// 2. Text: no non-blank lines
/// 3. Markdown: first line has `|`, second line is a `|---|` separator
/// 4. Table: first line is a border rule or contains box-drawing glyphs
/// 5. CSV: first line has a comma and no `|`
/// 6. Text: anything else
///
/// JSON is checked first because JSON payloads may contain any of the
/// other punctuation. Markdown and tables are checked before CSV because
/// header cells can contain commas.
#[must_use]
pub fn detect(text: &str) -> OutputFormat {
    let trimmed = text.trim();
    if (trimmed.starts_with('{') && trimmed.ends_with('}'))
        || (trimmed.starts_with('[') && trimmed.ends_with(']'))
    {
        return OutputFormat::Json;
    }

    let mut lines = non_blank_lines(text);
    let Some(first) = lines.next() else {
        return OutputFormat::Text;
    };

    if first.contains('|') && lines.next().is_some_and(is_markdown_separator) {
        return OutputFormat::Markdown;
    }

    if is_border_line(first) || first.chars().any(is_box_drawing) {
        return OutputFormat::Table;
    }

    if first.contains(',') && !first.contains('|') {
        return OutputFormat::Csv;
    }

    OutputFormat::Text
}
