//! Line predicates shared by format detection and the table parsers.

/// Vertical cell separators recognized in bordered tables.
pub const VERTICAL_SEPARATORS: [char; 4] = ['│', '┃', '║', '|'];

/// Returns true for characters in the Unicode box-drawing block.
#[must_use]
pub fn is_box_drawing(c: char) -> bool {
    ('\u{2500}'..='\u{257F}').contains(&c)
}

/// Returns true for characters that separate cells within a row.
#[must_use]
pub fn is_vertical_separator(c: char) -> bool {
    VERTICAL_SEPARATORS.contains(&c)
}

/// Returns true if `line` is a table rule carrying no data.
///
/// Covers box-drawing rules (`┌───┬───┐`, `├───┼───┤`) and ASCII rules
/// (`+----+----+`, `+====+`). A line made only of vertical separators and
/// spaces is not a rule: it is an empty content row.
#[must_use]
pub fn is_border_line(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return false;
    }

    let only_rule_chars = trimmed.chars().all(|c| {
        is_box_drawing(c) || matches!(c, '+' | '-' | '=' | ':' | '|') || c.is_whitespace()
    });
    if !only_rule_chars {
        return false;
    }

    let has_glyph_rule = trimmed
        .chars()
        .any(|c| is_box_drawing(c) && !is_vertical_separator(c));
    let has_ascii_rule = trimmed.contains('+') && trimmed.contains(['-', '=']);

    has_glyph_rule || has_ascii_rule
}

/// Returns true if `line` looks like a Markdown header separator
/// (`|---|:---:|`, `--- | ---`).
#[must_use]
pub fn is_markdown_separator(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.contains('-')
        && trimmed
            .chars()
            .all(|c| matches!(c, '|' | '-' | ':') || c.is_whitespace())
}
