//! Scalar coercion for table, CSV and Markdown cells.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Number, Value};

/// Optional minus, digits with optional comma grouping, optional fraction.
static NUMERIC_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d+)?$").expect("numeric pattern is valid")
});

/// Convert a cell into a boolean, number, or string.
///
/// Checked in order: empty, boolean (case-insensitive), numeric, string.
/// Thousands separators are removed before numeric conversion.
#[must_use]
pub fn coerce(cell: &str) -> Value {
    let cell = cell.trim();

    if cell.is_empty() {
        return Value::String(String::new());
    }
    if cell.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if cell.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if NUMERIC_PATTERN.is_match(cell) {
        if let Some(number) = parse_number(&cell.replace(',', "")) {
            return Value::Number(number);
        }
    }

    Value::String(cell.to_string())
}

fn parse_number(digits: &str) -> Option<Number> {
    if !digits.contains('.') {
        if let Ok(int) = digits.parse::<i64>() {
            return Some(int.into());
        }
    }
    digits.parse::<f64>().ok().and_then(Number::from_f64)
}
