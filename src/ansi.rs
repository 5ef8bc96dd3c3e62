//! Terminal escape sequence stripping.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// CSI sequences: ESC, `[`, parameter digits/semicolons, one final letter.
static CSI_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*[A-Za-z]").expect("CSI pattern is valid"));

/// Remove ANSI CSI escape sequences from `text`.
///
/// All other characters, including box-drawing glyphs, pass through
/// unchanged. Text without escape sequences is returned borrowed.
///
/// Removal repeats until no sequence remains, so nested fragments such as
/// `ESC[ESC[0mm` cannot reassemble into a new sequence.
#[must_use]
pub fn strip(text: &str) -> Cow<'_, str> {
    if !CSI_PATTERN.is_match(text) {
        return Cow::Borrowed(text);
    }
    let mut stripped = CSI_PATTERN.replace_all(text, "").into_owned();
    while CSI_PATTERN.is_match(&stripped) {
        stripped = CSI_PATTERN.replace_all(&stripped, "").into_owned();
    }
    Cow::Owned(stripped)
}
