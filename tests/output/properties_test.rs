//! Property tests for the stripper, detector and parser.

use cli_bridge::ansi::strip;
use cli_bridge::output::{detect, parse, OutputFormat};
use proptest::prelude::*;

fn with_escapes() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[a-zA-Z0-9 ,|│─┌┐+\\-\n]{0,12}",
            "\x1b\\[[0-9;]{0,6}[a-zA-Z]",
            Just("\x1b[".to_string()),
        ],
        0..16,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn strip_is_noop_without_escapes(text in "[^\x1b]{0,200}") {
        prop_assert_eq!(strip(&text), text.as_str());
    }

    #[test]
    fn strip_is_idempotent(text in with_escapes()) {
        let once = strip(&text).into_owned();
        prop_assert_eq!(strip(&once), once.as_str());
    }

    #[test]
    fn detect_is_total(text in any::<String>()) {
        let format = detect(&text);
        prop_assert!(matches!(
            format,
            OutputFormat::Json
                | OutputFormat::Table
                | OutputFormat::Csv
                | OutputFormat::Markdown
                | OutputFormat::Text
        ));
    }

    #[test]
    fn parse_never_panics_and_is_deterministic(text in with_escapes()) {
        let first = parse(&text);
        let second = parse(&text);
        prop_assert_eq!(&first, &second);
        if first.parse_error.is_some() {
            prop_assert_eq!(first.format, OutputFormat::Text);
            prop_assert_eq!(first.as_text(), Some(text.as_str()));
        }
    }
}
