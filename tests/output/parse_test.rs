//! End-to-end parsing of realistic CLI output.

use cli_bridge::ansi;
use cli_bridge::output::{detect, parse, OutputFormat, ParsedData};
use serde_json::json;

#[test]
fn csv_header_and_row_are_coerced() {
    let output = parse("a,b\n1,true");

    assert_eq!(output.format, OutputFormat::Csv);
    assert_eq!(output.data, ParsedData::Records(vec![json_record(json!({"a": 1, "b": true}))]));
    assert!(output.parse_error.is_none());
}

#[test]
fn markdown_table_is_parsed() {
    let output = parse("| Name | Value |\n|---|---|\n| Test | 123 |");

    assert_eq!(output.format, OutputFormat::Markdown);
    assert_eq!(
        output.records().unwrap(),
        &[json_record(json!({"Name": "Test", "Value": 123}))]
    );
}

#[test]
fn bordered_table_is_parsed() {
    let text = "┌──────┬───────┐\n│ Name │ Value │\n├──────┼───────┤\n│ Test │ 123   │\n└──────┴───────┘\n";
    let output = parse(text);

    assert_eq!(output.format, OutputFormat::Table);
    assert_eq!(
        output.records().unwrap(),
        &[json_record(json!({"Name": "Test", "Value": 123}))]
    );
}

#[test]
fn malformed_json_falls_back_to_text() {
    let input = "{\"name\": \"demo\", \"count\": }";
    let output = parse(input);

    assert_eq!(output.format, OutputFormat::Text);
    assert_eq!(output.data, ParsedData::Text(input.to_string()));
    assert!(!output.parse_error.unwrap().is_empty());
}

#[test]
fn json_array_is_parsed() {
    let output = parse("[\n  {\"projectId\": \"demo-1\", \"enabled\": true}\n]\n");

    assert_eq!(output.format, OutputFormat::Json);
    assert_eq!(
        output.json().unwrap(),
        &json!([{"projectId": "demo-1", "enabled": true}])
    );
}

#[test]
fn json_values_are_not_coerced() {
    let output = parse(r#"{"id": "123", "flag": "true"}"#);
    assert_eq!(output.json().unwrap()["id"], json!("123"));
    assert_eq!(output.json().unwrap()["flag"], json!("true"));
}

#[test]
fn colored_table_output_parses_after_stripping() {
    let raw = "\x1b[1m+----------+--------+\x1b[0m\n\
               | \x1b[36mSERVICE\x1b[0m  | STATUS |\n\
               +----------+--------+\n\
               | api      | \x1b[32mtrue\x1b[0m   |\n\
               | worker   | \x1b[31mfalse\x1b[0m  |\n\
               +----------+--------+";
    let clean = ansi::strip(raw);
    let output = parse(&clean);

    assert_eq!(output.format, OutputFormat::Table);
    let records = output.records().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["SERVICE"], json!("api"));
    assert_eq!(records[0]["STATUS"], json!(true));
    assert_eq!(records[1]["STATUS"], json!(false));
}

#[test]
fn markdown_with_commas_in_cells_is_not_csv() {
    let text = "| Region | Zones |\n|--------|-------|\n| us-east1 | b, c, d |";
    let output = parse(text);

    assert_eq!(output.format, OutputFormat::Markdown);
    assert_eq!(output.records().unwrap()[0]["Zones"], json!("b, c, d"));
}

#[test]
fn records_preserve_source_order() {
    let output = parse("name,size\nc,3\na,1\nb,2\n");
    let names: Vec<_> = output
        .records()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["c", "a", "b"]);
}

#[test]
fn numeric_cells_with_thousands_separators() {
    let text = "│ Metric │ Total │\n│ calls  │ 1,234,567 │\n│ ratio  │ -0.25 │";
    let output = parse(text);
    let records = output.records().unwrap();
    assert_eq!(records[0]["Total"], json!(1_234_567));
    assert_eq!(records[1]["Total"], json!(-0.25));
}

#[test]
fn plain_log_output_is_text() {
    let text = "Updating project settings...\nDone.\n";
    assert_eq!(detect(text), OutputFormat::Text);

    let output = parse(text);
    assert_eq!(output.as_text(), Some(text));
    assert!(output.parse_error.is_none());
}

#[test]
fn empty_output_is_text() {
    let output = parse("");
    assert_eq!(output.format, OutputFormat::Text);
    assert_eq!(output.as_text(), Some(""));
}

#[test]
fn parse_is_idempotent() {
    let text = "┌───┬───┐\n│ k │ v │\n│ a │ 1 │\n└───┴───┘";
    assert_eq!(parse(text), parse(text));
}

fn json_record(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}
