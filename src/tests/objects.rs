use std::collections::BTreeMap;

use crate::objects::{load, load_path, InputFormat, LoadError, ObjectRecord};
use crate::search_query::{filter, parse, AttributeProvider};

fn default_fields() -> Vec<String> {
    vec!["name".to_string(), "comments".to_string()]
}

#[test]
fn test_record_text_and_attributes() {
    let attributes = BTreeMap::from([
        ("Status".to_string(), "Up".to_string()),
        ("comments".to_string(), "rack 4".to_string()),
    ]);
    let record = ObjectRecord::new("core-sw1", attributes, &default_fields());

    assert_eq!(record.search_text(), "core-sw1 rack 4");
    assert_eq!(record.attribute("status").as_deref(), Some("Up"));
    assert_eq!(record.attribute("name").as_deref(), Some("core-sw1"));
    assert!(record.attribute("Status").is_none());
    assert_eq!(record.to_string(), "core-sw1");
}

#[test]
fn test_record_text_without_fields_uses_everything() {
    let attributes = BTreeMap::from([("ip".to_string(), "10.0.0.1".to_string())]);
    let record = ObjectRecord::new("gw", attributes, &[]);
    // attribute order: ip, name
    assert_eq!(record.search_text(), "10.0.0.1 gw");
}

#[test]
fn test_load_json() {
    let input = r#"[
        {"name": "core-sw1", "Status": "up", "ports": 48, "managed": true, "comments": "Rack 4"},
        {"name": "edge-rt2", "status": "down", "location": null, "tags": ["a", "b"]},
        {"status": "up"},
        "stray"
    ]"#;
    let records = load(input.as_bytes(), InputFormat::Json, &default_fields()).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].attributes["status"], "up");
    assert_eq!(records[0].attributes["ports"], "48");
    assert_eq!(records[0].attributes["managed"], "true");
    assert!(!records[1].attributes.contains_key("location"));
    assert_eq!(records[1].attributes["tags"], r#"["a","b"]"#);

    let query = parse("rack status:UP -managed:false");
    let found = filter(&query, &records);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "core-sw1");
}

#[test]
fn test_load_json_not_a_list() {
    let result = load(r#"{"name": "x"}"#.as_bytes(), InputFormat::Json, &[]);
    assert!(matches!(result, Err(LoadError::NotAList)));
}

#[test]
fn test_load_jsonl() {
    let input = "{\"name\": \"a\", \"zone\": \"1\"}\n\n{\"name\": \"b\", \"zone\": \"2\"}\n";
    let records = load(input.as_bytes(), InputFormat::Jsonl, &[]).unwrap();
    assert_eq!(records.len(), 2);

    let found = filter(&parse("zone:2"), &records);
    assert_eq!(found[0].name, "b");

    let bad = "{\"name\": \"a\"}\nnot json\n";
    assert!(matches!(
        load(bad.as_bytes(), InputFormat::Jsonl, &[]),
        Err(LoadError::JsonLine { line: 2, .. })
    ));
}

#[test]
fn test_load_csv() {
    let input = "Name,Status,Comments\ncore-sw1,up,main rack\nedge-rt2,,spare\n";
    let records = load(input.as_bytes(), InputFormat::Csv, &default_fields()).unwrap();
    assert_eq!(records.len(), 2);
    assert!(!records[1].attributes.contains_key("status"));

    // empty csv cells count as missing attributes
    let found = filter(&parse("-status:up"), &records);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "edge-rt2");

    let found = filter(&parse("\"main rack\""), &records);
    assert_eq!(found[0].name, "core-sw1");
}

#[test]
fn test_load_yaml() {
    let input = r#"
- name: core-sw1
  status: up
  ports: 48
- name: edge-rt2
  status: down
"#;
    let records = load(input.as_bytes(), InputFormat::Yaml, &[]).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].attributes["ports"], "48");

    let empty = load("[]".as_bytes(), InputFormat::Yaml, &[]).unwrap();
    assert!(empty.is_empty());
}

#[test]
fn test_load_path_and_format_guess() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nodes.csv");
    std::fs::write(&path, "name,status\nsw1,up\n").unwrap();

    let format = InputFormat::from_path(&path).unwrap();
    assert_eq!(format, InputFormat::Csv);
    let records = load_path(&path, format, &[]).unwrap();
    assert_eq!(records[0].name, "sw1");

    assert!(matches!(
        load_path(&dir.path().join("missing.csv"), format, &[]),
        Err(LoadError::IO(_))
    ));
    assert_eq!(InputFormat::from_path(std::path::Path::new("x.yml")), Some(InputFormat::Yaml));
    assert_eq!(InputFormat::from_path(std::path::Path::new("x")), None);
}
