use crate::config::{Config, ConfigError};
use crate::objects::InputFormat;
use crate::storage::{BackendLocal, StorageManager};

fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

/// Fresh start: no file → default config.yaml created
#[test]
fn test_empty_start() {
    let dir = temp_dir();
    let base_path = dir.path().to_str().unwrap();
    let store = BackendLocal::new(base_path).unwrap();

    let config = Config::load_with(base_path).unwrap();

    assert!(store.exists("config.yaml"));
    assert_eq!(config.text_fields, vec!["name", "comments"]);
    assert_eq!(config.default_format, InputFormat::Json);
    assert!(config.saved_queries.is_empty());
}

/// Partial config is filled with defaults and normalized on disk
#[test]
fn test_partial_config_is_normalized() {
    let dir = temp_dir();
    let base_path = dir.path().to_str().unwrap();
    let store = BackendLocal::new(base_path).unwrap();

    let config_content = r#"
text_fields:
- " Name "
- ""
- Alias
default_format: csv
"#;
    store.write("config.yaml", config_content.as_bytes()).unwrap();

    let config = Config::load_with(base_path).unwrap();
    assert_eq!(config.text_fields, vec!["name", "alias"]);
    assert_eq!(config.default_format, InputFormat::Csv);

    let config_str = String::from_utf8(store.read("config.yaml").unwrap()).unwrap();
    let value: serde_yml::Value = serde_yml::from_str(&config_str).unwrap();
    if let serde_yml::Value::Mapping(ref map) = value {
        assert!(map.contains_key(&serde_yml::Value::String("saved_queries".to_string())));
    } else {
        panic!("config.yaml is not a mapping");
    }
}

#[test]
fn test_malformed_config() {
    let dir = temp_dir();
    let base_path = dir.path().to_str().unwrap();
    let store = BackendLocal::new(base_path).unwrap();
    store.write("config.yaml", b"text_fields: {{").unwrap();

    assert!(matches!(
        Config::load_with(base_path),
        Err(ConfigError::Malformed(_))
    ));
}

#[test]
fn test_duplicate_saved_names_rejected() {
    let dir = temp_dir();
    let base_path = dir.path().to_str().unwrap();
    let store = BackendLocal::new(base_path).unwrap();

    let config_content = r#"
saved_queries:
- name: down
  query: status:down
- name: DOWN
  query: status:up
"#;
    store.write("config.yaml", config_content.as_bytes()).unwrap();

    assert!(matches!(
        Config::load_with(base_path),
        Err(ConfigError::DuplicateName(name)) if name == "DOWN"
    ));
}

/// CRUD: load → add → save → reload → remove
#[test]
fn test_saved_queries_crud() {
    let dir = temp_dir();
    let base_path = dir.path().to_str().unwrap();

    let mut config = Config::load_with(base_path).unwrap();
    let saved = config
        .add_saved_query("routers", "Class:Router NOT lab", Some("core gear".to_string()))
        .unwrap();
    assert_eq!(saved.query, "not lab class:router");
    config.save().unwrap();

    assert!(matches!(
        config.add_saved_query("ROUTERS", "x", None),
        Err(ConfigError::DuplicateName(_))
    ));
    assert!(matches!(
        config.add_saved_query("two words", "x", None),
        Err(ConfigError::InvalidName)
    ));

    let mut config = Config::load_with(base_path).unwrap();
    let saved = config.saved_query("Routers").unwrap();
    assert_eq!(saved.comment.as_deref(), Some("core gear"));

    let removed = config.remove_saved_query("routers").unwrap();
    assert_eq!(removed.name, "routers");
    assert!(matches!(
        config.remove_saved_query("routers"),
        Err(ConfigError::NotFound(_))
    ));
    config.save().unwrap();

    let config = Config::load_with(base_path).unwrap();
    assert!(config.saved_queries.is_empty());
}

/// Hand-edited saved queries are stored back in canonical form
#[test]
fn test_saved_queries_canonicalized_on_load() {
    let dir = temp_dir();
    let base_path = dir.path().to_str().unwrap();
    let store = BackendLocal::new(base_path).unwrap();

    let config_content = r#"
saved_queries:
- name: lab
  query: LAB not
- name: rack
  query: '"Rack 4'
"#;
    store.write("config.yaml", config_content.as_bytes()).unwrap();

    let config = Config::load_with(base_path).unwrap();
    assert_eq!(config.saved_query("lab").unwrap().query, "lab");
    assert_eq!(config.saved_query("rack").unwrap().query, "\"rack 4\"");

    let reloaded = Config::load_with(base_path).unwrap();
    assert_eq!(reloaded.saved_queries, config.saved_queries);
}
