use std::{
    borrow::Cow,
    collections::BTreeMap,
    fmt,
    io::{BufRead, BufReader, Read},
    path::Path,
};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::search_query::AttributeProvider;

const NAME_FIELD: &str = "name";

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("io error: {0}")]
    IO(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("json error on line {line}: {source}")]
    JsonLine {
        line: usize,
        source: serde_json::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("expected a list of objects")]
    NotAList,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// A JSON array of objects
    #[default]
    Json,
    /// One JSON object per line
    Jsonl,
    /// CSV with a header row
    Csv,
    /// A YAML sequence of mappings
    Yaml,
}

impl InputFormat {
    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "jsonl" | "ndjson" => Some(Self::Jsonl),
            "csv" => Some(Self::Csv),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// A managed object as seen by the filter: a name plus flat string
/// attributes. Attribute names are lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectRecord {
    pub name: String,
    pub attributes: BTreeMap<String, String>,

    #[serde(skip)]
    text: String,
}

impl ObjectRecord {
    /// Builds a record. `text_fields` selects the attributes joined into the
    /// search text; when empty, every attribute value is used.
    pub fn new(name: &str, attributes: BTreeMap<String, String>, text_fields: &[String]) -> Self {
        let mut attributes: BTreeMap<String, String> = attributes
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v))
            .collect();
        attributes.insert(NAME_FIELD.to_string(), name.to_string());

        let text = if text_fields.is_empty() {
            attributes.values().cloned().collect::<Vec<_>>().join(" ")
        } else {
            text_fields
                .iter()
                .filter_map(|field| attributes.get(&field.to_lowercase()))
                .cloned()
                .collect::<Vec<_>>()
                .join(" ")
        };

        Self {
            name: name.to_string(),
            attributes,
            text,
        }
    }

    fn from_value(value: Value, text_fields: &[String]) -> Option<Self> {
        let Value::Object(map) = value else {
            log::warn!("skipping entry that is not an object");
            return None;
        };

        let attributes: BTreeMap<String, String> = map
            .into_iter()
            .filter_map(|(k, v)| stringify(v).map(|v| (k.to_lowercase(), v)))
            .collect();

        let Some(name) = attributes.get(NAME_FIELD).cloned() else {
            log::warn!("skipping object without a name: {attributes:?}");
            return None;
        };
        Some(Self::new(&name, attributes, text_fields))
    }
}

impl fmt::Display for ObjectRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl AttributeProvider for ObjectRecord {
    fn search_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.text)
    }

    fn attribute(&self, name: &str) -> Option<Cow<'_, str>> {
        self.attributes.get(name).map(|v| Cow::Borrowed(v.as_str()))
    }
}

fn stringify(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        nested => Some(nested.to_string()),
    }
}

fn from_values(values: Vec<Value>, text_fields: &[String]) -> Vec<ObjectRecord> {
    values
        .into_iter()
        .filter_map(|v| ObjectRecord::from_value(v, text_fields))
        .collect()
}

/// Read an object list in the given format.
pub fn load<R: Read>(
    reader: R,
    format: InputFormat,
    text_fields: &[String],
) -> Result<Vec<ObjectRecord>, LoadError> {
    let records = match format {
        InputFormat::Json => match serde_json::from_reader::<_, Value>(reader)? {
            Value::Array(values) => from_values(values, text_fields),
            _ => return Err(LoadError::NotAList),
        },
        InputFormat::Yaml => match serde_yml::from_reader::<_, Value>(reader)? {
            Value::Array(values) => from_values(values, text_fields),
            Value::Null => vec![],
            _ => return Err(LoadError::NotAList),
        },
        InputFormat::Jsonl => {
            let mut values = vec![];
            for (idx, line) in BufReader::new(reader).lines().enumerate() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                let value: Value = serde_json::from_str(&line).map_err(|source| LoadError::JsonLine {
                    line: idx + 1,
                    source,
                })?;
                values.push(value);
            }
            from_values(values, text_fields)
        }
        InputFormat::Csv => {
            let mut csv_reader = csv::Reader::from_reader(reader);
            let headers = csv_reader.headers()?.clone();
            let mut values = vec![];
            for record in csv_reader.records() {
                let record = record?;
                let map = headers
                    .iter()
                    .zip(record.iter())
                    .filter(|(_, v)| !v.is_empty())
                    .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
                    .collect();
                values.push(Value::Object(map));
            }
            from_values(values, text_fields)
        }
    };

    log::debug!("loaded {} objects as {format:?}", records.len());
    Ok(records)
}

pub fn load_path(
    path: &Path,
    format: InputFormat,
    text_fields: &[String],
) -> Result<Vec<ObjectRecord>, LoadError> {
    let file = std::fs::File::open(path)?;
    load(file, format, text_fields)
}
