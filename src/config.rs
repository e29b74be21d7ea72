use crate::{
    objects::InputFormat,
    search_query,
    storage::{self, StorageManager},
};
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "config.yaml";

/// Overrides the config directory.
pub const BASE_PATH_ENV: &str = "NXFILTER_BASE_PATH";

const DEFAULT_TEXT_FIELDS: [&str; 2] = ["name", "comments"];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    IO(#[from] std::io::Error),

    #[error("config is malformed: {0}")]
    Malformed(#[from] serde_yml::Error),

    #[error("config file is not valid utf8")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("could not determine home directory")]
    NoHome,

    #[error("saved query name must be non-empty and contain no whitespace")]
    InvalidName,

    #[error("duplicate saved query name: {0}")]
    DuplicateName(String),

    #[error("saved query not found: {0}")]
    NotFound(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedQuery {
    pub name: String,
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Attributes joined into the searchable text of a record. Empty means
    /// all attributes.
    #[serde(default = "default_text_fields")]
    pub text_fields: Vec<String>,

    /// Input format used when it can't be guessed from a file extension.
    #[serde(default)]
    pub default_format: InputFormat,

    #[serde(default)]
    pub saved_queries: Vec<SavedQuery>,

    #[serde(skip_serializing, skip_deserializing)]
    base_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            text_fields: default_text_fields(),
            default_format: InputFormat::default(),
            saved_queries: vec![],
            base_path: String::new(),
        }
    }
}

fn default_text_fields() -> Vec<String> {
    DEFAULT_TEXT_FIELDS.iter().map(|s| s.to_string()).collect()
}

fn validate_name(name: &str) -> Result<(), ConfigError> {
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(ConfigError::InvalidName);
    }
    Ok(())
}

impl Config {
    fn validate(&mut self) -> Result<(), ConfigError> {
        self.text_fields = self
            .text_fields
            .iter()
            .map(|f| f.trim().to_lowercase())
            .filter(|f| !f.is_empty())
            .collect();

        let mut seen = std::collections::HashSet::new();
        for saved in &mut self.saved_queries {
            validate_name(&saved.name)?;
            if !seen.insert(saved.name.to_ascii_lowercase()) {
                return Err(ConfigError::DuplicateName(saved.name.clone()));
            }
            // hand-edited queries may end in a dangling `not` or open quote
            saved.query = search_query::parse(&saved.query).to_string();
        }

        Ok(())
    }

    /// `$NXFILTER_BASE_PATH`, or `~/.config/nxfilter`.
    pub fn default_base_path() -> Result<String, ConfigError> {
        if let Ok(base_path) = std::env::var(BASE_PATH_ENV) {
            return Ok(base_path);
        }
        let home = homedir::my_home()
            .ok()
            .flatten()
            .ok_or(ConfigError::NoHome)?;
        Ok(format!("{}/.config/nxfilter", home.to_string_lossy()))
    }

    pub fn load_with(base_path: &str) -> Result<Self, ConfigError> {
        let store = storage::BackendLocal::new(base_path)?;

        // create new if does not exist
        if !store.exists(CONFIG_FILE) {
            log::info!("Creating default config at {base_path}/{CONFIG_FILE}");
            store.write(CONFIG_FILE, serde_yml::to_string(&Self::default())?.as_bytes())?;
        }

        let config_str = String::from_utf8(store.read(CONFIG_FILE)?)?;
        let mut config: Self = serde_yml::from_str(&config_str)?;

        config.base_path = base_path.to_string();

        config.validate()?;

        // resave in case the file was missing fields or needs normalizing
        if config_str != serde_yml::to_string(&config)? {
            log::debug!("normalizing {CONFIG_FILE}");
            config.save()?;
        }

        Ok(config)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let store = storage::BackendLocal::new(&self.base_path)?;

        let config_str = serde_yml::to_string(&self)?;
        store.write(CONFIG_FILE, config_str.as_bytes())?;
        Ok(())
    }

    pub fn saved_query(&self, name: &str) -> Option<&SavedQuery> {
        self.saved_queries
            .iter()
            .find(|saved| saved.name.eq_ignore_ascii_case(name))
    }

    /// Adds a saved query. The query text is stored in canonical form.
    pub fn add_saved_query(
        &mut self,
        name: &str,
        query: &str,
        comment: Option<String>,
    ) -> Result<&SavedQuery, ConfigError> {
        validate_name(name)?;
        if self.saved_query(name).is_some() {
            return Err(ConfigError::DuplicateName(name.to_string()));
        }

        self.saved_queries.push(SavedQuery {
            name: name.to_string(),
            query: search_query::parse(query).to_string(),
            comment,
        });
        Ok(&self.saved_queries[self.saved_queries.len() - 1])
    }

    pub fn remove_saved_query(&mut self, name: &str) -> Result<SavedQuery, ConfigError> {
        let idx = self
            .saved_queries
            .iter()
            .position(|saved| saved.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| ConfigError::NotFound(name.to_string()))?;
        Ok(self.saved_queries.remove(idx))
    }
}
