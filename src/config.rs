use crate::core::candidate::Candidate;
use crate::core::controller::AutocompleteOptions;
use crate::core::search::ranker::DEFAULT_LIMIT;
use crate::source::Location;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("{kind} candidates have no searchable field named `{name}`")]
    UnknownField { kind: &'static str, name: String },
}

/// Settings for both autocomplete inputs of the share form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub books: InputConfig,
    pub users: InputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            books: InputConfig {
                fields: vec!["title".to_string(), "author".to_string()],
                ..InputConfig::default()
            },
            users: InputConfig {
                fields: vec!["username".to_string()],
                ..InputConfig::default()
            },
        }
    }
}

/// Settings for one autocomplete input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub limit: usize,
    /// Field names to search; empty means the candidate type's defaults.
    pub fields: Vec<String>,
    /// File path or `http(s)://` URL of a JSON array of candidates.
    pub source: Option<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            fields: Vec::new(),
            source: None,
        }
    }
}

impl InputConfig {
    pub fn options<C: Candidate>(&self) -> Result<AutocompleteOptions<C>, ConfigError> {
        let fields = if self.fields.is_empty() {
            C::default_fields()
        } else {
            self.fields
                .iter()
                .map(|name| {
                    C::field(name).ok_or_else(|| ConfigError::UnknownField {
                        kind: C::KIND,
                        name: name.clone(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?
        };
        Ok(AutocompleteOptions {
            limit: self.limit,
            fields,
        })
    }

    pub fn location(&self) -> Option<Location> {
        self.source
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .map(Location::parse)
    }
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let span = tracing::debug_span!("config::from_yaml");
        let _enter = span.enter();

        serde_yaml::from_str(yaml).map_err(Into::into)
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let span = tracing::debug_span!("config::load_from_path", ?path);
        let _enter = span.enter();

        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }

    pub fn load_with_fallback<P: AsRef<Path>>(path: P) -> Self {
        Self::load_from_path(path)
            .inspect_err(|e| tracing::error!("failed to load config, falling back to default: {e}"))
            .unwrap_or_default()
    }
}
