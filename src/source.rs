use crate::core::error::PoolLoadError;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Where a candidate pool comes from. Loading may fail; callers hand the
/// result to [`AutocompleteController::pool_loaded`], which recovers.
///
/// [`AutocompleteController::pool_loaded`]: crate::core::controller::AutocompleteController::pool_loaded
pub trait CandidateSource<C> {
    fn load(&self) -> Result<Vec<C>, PoolLoadError>;
}

/// Decodes a JSON array payload, the shape every server endpoint returns.
/// A payload that is not an array fails as a whole; array entries that do not
/// decode are skipped with a warning and the rest are kept.
pub fn from_json_str<C: DeserializeOwned>(payload: &str) -> Result<Vec<C>, PoolLoadError> {
    let records: Vec<serde_json::Value> = serde_json::from_str(payload)?;
    let total = records.len();

    let items: Vec<C> = records
        .into_iter()
        .enumerate()
        .filter_map(|(position, record)| match serde_json::from_value(record) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!(position, "skipping undecodable candidate record: {e}");
                None
            }
        })
        .collect();

    if items.len() < total {
        tracing::debug!(kept = items.len(), total, "candidate payload decoded partially");
    }
    Ok(items)
}

/// A JSON array stored on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<C: DeserializeOwned> CandidateSource<C> for JsonFileSource {
    fn load(&self) -> Result<Vec<C>, PoolLoadError> {
        let span = tracing::debug_span!("source::json_file", path = ?self.path);
        let _enter = span.enter();

        let payload = std::fs::read_to_string(&self.path).map_err(|source| PoolLoadError::Io {
            path: self.path.clone(),
            source,
        })?;
        from_json_str(&payload)
    }
}

/// A JSON array served over HTTP, e.g. `/my_library_books`.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    timeout: Duration,
}

impl HttpSource {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }
}

impl<C: DeserializeOwned> CandidateSource<C> for HttpSource {
    fn load(&self) -> Result<Vec<C>, PoolLoadError> {
        let span = tracing::debug_span!("source::http", url = %self.url);
        let _enter = span.enter();

        let agent = ureq::AgentBuilder::new().timeout(self.timeout).build();
        let response = agent
            .get(&self.url)
            .set("Accept", "application/json")
            .call()
            .map_err(|source| PoolLoadError::Http {
                url: self.url.clone(),
                source: Box::new(source),
            })?;
        let payload = response.into_string().map_err(|source| PoolLoadError::Body {
            url: self.url.clone(),
            source,
        })?;
        from_json_str(&payload)
    }
}

/// A configured source location: an `http(s)://` URL or a file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    File(PathBuf),
    Http(String),
}

impl Location {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::Http(trimmed.to_string())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }

    pub fn into_source<C: DeserializeOwned + 'static>(self) -> Box<dyn CandidateSource<C>> {
        match self {
            Self::File(path) => Box::new(JsonFileSource::new(path)),
            Self::Http(url) => Box::new(HttpSource::new(url)),
        }
    }
}
