use std::io;
use std::path::PathBuf;

/// Failure to fetch or decode a candidate pool. Controllers recover from it
/// by working on an empty pool.
#[derive(Debug, thiserror::Error)]
pub enum PoolLoadError {
    #[error("failed to read candidate source {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed candidate payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },
    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: io::Error,
    },
}

/// A pick that cannot be honoured. Callers are free to ignore it; the
/// controller leaves its selection untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("candidate is not part of the current suggestion list")]
    NotSuggested,
    #[error("candidate is no longer in the candidate pool")]
    NoLongerInPool,
}
