//! Domain Errors

use thiserror::Error;

/// Common result type for collaborator calls
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures reported by object storage or the document store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("upload of '{key}' failed: {message}")]
    Upload { key: String, message: String },
    #[error("could not resolve a durable url for '{key}': {message}")]
    DurableUrl { key: String, message: String },
    #[error("write to '{collection}' failed: {message}")]
    Write { collection: String, message: String },
    #[error("query of '{collection}' failed: {message}")]
    Query { collection: String, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("backend not configured: {0}")]
    NotConfigured(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Decode(err.to_string())
    }
}

/// A save batch stopped at `index`; the first `saved` items stay persisted.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("saving '{file_name}' (item {index}) failed after {saved} saved")]
pub struct SaveError {
    pub index: usize,
    pub file_name: String,
    pub saved: usize,
    #[source]
    pub source: StoreError,
}
