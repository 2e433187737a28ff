//! Error types for okapi-retrieve.

use thiserror::Error;

/// Errors raised while building, scoring, or (de)serializing an index.
#[derive(Debug, Error)]
pub enum RetrieveError {
    /// A BM25 parameter was out of its valid range (e.g. `b` outside `[0, 1]`).
    #[error("invalid BM25 parameter: {0}")]
    InvalidParameter(String),

    /// Index (de)serialization failed.
    #[error("index serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
