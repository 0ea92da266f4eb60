//! Error types for data access.

use thiserror::Error;

use sedation_ingest::IngestError;

/// Errors raised while fetching metadata or case signals.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    /// Network request failed.
    #[error("network error: {0}")]
    Network(String),

    /// The API answered with a non-success status.
    #[error("request to {url} failed with HTTP {status}")]
    Http { url: String, status: u16 },

    /// Failed to decompress a response body.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A downloaded table or track could not be parsed.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// Internal lock poisoned by a panicking thread.
    #[error("track index cache is unavailable")]
    CachePoisoned,
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// Result type alias for data access operations.
pub type Result<T> = std::result::Result<T, SourceError>;
