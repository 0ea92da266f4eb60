//! Error types for bundle I/O.

use std::path::PathBuf;

use thiserror::Error;

use sedation_model::ModelError;

/// Failure to read or write a dataset bundle.
#[derive(Debug, Error)]
pub enum BundleError {
    #[error("failed to {operation} {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Temp file was written but could not be moved into place.
    #[error("failed to move {temp_path} to {target_path}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write npz archive {path}")]
    WriteNpz {
        path: PathBuf,
        #[source]
        source: ndarray_npy::WriteNpzError,
    },

    #[error("failed to read npz archive {path}")]
    ReadNpz {
        path: PathBuf,
        #[source]
        source: ndarray_npy::ReadNpzError,
    },

    #[error("bundle {path} has no `{entry}` array")]
    MissingEntry { path: PathBuf, entry: &'static str },

    #[error("bundle {path} stores `{entry}` with shape {shape:?}")]
    UnexpectedShape {
        path: PathBuf,
        entry: &'static str,
        shape: Vec<usize>,
    },

    /// Float case id that is not a whole number.
    #[error("bundle {path} holds case id {value}, which is not a whole number")]
    InvalidCaseId { path: PathBuf, value: f64 },

    #[error("bundle {path} is inconsistent")]
    Inconsistent {
        path: PathBuf,
        #[source]
        source: ModelError,
    },
}

/// Result type for bundle operations.
pub type Result<T> = std::result::Result<T, BundleError>;
