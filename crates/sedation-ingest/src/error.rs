//! Error types for VitalDB data ingestion.

use thiserror::Error;

/// Errors that can occur while parsing downloaded tables and tracks.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Failed to parse a metadata table with Polars.
    #[error("failed to parse {table} table: {message}")]
    CsvParse { table: &'static str, message: String },

    /// Required column not found in a metadata table.
    #[error("required column '{column}' not found in {table} table")]
    MissingColumn {
        column: &'static str,
        table: &'static str,
    },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },

    /// Malformed track payload.
    #[error("failed to read track payload: {0}")]
    TrackPayload(#[from] csv::Error),
}

/// Result type alias for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
