//! VitalDB data ingestion.
//!
//! This crate turns the raw bytes served by the VitalDB open API into typed
//! records and sample vectors, and selects the candidate cases.
//!
//! # Features
//!
//! - **Metadata tables**: Parse `/cases` and `/trks` CSV downloads with Polars
//! - **Track payloads**: Parse `Time,value` track downloads and resample them
//!   onto a fixed interval grid
//! - **Case selection**: Intersect adult cases with cases carrying every
//!   required track
//!
//! # Example
//!
//! ```ignore
//! use sedation_ingest::{parse_case_table, parse_track_table, select_candidates};
//! use sedation_model::tracks::REQUIRED_TRACKS;
//!
//! let cases = parse_case_table(&case_bytes)?;
//! let tracks = parse_track_table(&track_bytes)?;
//! let candidates = select_candidates(&cases, &tracks, &REQUIRED_TRACKS, 18.0);
//! ```

mod error;
mod selection;
mod tables;
mod track;

// === Error Types ===
pub use error::{IngestError, Result};

// === Metadata Tables ===
pub use tables::{
    AGE_COLUMN, CASE_ID_COLUMN, TRACK_ID_COLUMN, TRACK_NAME_COLUMN, parse_case_table,
    parse_track_table,
};

// === Track Payloads ===
pub use track::{TrackSamples, parse_sample_value, parse_track_payload};

// === Case Selection ===
pub use selection::{TrackIndex, case_ages, select_candidates};
