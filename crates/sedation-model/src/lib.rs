//! Shared types for the sevoflurane EEG dataset builder.
//!
//! Everything the pipeline stages pass between each other lives here: case
//! and track records from the metadata tables, the track names the pipeline
//! reads, the tunable [`DatasetOptions`], the skip/accept outcome of a case,
//! and the [`WindowDataset`] accumulator that becomes the cached bundle.

pub mod dataset;
pub mod error;
pub mod ids;
pub mod options;
pub mod outcome;
pub mod record;
pub mod tracks;

pub use dataset::WindowDataset;
pub use error::{ModelError, Result};
pub use ids::CaseId;
pub use options::DatasetOptions;
pub use outcome::{CaseOutcome, RunSummary, SkipReason};
pub use record::{CaseRecord, TrackRecord};
pub use tracks::ExclusionRule;
