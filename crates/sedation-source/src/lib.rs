//! Data access for the dataset builder.
//!
//! The pipeline reads everything through the [`CaseSource`] trait so it can
//! run against the VitalDB open API ([`VitalDbClient`]) or against fixtures
//! held in memory ([`MemorySource`]).

mod align;
mod client;
mod error;
mod memory;
mod source;

pub use align::{SignalMatrix, align_tracks};
pub use client::{DEFAULT_API_URL, VitalDbClient};
pub use error::{Result, SourceError};
pub use memory::MemorySource;
pub use source::CaseSource;
