//! Rows of the VitalDB metadata tables.

use crate::ids::CaseId;

/// One row of the case table (`/cases`).
///
/// Only `age` takes part in case selection; the remaining demographics are
/// carried for logging and inspection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CaseRecord {
    pub case_id: CaseId,
    pub subject_id: Option<i64>,
    /// Age in years. `None` when the cell is empty or not numeric.
    pub age: Option<f64>,
    pub sex: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
}

impl CaseRecord {
    pub fn new(case_id: CaseId, age: Option<f64>) -> Self {
        Self {
            case_id,
            age,
            ..Self::default()
        }
    }
}

/// One row of the track table (`/trks`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRecord {
    pub case_id: CaseId,
    /// Device-qualified track name, e.g. `BIS/BIS`.
    pub name: String,
    /// Track identifier used to download the samples.
    pub tid: String,
}

impl TrackRecord {
    pub fn new(case_id: CaseId, name: impl Into<String>, tid: impl Into<String>) -> Self {
        Self {
            case_id,
            name: name.into(),
            tid: tid.into(),
        }
    }
}
