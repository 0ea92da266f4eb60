use sedation_model::{CaseId, CaseRecord, TrackRecord};

use crate::align::SignalMatrix;
use crate::error::Result;

/// Read-only access to case metadata and case signals.
pub trait CaseSource {
    /// Rows of the case table.
    fn case_table(&self) -> Result<Vec<CaseRecord>>;

    /// Rows of the track table.
    fn track_table(&self) -> Result<Vec<TrackRecord>>;

    /// Loads `tracks` of one case on a grid of `interval` seconds.
    ///
    /// Column `j` holds `tracks[j]`; cells without data are NaN. Tracks the
    /// case does not have stay all-NaN. When none of the tracks exist the
    /// matrix has no rows.
    fn load_signals(&self, case_id: CaseId, tracks: &[&str], interval: f64)
    -> Result<SignalMatrix>;
}
