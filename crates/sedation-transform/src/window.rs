//! Fixed-length EEG window extraction.

use ndarray::Array2;
use tracing::trace;

use sedation_model::tracks::{BIS_COLUMN, EEG_COLUMN, SEVO_COLUMN};
use sedation_model::{CaseId, WindowDataset};

use crate::error::Result;

/// Emits one window per `step` rows into `dataset`, returning how many were added.
///
/// Anchor rows run from `segment_len` (inclusive) to the end of the matrix.
/// An anchor with a non-finite MAC or BIS, or a BIS of zero, is skipped;
/// otherwise the `segment_len` EEG samples before it are paired with the MAC
/// and BIS at the anchor.
pub fn extract_windows(
    matrix: &Array2<f64>,
    segment_len: usize,
    step: usize,
    case_id: CaseId,
    dataset: &mut WindowDataset,
) -> Result<usize> {
    let eeg = matrix.column(EEG_COLUMN).to_vec();
    let mut emitted = 0usize;
    for anchor in (segment_len..matrix.nrows()).step_by(step.max(1)) {
        let bis = matrix[[anchor, BIS_COLUMN]];
        let mac = matrix[[anchor, SEVO_COLUMN]];
        if !bis.is_finite() || !mac.is_finite() || bis == 0.0 {
            trace!(case_id = %case_id, anchor, "skipped window");
            continue;
        }
        dataset.push(&eeg[anchor - segment_len..anchor], mac, bis, case_id)?;
        emitted += 1;
    }
    Ok(emitted)
}
