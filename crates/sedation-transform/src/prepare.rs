//! Per-case preparation of the extraction matrix.

use ndarray::Array2;
use tracing::debug;

use sedation_model::tracks::{BIS_COLUMN, EXTRACTION_TRACKS, SEVO_COLUMN};
use sedation_model::{DatasetOptions, SkipReason};

use crate::error::{Result, TransformError};
use crate::exposure::peak;
use crate::fill::forward_fill;
use crate::mac::mac_divisor;
use crate::trim::{trim_rows, valid_span};

/// Result of preparing one case.
#[derive(Debug, Clone, PartialEq)]
pub enum Prepared {
    /// Trimmed, MAC-normalized and gap-filled matrix, ready for windowing.
    Ready(Array2<f64>),
    Skipped(SkipReason),
}

/// Runs the checks and conversions between loading and windowing.
///
/// In order: reject a case whose sevoflurane never reaches
/// `options.min_agent`; convert sevoflurane to age-adjusted MAC; reject a
/// case without any positive BIS; trim to the span of positive BIS; reject a
/// span shorter than `options.min_rows()`; forward fill MAC and BIS up to
/// `options.fill_limit()` samples per gap.
pub fn prepare_signals(
    mut matrix: Array2<f64>,
    age: f64,
    options: &DatasetOptions,
) -> Result<Prepared> {
    if matrix.ncols() != EXTRACTION_TRACKS.len() {
        return Err(TransformError::ColumnCount {
            expected: EXTRACTION_TRACKS.len(),
            actual: matrix.ncols(),
        });
    }

    let agent_peak = peak(matrix.column(SEVO_COLUMN));
    if agent_peak.is_none_or(|peak| peak < options.min_agent) {
        return Ok(Prepared::Skipped(SkipReason::InsufficientAgent));
    }

    let divisor = mac_divisor(age);
    matrix
        .column_mut(SEVO_COLUMN)
        .mapv_inplace(|raw| raw / divisor);

    let Some((first, last)) = valid_span(matrix.column(BIS_COLUMN)) else {
        return Ok(Prepared::Skipped(SkipReason::NoValidDepth));
    };
    let mut trimmed = trim_rows(&matrix, first, last);
    debug!(
        first,
        last,
        rows = trimmed.nrows(),
        "trimmed to valid bis span"
    );
    if trimmed.nrows() < options.min_rows() {
        return Ok(Prepared::Skipped(SkipReason::TooShort));
    }

    let limit = options.fill_limit();
    forward_fill(trimmed.column_mut(SEVO_COLUMN), limit);
    forward_fill(trimmed.column_mut(BIS_COLUMN), limit);
    Ok(Prepared::Ready(trimmed))
}
