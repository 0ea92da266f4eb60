//! Accumulator for emitted EEG windows.

use std::collections::BTreeMap;

use crate::error::{ModelError, Result};
use crate::ids::CaseId;

/// Four parallel columns of equal length: EEG segment (`x`), age-adjusted
/// MAC (`y`), BIS (`b`) and owning case (`c`).
///
/// Segments are stored flattened in row-major order so the buffer converts
/// directly into an `(N, segment_len)` array.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowDataset {
    segment_len: usize,
    eeg: Vec<f64>,
    mac: Vec<f64>,
    bis: Vec<f64>,
    case_ids: Vec<CaseId>,
}

impl WindowDataset {
    pub fn new(segment_len: usize) -> Self {
        Self {
            segment_len,
            eeg: Vec::new(),
            mac: Vec::new(),
            bis: Vec::new(),
            case_ids: Vec::new(),
        }
    }

    /// Rebuilds a dataset from its columns, checking that they line up.
    pub fn from_parts(
        segment_len: usize,
        eeg: Vec<f64>,
        mac: Vec<f64>,
        bis: Vec<f64>,
        case_ids: Vec<CaseId>,
    ) -> Result<Self> {
        let rows = mac.len();
        if bis.len() != rows || case_ids.len() != rows || eeg.len() != rows * segment_len {
            return Err(ModelError::MisalignedColumns {
                eeg: eeg.len(),
                mac: mac.len(),
                bis: bis.len(),
                cases: case_ids.len(),
            });
        }
        Ok(Self {
            segment_len,
            eeg,
            mac,
            bis,
            case_ids,
        })
    }

    pub fn push(&mut self, segment: &[f64], mac: f64, bis: f64, case_id: CaseId) -> Result<()> {
        if segment.len() != self.segment_len {
            return Err(ModelError::SegmentLength {
                expected: self.segment_len,
                actual: segment.len(),
            });
        }
        self.eeg.extend_from_slice(segment);
        self.mac.push(mac);
        self.bis.push(bis);
        self.case_ids.push(case_id);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.mac.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mac.is_empty()
    }

    pub fn segment_len(&self) -> usize {
        self.segment_len
    }

    pub fn segment(&self, index: usize) -> Option<&[f64]> {
        let start = index.checked_mul(self.segment_len)?;
        self.eeg.get(start..start + self.segment_len)
    }

    pub fn eeg(&self) -> &[f64] {
        &self.eeg
    }

    pub fn mac(&self) -> &[f64] {
        &self.mac
    }

    pub fn bis(&self) -> &[f64] {
        &self.bis
    }

    pub fn case_ids(&self) -> &[CaseId] {
        &self.case_ids
    }

    /// Number of windows contributed by each case.
    pub fn windows_per_case(&self) -> BTreeMap<CaseId, usize> {
        let mut counts = BTreeMap::new();
        for case_id in &self.case_ids {
            *counts.entry(*case_id).or_insert(0) += 1;
        }
        counts
    }

    pub fn case_count(&self) -> usize {
        self.windows_per_case().len()
    }

    /// Consumes the dataset, returning `(eeg, mac, bis, case_ids)`.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>, Vec<f64>, Vec<CaseId>) {
        (self.eeg, self.mac, self.bis, self.case_ids)
    }
}
