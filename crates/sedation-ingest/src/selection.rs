//! Candidate case selection and track lookups.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use sedation_model::{CaseId, CaseRecord, TrackRecord};

/// Returns the cases older than `min_age` that carry every track in
/// `required`, in ascending case id order.
pub fn select_candidates(
    cases: &[CaseRecord],
    tracks: &[TrackRecord],
    required: &[&str],
    min_age: f64,
) -> Vec<CaseId> {
    let mut selected: BTreeSet<CaseId> = cases
        .iter()
        .filter(|case| case.age.is_some_and(|age| age > min_age))
        .map(|case| case.case_id)
        .collect();
    debug!(adults = selected.len(), "cases passing the age criterion");

    for name in required {
        let with_track: BTreeSet<CaseId> = tracks
            .iter()
            .filter(|track| track.name == *name)
            .map(|track| track.case_id)
            .collect();
        selected = selected.intersection(&with_track).copied().collect();
        debug!(track = %name, remaining = selected.len(), "intersected with track");
    }
    selected.into_iter().collect()
}

/// Age of each case, taken from its first row in the case table.
pub fn case_ages(cases: &[CaseRecord]) -> HashMap<CaseId, f64> {
    let mut ages = HashMap::with_capacity(cases.len());
    for case in cases {
        if let Some(age) = case.age {
            ages.entry(case.case_id).or_insert(age);
        }
    }
    ages
}

/// Maps `(case, track name)` to the track id of the first matching row.
#[derive(Debug, Clone, Default)]
pub struct TrackIndex {
    ids: HashMap<(CaseId, String), String>,
}

impl TrackIndex {
    pub fn from_records(records: &[TrackRecord]) -> Self {
        let mut ids = HashMap::with_capacity(records.len());
        for record in records {
            ids.entry((record.case_id, record.name.clone()))
                .or_insert_with(|| record.tid.clone());
        }
        Self { ids }
    }

    pub fn tid(&self, case_id: CaseId, name: &str) -> Option<&str> {
        self.ids
            .get(&(case_id, name.to_string()))
            .map(String::as_str)
    }
}
