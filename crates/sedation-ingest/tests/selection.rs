//! Tests for candidate selection.

use sedation_ingest::{TrackIndex, case_ages, select_candidates};
use sedation_model::tracks::{BIS_INDEX, EEG_WAVE, REQUIRED_TRACKS, SEVO_EXPIRED};
use sedation_model::{CaseId, CaseRecord, TrackRecord};

fn full_tracks(case: i64) -> Vec<TrackRecord> {
    REQUIRED_TRACKS
        .iter()
        .map(|name| TrackRecord::new(CaseId::new(case), *name, format!("{case}-{name}")))
        .collect()
}

#[test]
fn selects_adults_with_every_required_track() {
    let cases = vec![
        CaseRecord::new(CaseId::new(30), Some(45.0)),
        CaseRecord::new(CaseId::new(4), Some(62.0)),
        CaseRecord::new(CaseId::new(9), Some(18.0)),
        CaseRecord::new(CaseId::new(12), None),
        CaseRecord::new(CaseId::new(15), Some(71.0)),
    ];
    let mut tracks = Vec::new();
    for case in [30, 4, 9, 12] {
        tracks.extend(full_tracks(case));
    }
    // Case 15 lacks the sevoflurane track.
    tracks.push(TrackRecord::new(CaseId::new(15), EEG_WAVE, "a"));
    tracks.push(TrackRecord::new(CaseId::new(15), BIS_INDEX, "b"));

    let selected = select_candidates(&cases, &tracks, &REQUIRED_TRACKS, 18.0);

    assert_eq!(selected, vec![CaseId::new(4), CaseId::new(30)]);
}

#[test]
fn track_names_must_match_exactly() {
    let cases = vec![CaseRecord::new(CaseId::new(1), Some(50.0))];
    let tracks = vec![
        TrackRecord::new(CaseId::new(1), EEG_WAVE, "a"),
        TrackRecord::new(CaseId::new(1), BIS_INDEX, "b"),
        TrackRecord::new(CaseId::new(1), "Primus/EXP_SEVO2", "c"),
    ];
    assert!(select_candidates(&cases, &tracks, &REQUIRED_TRACKS, 18.0).is_empty());
}

#[test]
fn first_age_and_first_track_id_win() {
    let cases = vec![
        CaseRecord::new(CaseId::new(1), Some(50.0)),
        CaseRecord::new(CaseId::new(1), Some(10.0)),
    ];
    assert_eq!(case_ages(&cases).get(&CaseId::new(1)), Some(&50.0));

    let index = TrackIndex::from_records(&[
        TrackRecord::new(CaseId::new(1), SEVO_EXPIRED, "first"),
        TrackRecord::new(CaseId::new(1), SEVO_EXPIRED, "second"),
    ]);
    assert_eq!(index.len(), 1);
    assert_eq!(index.tid(CaseId::new(1), SEVO_EXPIRED), Some("first"));
    assert_eq!(index.tid(CaseId::new(2), SEVO_EXPIRED), None);
}
