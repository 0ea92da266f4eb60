//! Tests for track payload parsing and resampling.

use proptest::prelude::*;

use sedation_ingest::{TrackSamples, parse_track_payload};

#[test]
fn numeric_track_lands_on_its_grid_cells() {
    let payload = "Time,BIS/BIS\n0.4,45\n2.1,43\n5.9,-nan(ind)\n";
    let samples = parse_track_payload(payload.as_bytes()).expect("parse payload");
    assert!(!samples.is_wave());

    let grid = samples.resample(1.0);

    assert_eq!(grid.len(), 6);
    assert_eq!(grid[0], 45.0);
    assert!(grid[1].is_nan());
    assert_eq!(grid[2], 43.0);
    assert!(grid[3].is_nan());
    assert!(grid[5].is_nan());
}

#[test]
fn numeric_track_scales_by_interval() {
    let payload = "Time,Primus/EXP_SEVO\n0,1.5\n1,2.0\n";
    let samples = parse_track_payload(payload.as_bytes()).expect("parse payload");

    let grid = samples.resample(0.5);

    assert_eq!(grid.len(), 3);
    assert_eq!(grid[0], 1.5);
    assert!(grid[1].is_nan());
    assert_eq!(grid[2], 2.0);
}

#[test]
fn wave_track_with_matching_length_is_kept() {
    let payload = "Time,BIS/EEG1_WAV\n0,1\n,2\n,3\n3,4\n";
    let samples = parse_track_payload(payload.as_bytes()).expect("parse payload");
    assert!(samples.is_wave());

    assert_eq!(samples.resample(1.0), vec![1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn wave_track_is_picked_at_even_positions() {
    let payload = "Time,BIS/EEG1_WAV\n0,10\n,11\n,12\n,13\n,14\n,15\n,16\n1.5,17\n";
    let samples = parse_track_payload(payload.as_bytes()).expect("parse payload");

    // 1.5 s at 0.5 s per cell gives 4 cells over 8 rows.
    let grid = samples.resample(0.5);

    assert_eq!(grid, vec![10.0, 12.0, 14.0, 17.0]);
}

#[test]
fn track_without_timestamps_resamples_to_nothing() {
    let samples = TrackSamples {
        times: vec![None, None],
        values: vec![1.0, 2.0],
    };
    assert!(samples.resample(1.0).is_empty());
    assert!(TrackSamples::default().resample(1.0).is_empty());
}

proptest! {
    #[test]
    fn numeric_grid_covers_the_last_timestamp(times in prop::collection::vec(0u32..5_000, 1..50)) {
        let samples = TrackSamples {
            times: times.iter().map(|t| Some(f64::from(*t))).collect(),
            values: times.iter().map(|t| f64::from(*t) * 2.0).collect(),
        };
        let grid = samples.resample(1.0);
        let last = *times.iter().max().unwrap_or(&0) as usize;
        prop_assert_eq!(grid.len(), last + 1);
        for t in &times {
            prop_assert_eq!(grid[*t as usize], f64::from(*t) * 2.0);
        }
    }
}
