//! Tests for EEG window extraction.

use ndarray::Array2;

use sedation_model::tracks::{BIS_COLUMN, EEG_COLUMN, SEVO_COLUMN};
use sedation_model::{CaseId, WindowDataset};
use sedation_transform::extract_windows;

fn build(rows: usize, bis: impl Fn(usize) -> f64, mac: impl Fn(usize) -> f64) -> Array2<f64> {
    Array2::from_shape_fn((rows, 3), |(row, col)| match col {
        EEG_COLUMN => row as f64,
        SEVO_COLUMN => mac(row),
        BIS_COLUMN => bis(row),
        _ => unreachable!(),
    })
}

#[test]
fn windows_start_at_segment_length_and_step_by_rate() {
    let matrix = build(40, |_| 50.0, |_| 1.0);
    let mut dataset = WindowDataset::new(16);

    let emitted = extract_windows(&matrix, 16, 4, CaseId::new(9), &mut dataset).unwrap();

    // Anchors 16, 20, 24, 28, 32, 36.
    assert_eq!(emitted, 6);
    assert_eq!(dataset.len(), 6);
    let first: Vec<f64> = (0..16u32).map(f64::from).collect();
    assert_eq!(dataset.segment(0), Some(first.as_slice()));
    assert_eq!(dataset.segment(5).unwrap()[0], 20.0);
    assert_eq!(dataset.segment(5).unwrap()[15], 35.0);
    assert!(dataset.case_ids().iter().all(|id| *id == CaseId::new(9)));
}

#[test]
fn anchors_with_invalid_targets_are_skipped() {
    let bis = |row: usize| match row {
        8 => 0.0,
        12 => f64::NAN,
        _ => 50.0,
    };
    let mac = |row: usize| if row == 16 { f64::INFINITY } else { 1.2 };
    let matrix = build(24, bis, mac);
    let mut dataset = WindowDataset::new(8);

    let emitted = extract_windows(&matrix, 8, 4, CaseId::new(1), &mut dataset).unwrap();

    // Anchors 8, 12, 16 are invalid; only 20 is emitted.
    assert_eq!(emitted, 1);
    assert_eq!(dataset.bis(), &[50.0]);
    assert_eq!(dataset.mac(), &[1.2]);
    assert!(dataset.mac().iter().all(|v| v.is_finite()));
    assert_eq!(dataset.segment(0).unwrap()[0], 12.0);
}

#[test]
fn matrix_no_longer_than_a_segment_emits_nothing() {
    let matrix = build(16, |_| 50.0, |_| 1.0);
    let mut dataset = WindowDataset::new(16);
    let emitted = extract_windows(&matrix, 16, 4, CaseId::new(1), &mut dataset).unwrap();
    assert_eq!(emitted, 0);
    assert!(dataset.is_empty());
}
