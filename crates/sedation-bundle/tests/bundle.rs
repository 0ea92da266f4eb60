//! Round-trip and failure tests for dataset bundles.

use std::fs::File;

use ndarray::{Array1, Array2, Array3};
use ndarray_npy::{NpzReader, NpzWriter};
use tempfile::tempdir;

use sedation_bundle::{BundleError, cache_path, read_bundle, write_bundle};
use sedation_model::{CaseId, DatasetOptions, WindowDataset};

fn sample_dataset() -> WindowDataset {
    let mut dataset = WindowDataset::new(4);
    dataset
        .push(&[0.5, -1.0, 2.25, 3.0], 0.82, 41.0, CaseId::new(17))
        .unwrap();
    dataset
        .push(&[1.0, 1.5, -0.5, 0.0], 0.91, 38.5, CaseId::new(17))
        .unwrap();
    dataset
        .push(&[9.0, 8.0, 7.0, 6.0], 1.12, 29.0, CaseId::new(203))
        .unwrap();
    dataset
}

#[test]
fn bundle_round_trips_through_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("4sec_2cases.npz");
    let dataset = sample_dataset();

    write_bundle(&path, &dataset).unwrap();
    let loaded = read_bundle(&path).unwrap();

    assert_eq!(loaded, dataset);
    assert!(!path.with_extension("npz.tmp").exists());
}

#[test]
fn bundle_arrays_have_numpy_shapes_and_dtypes() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bundle.npz");
    write_bundle(&path, &sample_dataset()).unwrap();

    let mut npz = NpzReader::new(File::open(&path).unwrap()).unwrap();
    let mut names = npz.names().unwrap();
    names.sort();
    assert_eq!(names, vec!["b.npy", "c.npy", "x.npy", "y.npy"]);

    let x: Array2<f64> = npz.by_name("x.npy").unwrap();
    let c: Array1<i64> = npz.by_name("c.npy").unwrap();
    assert_eq!(x.dim(), (3, 4));
    assert_eq!(x[[2, 0]], 9.0);
    assert_eq!(c.to_vec(), vec![17, 17, 203]);
}

#[test]
fn empty_dataset_keeps_its_segment_length() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.npz");

    write_bundle(&path, &WindowDataset::new(512)).unwrap();
    let loaded = read_bundle(&path).unwrap();

    assert!(loaded.is_empty());
    assert_eq!(loaded.segment_len(), 512);
}

#[test]
fn creates_missing_cache_directory() {
    let dir = tempdir().unwrap();
    let options = DatasetOptions::default().with_cache_dir(dir.path().join("nested/cache"));
    let path = cache_path(&options);

    write_bundle(&path, &sample_dataset()).unwrap();

    assert!(path.ends_with("nested/cache/4sec_100cases.npz"));
    assert!(path.exists());
}

#[test]
fn overwrites_an_existing_bundle() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bundle.npz");
    write_bundle(&path, &WindowDataset::new(4)).unwrap();

    write_bundle(&path, &sample_dataset()).unwrap();

    assert_eq!(read_bundle(&path).unwrap().len(), 3);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempdir().unwrap();
    let result = read_bundle(&dir.path().join("absent.npz"));
    assert!(matches!(
        result,
        Err(BundleError::Io {
            operation: "open",
            ..
        })
    ));
}

#[test]
fn archive_without_case_ids_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("partial.npz");
    let mut npz = NpzWriter::new(File::create(&path).unwrap());
    npz.add_array("x", &Array2::<f64>::zeros((1, 4))).unwrap();
    npz.add_array("y", &Array1::<f64>::zeros(1)).unwrap();
    npz.add_array("b", &Array1::<f64>::zeros(1)).unwrap();
    npz.finish().unwrap();

    let result = read_bundle(&path);
    assert!(matches!(
        result,
        Err(BundleError::MissingEntry { entry: "c", .. })
    ));
}

#[test]
fn mismatched_array_lengths_are_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("skewed.npz");
    let mut npz = NpzWriter::new(File::create(&path).unwrap());
    npz.add_array("x", &Array2::<f64>::zeros((2, 4))).unwrap();
    npz.add_array("y", &Array1::<f64>::zeros(2)).unwrap();
    npz.add_array("b", &Array1::<f64>::zeros(1)).unwrap();
    npz.add_array("c", &Array1::<i64>::zeros(2)).unwrap();
    npz.finish().unwrap();

    let result = read_bundle(&path);
    assert!(matches!(result, Err(BundleError::Inconsistent { .. })));
}

#[test]
fn numpy_empty_lists_read_as_an_empty_dataset() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("4sec_100cases.npz");
    let mut npz = NpzWriter::new(File::create(&path).unwrap());
    for entry in ["x", "y", "b", "c"] {
        npz.add_array(entry, &Array1::<f64>::zeros(0)).unwrap();
    }
    npz.finish().unwrap();

    let loaded = read_bundle(&path).unwrap();

    assert!(loaded.is_empty());
    assert_eq!(loaded.case_count(), 0);
}

#[test]
fn whole_float_case_ids_are_accepted() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("float_ids.npz");
    let mut npz = NpzWriter::new(File::create(&path).unwrap());
    npz.add_array("x", &Array2::<f64>::zeros((2, 4))).unwrap();
    npz.add_array("y", &Array1::<f64>::zeros(2)).unwrap();
    npz.add_array("b", &Array1::<f64>::zeros(2)).unwrap();
    npz.add_array("c", &Array1::from(vec![17.0, 203.0])).unwrap();
    npz.finish().unwrap();

    let loaded = read_bundle(&path).unwrap();

    assert_eq!(loaded.segment_len(), 4);
    assert_eq!(loaded.case_ids(), &[CaseId::new(17), CaseId::new(203)]);
}

#[test]
fn fractional_case_ids_are_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fractional_ids.npz");
    let mut npz = NpzWriter::new(File::create(&path).unwrap());
    npz.add_array("x", &Array2::<f64>::zeros((1, 4))).unwrap();
    npz.add_array("y", &Array1::<f64>::zeros(1)).unwrap();
    npz.add_array("b", &Array1::<f64>::zeros(1)).unwrap();
    npz.add_array("c", &Array1::from(vec![17.5])).unwrap();
    npz.finish().unwrap();

    let result = read_bundle(&path);
    assert!(matches!(result, Err(BundleError::InvalidCaseId { value, .. }) if value == 17.5));
}

#[test]
fn segments_with_three_axes_are_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cube.npz");
    let mut npz = NpzWriter::new(File::create(&path).unwrap());
    npz.add_array("x", &Array3::<f64>::zeros((1, 2, 2))).unwrap();
    npz.add_array("y", &Array1::<f64>::zeros(1)).unwrap();
    npz.add_array("b", &Array1::<f64>::zeros(1)).unwrap();
    npz.add_array("c", &Array1::<i64>::zeros(1)).unwrap();
    npz.finish().unwrap();

    let result = read_bundle(&path);
    assert!(matches!(
        result,
        Err(BundleError::UnexpectedShape { entry: "x", .. })
    ));
}
