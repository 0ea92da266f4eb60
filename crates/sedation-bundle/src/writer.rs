//! Bundle writing.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use ndarray::{Array1, Array2};
use ndarray_npy::NpzWriter;

use sedation_model::{CaseId, ModelError, WindowDataset};

use crate::entries;
use crate::error::{BundleError, Result};

/// Writes `dataset` to `path` as an `.npz` archive.
///
/// The archive is built in a `.npz.tmp` sibling and renamed over `path`
/// once complete, so `path` either holds a whole bundle or nothing new.
pub fn write_bundle(path: &Path, dataset: &WindowDataset) -> Result<()> {
    let temp_path = path.with_extension("npz.tmp");

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| BundleError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let file = File::create(&temp_path).map_err(|source| BundleError::Io {
        operation: "create",
        path: temp_path.clone(),
        source,
    })?;

    if let Err(error) = write_arrays(file, dataset, &temp_path) {
        let _ = fs::remove_file(&temp_path);
        return Err(error);
    }

    fs::rename(&temp_path, path).map_err(|source| BundleError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(
        path = %path.display(),
        windows = dataset.len(),
        cases = dataset.case_count(),
        "wrote dataset bundle"
    );
    Ok(())
}

fn write_arrays(file: File, dataset: &WindowDataset, temp_path: &Path) -> Result<()> {
    let npz_error = |source| BundleError::WriteNpz {
        path: temp_path.to_path_buf(),
        source,
    };

    let segments = Array2::from_shape_vec(
        (dataset.len(), dataset.segment_len()),
        dataset.eeg().to_vec(),
    )
    .map_err(|_| BundleError::Inconsistent {
        path: temp_path.to_path_buf(),
        source: ModelError::MisalignedColumns {
            eeg: dataset.eeg().len(),
            mac: dataset.mac().len(),
            bis: dataset.bis().len(),
            cases: dataset.case_ids().len(),
        },
    })?;
    let mac = Array1::from(dataset.mac().to_vec());
    let bis = Array1::from(dataset.bis().to_vec());
    let cases: Array1<i64> = dataset.case_ids().iter().copied().map(CaseId::get).collect();

    let mut npz = NpzWriter::new(BufWriter::new(file));
    npz.add_array(entries::SEGMENTS, &segments)
        .map_err(npz_error)?;
    npz.add_array(entries::MAC, &mac).map_err(npz_error)?;
    npz.add_array(entries::BIS, &bis).map_err(npz_error)?;
    npz.add_array(entries::CASES, &cases).map_err(npz_error)?;

    let writer = npz.finish().map_err(npz_error)?;
    let file = writer.into_inner().map_err(|error| BundleError::Io {
        operation: "flush",
        path: temp_path.to_path_buf(),
        source: error.into_error(),
    })?;
    file.sync_all().map_err(|source| BundleError::Io {
        operation: "sync",
        path: temp_path.to_path_buf(),
        source,
    })
}
