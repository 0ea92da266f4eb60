//! Bundle reading.

use std::fs::File;
use std::path::Path;

use ndarray::{Array1, ArrayD, Ix1, OwnedRepr};
use ndarray_npy::{NpzReader, ReadNpyError, ReadNpzError};

use sedation_model::{CaseId, WindowDataset};

use crate::entries;
use crate::error::{BundleError, Result};

/// Loads a bundle written by [`write_bundle`](crate::write_bundle) or by
/// `numpy.savez` with the same entry names.
///
/// `numpy.savez` turns empty lists into a `(0,)` float array, so an empty
/// one-dimensional `x` reads as a dataset with no rows and segment length
/// zero, and `c` may hold whole-numbered floats instead of integers.
pub fn read_bundle(path: &Path) -> Result<WindowDataset> {
    let file = File::open(path).map_err(|source| BundleError::Io {
        operation: "open",
        path: path.to_path_buf(),
        source,
    })?;
    let npz_error = |source| BundleError::ReadNpz {
        path: path.to_path_buf(),
        source,
    };

    let mut npz = NpzReader::new(file).map_err(npz_error)?;
    let names = npz.names().map_err(npz_error)?;
    let entry_name = |entry: &'static str| {
        names
            .iter()
            .find(|name| name.as_str() == entry || name.strip_suffix(".npy") == Some(entry))
            .cloned()
            .ok_or_else(|| BundleError::MissingEntry {
                path: path.to_path_buf(),
                entry,
            })
    };

    let segments: ArrayD<f64> = npz
        .by_name(&entry_name(entries::SEGMENTS)?)
        .map_err(npz_error)?;
    let segment_len = match segments.shape() {
        [_, columns] => *columns,
        [0] => 0,
        shape => {
            return Err(BundleError::UnexpectedShape {
                path: path.to_path_buf(),
                entry: entries::SEGMENTS,
                shape: shape.to_vec(),
            });
        }
    };
    let mac: Array1<f64> = npz.by_name(&entry_name(entries::MAC)?).map_err(npz_error)?;
    let bis: Array1<f64> = npz.by_name(&entry_name(entries::BIS)?).map_err(npz_error)?;
    let case_ids = read_case_ids(&mut npz, &entry_name(entries::CASES)?, path)?;

    let dataset = WindowDataset::from_parts(
        segment_len,
        segments.iter().copied().collect(),
        mac.to_vec(),
        bis.to_vec(),
        case_ids,
    )
    .map_err(|source| BundleError::Inconsistent {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(
        path = %path.display(),
        windows = dataset.len(),
        cases = dataset.case_count(),
        "loaded dataset bundle"
    );
    Ok(dataset)
}

/// Reads `c` as `int64`, falling back to whole-numbered `float64`.
fn read_case_ids(npz: &mut NpzReader<File>, name: &str, path: &Path) -> Result<Vec<CaseId>> {
    let npz_error = |source| BundleError::ReadNpz {
        path: path.to_path_buf(),
        source,
    };
    match npz.by_name::<OwnedRepr<i64>, Ix1>(name) {
        Ok(ids) => return Ok(ids.iter().copied().map(CaseId::new).collect()),
        Err(ReadNpzError::Npy(ReadNpyError::WrongDescriptor(_))) => {}
        Err(source) => return Err(npz_error(source)),
    }

    let ids = npz
        .by_name::<OwnedRepr<f64>, Ix1>(name)
        .map_err(npz_error)?;
    ids.iter()
        .map(|&value| {
            if value.is_finite() && value.fract() == 0.0 {
                Ok(CaseId::new(value as i64))
            } else {
                Err(BundleError::InvalidCaseId {
                    path: path.to_path_buf(),
                    value,
                })
            }
        })
        .collect()
}
