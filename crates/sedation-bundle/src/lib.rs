//! On-disk cache for a built [`WindowDataset`](sedation_model::WindowDataset).
//!
//! A bundle is a NumPy `.npz` archive with four arrays, loadable with
//! `numpy.load`:
//!
//! | entry | shape | dtype | content |
//! |---|---|---|---|
//! | `x` | `(N, SEGLEN)` | `f64` | EEG segments |
//! | `y` | `(N,)` | `f64` | age-adjusted MAC |
//! | `b` | `(N,)` | `f64` | BIS |
//! | `c` | `(N,)` | `i64` | case id |
//!
//! The file name encodes the window length and case budget, so a bundle is
//! only reused for the exact configuration that produced it.

pub mod error;
pub mod key;
pub mod reader;
pub mod writer;

pub use error::{BundleError, Result};
pub use key::{bundle_file_name, cache_path};
pub use reader::read_bundle;
pub use writer::write_bundle;

/// Entry names inside the archive, without the `.npy` suffix.
pub mod entries {
    pub const SEGMENTS: &str = "x";
    pub const MAC: &str = "y";
    pub const BIS: &str = "b";
    pub const CASES: &str = "c";
}
