//! Cache naming.

use std::path::PathBuf;

use sedation_model::DatasetOptions;

/// `{window_secs}sec_{max_cases}cases.npz`
pub fn bundle_file_name(window_secs: usize, max_cases: usize) -> String {
    format!("{window_secs}sec_{max_cases}cases.npz")
}

/// Location of the bundle for `options` inside its cache directory.
pub fn cache_path(options: &DatasetOptions) -> PathBuf {
    options
        .cache_dir
        .join(bundle_file_name(options.window_secs, options.max_cases))
}
