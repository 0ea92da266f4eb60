//! Tunable constants of the dataset build.

use std::path::PathBuf;

use crate::error::{ModelError, Result};
use crate::tracks::ExclusionRule;

/// Options controlling case selection, signal preparation and windowing.
///
/// The defaults reproduce the published dataset: 128 Hz, 4 second windows,
/// the first 100 adult cases that pass every check.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetOptions {
    /// Sampling rate of the extraction matrix in Hz.
    pub sample_rate: usize,
    /// EEG window length in seconds.
    pub window_secs: usize,
    /// Number of accepted cases after which the build stops.
    pub max_cases: usize,
    /// Cases must be strictly older than this (years).
    pub min_age: f64,
    /// Peak sevoflurane concentration a case must reach.
    pub min_agent: f64,
    /// Longest gap (seconds) bridged by forward filling.
    pub fill_limit_secs: usize,
    /// Minimum span of valid BIS readings in seconds.
    pub min_duration_secs: usize,
    /// Sample interval (seconds) for loading exclusion tracks.
    pub exclusion_interval_secs: f64,
    pub exclusions: Vec<ExclusionRule>,
    /// Directory holding the cached bundle.
    pub cache_dir: PathBuf,
}

impl Default for DatasetOptions {
    fn default() -> Self {
        Self {
            sample_rate: 128,
            window_secs: 4,
            max_cases: 100,
            min_age: 18.0,
            min_agent: 1.0,
            fill_limit_secs: 5,
            min_duration_secs: 1800,
            exclusion_interval_secs: 1.0,
            exclusions: ExclusionRule::default_rules(),
            cache_dir: PathBuf::from("."),
        }
    }
}

impl DatasetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_sample_rate(mut self, sample_rate: usize) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    #[must_use]
    pub fn with_window_secs(mut self, window_secs: usize) -> Self {
        self.window_secs = window_secs;
        self
    }

    #[must_use]
    pub fn with_max_cases(mut self, max_cases: usize) -> Self {
        self.max_cases = max_cases;
        self
    }

    #[must_use]
    pub fn with_min_age(mut self, min_age: f64) -> Self {
        self.min_age = min_age;
        self
    }

    #[must_use]
    pub fn with_min_duration_secs(mut self, secs: usize) -> Self {
        self.min_duration_secs = secs;
        self
    }

    #[must_use]
    pub fn with_exclusions(mut self, exclusions: Vec<ExclusionRule>) -> Self {
        self.exclusions = exclusions;
        self
    }

    #[must_use]
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = dir.into();
        self
    }

    /// Samples per EEG window (`SEGLEN`).
    pub fn segment_len(&self) -> usize {
        self.window_secs * self.sample_rate
    }

    /// Sample interval of the extraction matrix in seconds.
    pub fn sample_interval(&self) -> f64 {
        1.0 / self.sample_rate as f64
    }

    /// Maximum number of consecutive missing values forward filling may replace.
    pub fn fill_limit(&self) -> usize {
        self.fill_limit_secs * self.sample_rate
    }

    /// Minimum number of rows of a trimmed recording.
    pub fn min_rows(&self) -> usize {
        self.min_duration_secs * self.sample_rate
    }

    /// Rejects option sets the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(ModelError::InvalidOption(
                "sample rate must be positive".to_string(),
            ));
        }
        if self.window_secs == 0 {
            return Err(ModelError::InvalidOption(
                "window length must be positive".to_string(),
            ));
        }
        if self.exclusion_interval_secs.is_nan() || self.exclusion_interval_secs <= 0.0 {
            return Err(ModelError::InvalidOption(
                "exclusion interval must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_derive_sample_counts() {
        let options = DatasetOptions::default();
        assert_eq!(options.segment_len(), 512);
        assert_eq!(options.fill_limit(), 640);
        assert_eq!(options.min_rows(), 1800 * 128);
        assert!((options.sample_interval() - 1.0 / 128.0).abs() < f64::EPSILON);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn zero_case_budget_is_valid() {
        let options = DatasetOptions::default().with_max_cases(0);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn zero_window_is_rejected() {
        let options = DatasetOptions::default().with_window_secs(0);
        assert!(matches!(
            options.validate(),
            Err(ModelError::InvalidOption(_))
        ));
    }
}
