//! In-memory [`CaseSource`] for fixtures and offline runs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use sedation_model::{CaseId, CaseRecord, TrackRecord};

use crate::align::{SignalMatrix, align_tracks};
use crate::error::Result;
use crate::source::CaseSource;

#[derive(Debug, Clone)]
struct StoredSignal {
    /// Sample interval the values were recorded at, in seconds.
    interval: f64,
    values: Vec<f64>,
}

impl StoredSignal {
    /// Nearest-earlier resampling onto `interval`.
    fn resample(&self, interval: f64) -> Vec<f64> {
        if self.values.is_empty() || (self.interval - interval).abs() < f64::EPSILON {
            return self.values.clone();
        }
        let duration = self.values.len() as f64 * self.interval;
        let cells = (duration / interval).ceil() as usize;
        (0..cells)
            .filter_map(|cell| {
                let source = (cell as f64 * interval / self.interval) as usize;
                self.values.get(source).copied()
            })
            .collect()
    }
}

/// Case source backed by records and sample vectors held in memory.
///
/// Every trait call is counted so tests can assert that a run did or did not
/// touch the source.
#[derive(Debug, Default)]
pub struct MemorySource {
    cases: Vec<CaseRecord>,
    tracks: Vec<TrackRecord>,
    signals: HashMap<(CaseId, String), StoredSignal>,
    requests: AtomicUsize,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_case(mut self, record: CaseRecord) -> Self {
        self.cases.push(record);
        self
    }

    /// Registers a track of `case_id` sampled every `interval` seconds.
    ///
    /// A matching track table row is added the first time a name is seen.
    #[must_use]
    pub fn with_signal(
        mut self,
        case_id: CaseId,
        name: &str,
        interval: f64,
        values: Vec<f64>,
    ) -> Self {
        let key = (case_id, name.to_string());
        if !self.signals.contains_key(&key) {
            self.tracks
                .push(TrackRecord::new(case_id, name, format!("{case_id}/{name}")));
        }
        self.signals.insert(key, StoredSignal { interval, values });
        self
    }

    /// Number of trait calls served so far.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::Relaxed)
    }

    fn count_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }
}

impl CaseSource for MemorySource {
    fn case_table(&self) -> Result<Vec<CaseRecord>> {
        self.count_request();
        Ok(self.cases.clone())
    }

    fn track_table(&self) -> Result<Vec<TrackRecord>> {
        self.count_request();
        Ok(self.tracks.clone())
    }

    fn load_signals(
        &self,
        case_id: CaseId,
        tracks: &[&str],
        interval: f64,
    ) -> Result<SignalMatrix> {
        self.count_request();
        let columns: Vec<Option<Vec<f64>>> = tracks
            .iter()
            .map(|name| {
                self.signals
                    .get(&(case_id, (*name).to_string()))
                    .map(|signal| signal.resample(interval))
            })
            .collect();
        Ok(align_tracks(&columns))
    }
}
