//! VitalDB open API client.
//!
//! Downloads the metadata tables and individual tracks over HTTP. Track
//! downloads may arrive gzip-compressed; bodies are sniffed and inflated
//! before parsing.

use std::io::Read;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use flate2::read::GzDecoder;
use reqwest::blocking::Client;
use tracing::{debug, info};

use sedation_ingest::{TrackIndex, parse_case_table, parse_track_payload, parse_track_table};
use sedation_model::{CaseId, CaseRecord, TrackRecord};

use crate::align::{SignalMatrix, align_tracks};
use crate::error::{Result, SourceError};
use crate::source::CaseSource;

/// Base URL of the VitalDB open dataset API.
pub const DEFAULT_API_URL: &str = "https://api.vitaldb.net";

/// HTTP request timeout. Wave tracks of long cases are large.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

const USER_AGENT_VALUE: &str = concat!("sevo-dataset/", env!("CARGO_PKG_VERSION"));

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Client for the VitalDB open API.
pub struct VitalDbClient {
    client: Client,
    base_url: String,
    /// Track ids looked up by case and name, filled on first use.
    track_index: Mutex<Option<Arc<TrackIndex>>>,
}

impl VitalDbClient {
    /// Create a client for `base_url`, usually [`DEFAULT_API_URL`].
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT_VALUE)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            track_index: Mutex::new(None),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn get(&self, path: &str) -> Result<Vec<u8>> {
        let url = self.url(path);
        let started = Instant::now();
        let response = self.client.get(&url).send()?;
        if !response.status().is_success() {
            return Err(SourceError::Http {
                url,
                status: response.status().as_u16(),
            });
        }
        let body = decode_body(response.bytes()?.to_vec())?;
        debug!(
            url = %url,
            bytes = body.len(),
            duration_ms = started.elapsed().as_millis(),
            "downloaded"
        );
        Ok(body)
    }

    fn fetch_track_records(&self) -> Result<Vec<TrackRecord>> {
        let records = parse_track_table(&self.get("trks")?)?;
        let index = Arc::new(TrackIndex::from_records(&records));
        *self
            .track_index
            .lock()
            .map_err(|_| SourceError::CachePoisoned)? = Some(index);
        Ok(records)
    }

    fn track_index(&self) -> Result<Arc<TrackIndex>> {
        {
            let cache = self
                .track_index
                .lock()
                .map_err(|_| SourceError::CachePoisoned)?;
            if let Some(index) = cache.as_ref() {
                return Ok(Arc::clone(index));
            }
        }
        info!("track table not loaded yet; fetching it for track lookups");
        self.fetch_track_records()?;
        let cache = self
            .track_index
            .lock()
            .map_err(|_| SourceError::CachePoisoned)?;
        Ok(cache.as_ref().map(Arc::clone).unwrap_or_default())
    }

    fn load_track(&self, tid: &str, interval: f64) -> Result<Vec<f64>> {
        let samples = parse_track_payload(&self.get(tid)?)?;
        Ok(samples.resample(interval))
    }
}

impl CaseSource for VitalDbClient {
    fn case_table(&self) -> Result<Vec<CaseRecord>> {
        Ok(parse_case_table(&self.get("cases")?)?)
    }

    fn track_table(&self) -> Result<Vec<TrackRecord>> {
        self.fetch_track_records()
    }

    fn load_signals(
        &self,
        case_id: CaseId,
        tracks: &[&str],
        interval: f64,
    ) -> Result<SignalMatrix> {
        let index = self.track_index()?;
        let mut columns = Vec::with_capacity(tracks.len());
        for name in tracks {
            let column = match index.tid(case_id, name) {
                Some(tid) => Some(self.load_track(tid, interval)?),
                None => {
                    debug!(case_id = %case_id, track = %name, "case has no such track");
                    None
                }
            };
            columns.push(column);
        }
        Ok(align_tracks(&columns))
    }
}

/// Inflates gzip bodies; anything else is returned unchanged.
fn decode_body(body: Vec<u8>) -> Result<Vec<u8>> {
    if !body.starts_with(&GZIP_MAGIC) {
        return Ok(body);
    }
    let mut decoded = Vec::with_capacity(body.len() * 4);
    GzDecoder::new(body.as_slice()).read_to_end(&mut decoded)?;
    Ok(decoded)
}
