//! Track names read by the pipeline and the exclusion rules built on them.

use crate::outcome::SkipReason;

/// Raw EEG waveform from the BIS monitor.
pub const EEG_WAVE: &str = "BIS/EEG1_WAV";
/// End-tidal sevoflurane concentration.
pub const SEVO_EXPIRED: &str = "Primus/EXP_SEVO";
/// Bispectral index.
pub const BIS_INDEX: &str = "BIS/BIS";

pub const PROPOFOL_CE: &str = "Orchestra/PPF20_CE";
pub const DESFLURANE_EXPIRED: &str = "Primus/EXP_DES";
pub const NITROUS_OXIDE_FRACTION: &str = "Primus/FEN2O";
pub const REMIFENTANIL_CE: &str = "Orchestra/RFTN50_CE";

/// Tracks a case must carry to become a candidate.
pub const REQUIRED_TRACKS: [&str; 3] = [EEG_WAVE, BIS_INDEX, SEVO_EXPIRED];

/// Tracks loaded for extraction, in matrix column order.
pub const EXTRACTION_TRACKS: [&str; 3] = [EEG_WAVE, SEVO_EXPIRED, BIS_INDEX];

pub const EEG_COLUMN: usize = 0;
pub const SEVO_COLUMN: usize = 1;
pub const BIS_COLUMN: usize = 2;

/// Rejects a case when any sample of `track` is above `threshold`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExclusionRule {
    pub track: String,
    pub threshold: f64,
    pub reason: SkipReason,
}

impl ExclusionRule {
    pub fn new(track: impl Into<String>, threshold: f64, reason: SkipReason) -> Self {
        Self {
            track: track.into(),
            threshold,
            reason,
        }
    }

    /// Co-administered drugs that disqualify a case, in check order.
    pub fn default_rules() -> Vec<Self> {
        vec![
            Self::new(PROPOFOL_CE, 0.2, SkipReason::Propofol),
            Self::new(DESFLURANE_EXPIRED, 1.0, SkipReason::Desflurane),
            Self::new(NITROUS_OXIDE_FRACTION, 2.0, SkipReason::NitrousOxide),
            Self::new(REMIFENTANIL_CE, 0.2, SkipReason::Remifentanil),
        ]
    }
}
