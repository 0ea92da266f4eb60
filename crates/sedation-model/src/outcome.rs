//! Per-case outcomes and the run-level tally.

use std::collections::BTreeMap;
use std::fmt;

/// Why a candidate case was left out of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SkipReason {
    Propofol,
    Desflurane,
    NitrousOxide,
    Remifentanil,
    /// Sevoflurane never reached the minimum concentration.
    InsufficientAgent,
    /// The BIS track has no positive reading.
    NoValidDepth,
    /// The span of valid BIS readings is shorter than the minimum duration.
    TooShort,
}

impl SkipReason {
    pub const ALL: [SkipReason; 7] = [
        SkipReason::Propofol,
        SkipReason::Desflurane,
        SkipReason::NitrousOxide,
        SkipReason::Remifentanil,
        SkipReason::InsufficientAgent,
        SkipReason::NoValidDepth,
        SkipReason::TooShort,
    ];

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Propofol => "propofol",
            Self::Desflurane => "desflurane",
            Self::NitrousOxide => "n2o",
            Self::Remifentanil => "remifentanil",
            Self::InsufficientAgent => "insufficient sevoflurane",
            Self::NoValidDepth => "no valid bis",
            Self::TooShort => "recording too short",
        }
    }

    /// True for reasons raised by the co-administered drug checks.
    #[must_use]
    pub const fn is_exclusion(&self) -> bool {
        matches!(
            self,
            Self::Propofol | Self::Desflurane | Self::NitrousOxide | Self::Remifentanil
        )
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseOutcome {
    Accepted { windows: usize },
    Skipped(SkipReason),
}

/// Counters for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Cases that passed the inclusion criteria.
    pub candidates: usize,
    /// Candidates the loop looked at before stopping.
    pub examined: usize,
    pub accepted: usize,
    pub windows: usize,
    pub skipped: BTreeMap<SkipReason, usize>,
}

impl RunSummary {
    pub fn with_candidates(candidates: usize) -> Self {
        Self {
            candidates,
            ..Self::default()
        }
    }

    pub fn record(&mut self, outcome: CaseOutcome) {
        self.examined += 1;
        match outcome {
            CaseOutcome::Accepted { windows } => {
                self.accepted += 1;
                self.windows += windows;
            }
            CaseOutcome::Skipped(reason) => {
                *self.skipped.entry(reason).or_insert(0) += 1;
            }
        }
    }

    pub fn skip_count(&self, reason: SkipReason) -> usize {
        self.skipped.get(&reason).copied().unwrap_or(0)
    }

    pub fn total_skipped(&self) -> usize {
        self.skipped.values().sum()
    }
}
