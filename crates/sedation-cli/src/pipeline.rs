//! Dataset build pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Cache**: Return the bundle for this configuration if one exists
//! 2. **Metadata**: Download the case and track tables
//! 3. **Select**: Adult cases carrying EEG, BIS and sevoflurane
//! 4. **Cases**: Screen, prepare and window each candidate until enough
//!    cases are accepted
//! 5. **Output**: Write the accumulated windows as an `.npz` bundle
//!
//! All data access goes through [`CaseSource`], so the same code runs
//! against the VitalDB API and against in-memory fixtures.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};
use tracing::{debug, info, info_span};

use sedation_bundle::{cache_path, read_bundle, write_bundle};
use sedation_ingest::{case_ages, select_candidates};
use sedation_model::tracks::{EXTRACTION_TRACKS, REQUIRED_TRACKS};
use sedation_model::{
    CaseId, CaseOutcome, CaseRecord, DatasetOptions, RunSummary, SkipReason, TrackRecord,
    WindowDataset,
};
use sedation_source::CaseSource;
use sedation_transform::{Prepared, any_above, extract_windows, prepare_signals};

/// Everything a build run produced.
#[derive(Debug)]
pub struct BuildOutcome {
    pub dataset: WindowDataset,
    /// Per-run counters; empty when the bundle came from the cache.
    pub summary: RunSummary,
    pub bundle_path: PathBuf,
    pub from_cache: bool,
    pub max_cases: usize,
    pub elapsed: Duration,
}

/// Runs the whole pipeline for `options`.
///
/// With `refresh` unset, an existing bundle for the same window length and
/// case budget is returned without touching `source`.
pub fn build_dataset<S>(source: &S, options: &DatasetOptions, refresh: bool) -> Result<BuildOutcome>
where
    S: CaseSource + ?Sized,
{
    options.validate().context("invalid dataset options")?;
    let started = Instant::now();
    let bundle_path = cache_path(options);

    if !refresh && let Some(dataset) = load_cached(&bundle_path)? {
        return Ok(BuildOutcome {
            dataset,
            summary: RunSummary::default(),
            bundle_path,
            from_cache: true,
            max_cases: options.max_cases,
            elapsed: started.elapsed(),
        });
    }

    let metadata = fetch_metadata(source)?;
    let candidates = select(&metadata, options);
    let (dataset, summary) = process_candidates(source, &metadata, &candidates, options)?;
    output(&bundle_path, &dataset)?;

    Ok(BuildOutcome {
        dataset,
        summary,
        bundle_path,
        from_cache: false,
        max_cases: options.max_cases,
        elapsed: started.elapsed(),
    })
}

// ============================================================================
// Stage 1: Cache
// ============================================================================

/// Loads the bundle at `path` if it exists.
pub fn load_cached(path: &Path) -> Result<Option<WindowDataset>> {
    let span = info_span!("cache", path = %path.display());
    let _guard = span.enter();
    if !path.is_file() {
        debug!("no cached bundle");
        return Ok(None);
    }
    let dataset = read_bundle(path)
        .with_context(|| format!("load cached bundle {}", path.display()))?;
    info!(
        windows = dataset.len(),
        cases = dataset.case_count(),
        "using cached bundle"
    );
    Ok(Some(dataset))
}

// ============================================================================
// Stage 2: Metadata
// ============================================================================

/// Case and track tables of the source.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    pub cases: Vec<CaseRecord>,
    pub tracks: Vec<TrackRecord>,
}

pub fn fetch_metadata<S>(source: &S) -> Result<Metadata>
where
    S: CaseSource + ?Sized,
{
    let span = info_span!("metadata");
    let _guard = span.enter();
    let cases = source.case_table().context("download case table")?;
    let tracks = source.track_table().context("download track table")?;
    info!(
        cases = cases.len(),
        tracks = tracks.len(),
        "loaded metadata tables"
    );
    Ok(Metadata { cases, tracks })
}

// ============================================================================
// Stage 3: Select
// ============================================================================

/// Candidate case ids in ascending order.
pub fn select(metadata: &Metadata, options: &DatasetOptions) -> Vec<CaseId> {
    let span = info_span!("select");
    let _guard = span.enter();
    let candidates = select_candidates(
        &metadata.cases,
        &metadata.tracks,
        &REQUIRED_TRACKS,
        options.min_age,
    );
    info!(candidates = candidates.len(), "selected candidate cases");
    candidates
}

// ============================================================================
// Stage 4: Cases
// ============================================================================

/// Processes candidates in order until `options.max_cases` are accepted.
pub fn process_candidates<S>(
    source: &S,
    metadata: &Metadata,
    candidates: &[CaseId],
    options: &DatasetOptions,
) -> Result<(WindowDataset, RunSummary)>
where
    S: CaseSource + ?Sized,
{
    let ages = case_ages(&metadata.cases);
    let mut dataset = WindowDataset::new(options.segment_len());
    let mut summary = RunSummary::with_candidates(candidates.len());

    for &case_id in candidates {
        if summary.accepted >= options.max_cases {
            break;
        }
        let span = info_span!("case", case_id = %case_id);
        let _guard = span.enter();

        let age = ages
            .get(&case_id)
            .copied()
            .ok_or_else(|| anyhow!("case {case_id} has no age"))?;
        let outcome = process_case(source, case_id, age, options, &mut dataset)
            .with_context(|| format!("process case {case_id}"))?;
        summary.record(outcome);

        match outcome {
            CaseOutcome::Accepted { windows } => info!(
                accepted = summary.accepted,
                max_cases = options.max_cases,
                windows,
                total_windows = dataset.len(),
                "case accepted"
            ),
            CaseOutcome::Skipped(reason) => info!(reason = %reason, "case skipped"),
        }
    }

    info!(
        examined = summary.examined,
        accepted = summary.accepted,
        windows = summary.windows,
        skipped = summary.total_skipped(),
        "finished case loop"
    );
    Ok((dataset, summary))
}

/// Screens, prepares and windows one case, appending its windows to
/// `dataset`.
pub fn process_case<S>(
    source: &S,
    case_id: CaseId,
    age: f64,
    options: &DatasetOptions,
    dataset: &mut WindowDataset,
) -> Result<CaseOutcome>
where
    S: CaseSource + ?Sized,
{
    if let Some(reason) = check_exclusions(source, case_id, options)? {
        return Ok(CaseOutcome::Skipped(reason));
    }

    let matrix = source
        .load_signals(case_id, &EXTRACTION_TRACKS, options.sample_interval())
        .context("load extraction tracks")?;
    debug!(rows = matrix.nrows(), "loaded extraction tracks");

    let prepared = match prepare_signals(matrix, age, options)? {
        Prepared::Ready(matrix) => matrix,
        Prepared::Skipped(reason) => return Ok(CaseOutcome::Skipped(reason)),
    };
    let windows = extract_windows(
        &prepared,
        options.segment_len(),
        options.sample_rate,
        case_id,
        dataset,
    )?;
    Ok(CaseOutcome::Accepted { windows })
}

/// First exclusion rule the case violates, checked in rule order.
///
/// A track the case does not have, or that holds only NaN, never excludes.
pub fn check_exclusions<S>(
    source: &S,
    case_id: CaseId,
    options: &DatasetOptions,
) -> Result<Option<SkipReason>>
where
    S: CaseSource + ?Sized,
{
    for rule in &options.exclusions {
        let signal = source
            .load_signals(
                case_id,
                &[rule.track.as_str()],
                options.exclusion_interval_secs,
            )
            .with_context(|| format!("load {}", rule.track))?;
        if signal.ncols() > 0 && any_above(signal.column(0), rule.threshold) {
            debug!(track = %rule.track, threshold = rule.threshold, "exclusion hit");
            return Ok(Some(rule.reason));
        }
    }
    Ok(None)
}

// ============================================================================
// Stage 5: Output
// ============================================================================

pub fn output(path: &Path, dataset: &WindowDataset) -> Result<()> {
    let span = info_span!("output", path = %path.display());
    let _guard = span.enter();
    write_bundle(path, dataset).with_context(|| format!("write bundle {}", path.display()))
}
