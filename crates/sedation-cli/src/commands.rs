use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info_span;

use sedation_bundle::read_bundle;
use sedation_cli::pipeline::{BuildOutcome, build_dataset};
use sedation_model::WindowDataset;
use sedation_source::VitalDbClient;

use crate::cli::{BuildArgs, InspectArgs};

/// A bundle loaded for `inspect`.
#[derive(Debug)]
pub struct Inspection {
    pub path: PathBuf,
    pub dataset: WindowDataset,
}

pub fn run_build(args: &BuildArgs) -> Result<BuildOutcome> {
    let options = args.dataset_options();
    let span = info_span!(
        "build",
        window_secs = options.window_secs,
        max_cases = options.max_cases
    );
    let _guard = span.enter();
    let client = VitalDbClient::with_base_url(args.api_url.as_str())
        .context("create VitalDB client")?;
    build_dataset(&client, &options, args.refresh)
}

pub fn run_inspect(args: &InspectArgs) -> Result<Inspection> {
    let dataset = read_bundle(&args.bundle)
        .with_context(|| format!("read bundle {}", args.bundle.display()))?;
    Ok(Inspection {
        path: args.bundle.clone(),
        dataset,
    })
}
