//! CLI argument definitions for the dataset builder.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

use sedation_cli::logging::LogFormat;
use sedation_model::DatasetOptions;
use sedation_source::DEFAULT_API_URL;

#[derive(Parser)]
#[command(
    name = "sevo-dataset",
    version,
    about = "Build an EEG / sevoflurane MAC / BIS dataset from VitalDB",
    long_about = "Build a machine-learning dataset from the VitalDB open database.\n\n\
                  Adult cases with EEG, BIS and end-tidal sevoflurane are screened for\n\
                  co-administered drugs, normalized to age-adjusted MAC and cut into\n\
                  fixed-length EEG windows, cached as a NumPy .npz bundle."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Prefix pretty and compact log lines with the time.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build the dataset bundle, or load it from the cache when present.
    Build(BuildArgs),

    /// Print the shapes and per-case window counts of a bundle.
    Inspect(InspectArgs),
}

#[derive(Args)]
pub struct BuildArgs {
    /// Directory holding the cached `.npz` bundle.
    #[arg(long = "cache-dir", value_name = "DIR", default_value = ".")]
    pub cache_dir: PathBuf,

    /// Base URL of the VitalDB open API.
    #[arg(long = "api-url", value_name = "URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Length of each EEG window in seconds.
    #[arg(long = "window-secs", value_name = "SECS", default_value_t = 4)]
    pub window_secs: usize,

    /// Stop after this many cases are accepted.
    #[arg(long = "max-cases", value_name = "N", default_value_t = 100)]
    pub max_cases: usize,

    /// Sample rate the signals are aligned at, in Hz.
    #[arg(long = "sample-rate", value_name = "HZ", default_value_t = 128)]
    pub sample_rate: usize,

    /// Only cases strictly older than this are considered.
    #[arg(long = "min-age", value_name = "YEARS", default_value_t = 18.0)]
    pub min_age: f64,

    /// Rebuild the bundle even if a cached one exists.
    #[arg(long = "refresh")]
    pub refresh: bool,
}

impl BuildArgs {
    pub fn dataset_options(&self) -> DatasetOptions {
        DatasetOptions::default()
            .with_cache_dir(self.cache_dir.clone())
            .with_window_secs(self.window_secs)
            .with_max_cases(self.max_cases)
            .with_sample_rate(self.sample_rate)
            .with_min_age(self.min_age)
    }
}

#[derive(Args)]
pub struct InspectArgs {
    /// Path to a `.npz` bundle.
    #[arg(value_name = "BUNDLE")]
    pub bundle: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
