//! Sevoflurane EEG dataset builder.

use clap::{ColorChoice, Parser};
use sedation_cli::logging::{LogConfig, LogFormat, init_logging};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command};
use crate::commands::{run_build, run_inspect};
use crate::summary::{print_build_summary, print_inspection};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Build(args) => match run_build(&args) {
            Ok(outcome) => {
                print_build_summary(&outcome);
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Inspect(args) => match run_inspect(&args) {
            Ok(inspection) => {
                print_inspection(&inspection);
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

/// Logging setup from the global flags. An explicit `--log-level` wins over
/// `-v`/`-q`, and `RUST_LOG` is only honored when neither is given.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let explicit = cli.log_level.map(LevelFilter::from);
    let with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    LogConfig::default()
        .with_level(explicit.unwrap_or_else(|| cli.verbosity.tracing_level_filter()))
        .with_env_filter(explicit.is_none() && !cli.verbosity.is_present())
        .with_format(LogFormat::from(cli.log_format))
        .with_timestamps(cli.log_timestamps)
        .with_log_file(cli.log_file.clone())
        .with_ansi(with_ansi)
}
