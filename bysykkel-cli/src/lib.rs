//! Command-line interface for the Bysykkel longest-ride engine.
#![forbid(unsafe_code)]

use bysykkel_core::RideRecord;
use camino::Utf8Path;
use clap::{Parser, Subcommand};
use log::info;

mod check;
mod error;
mod longest;
mod output;

use check::{CheckArgs, run_check};
use longest::{LongestArgs, run_longest};

pub use error::CliError;

pub(crate) const ARG_DATASET: &str = "dataset";
pub(crate) const ARG_LIMIT: &str = "limit";
pub(crate) const ARG_WITH_ROUTES: &str = "with-routes";
pub(crate) const ARG_DIRECTIONS_BASE_URL: &str = "directions-base-url";
pub(crate) const ARG_ACCESS_TOKEN: &str = "access-token";
pub(crate) const ENV_LONGEST_DATASET: &str = "BYSYKKEL_CMDS_LONGEST_DATASET";
pub(crate) const ENV_CHECK_DATASET: &str = "BYSYKKEL_CMDS_CHECK_DATASET";

/// Run the Bysykkel CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] when argument parsing, configuration merging,
/// dataset loading, routing, checking or writing the output fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Longest(args) => run_longest(args),
        Command::Check(args) => run_check(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "bysykkel",
    about = "Find the longest Bergen Bysykkel rides in a monthly export",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the longest rides, optionally with cycling routes.
    Longest(LongestArgs),
    /// Verify the longest-ride selection against an independent ranking.
    Check(CheckArgs),
}

/// Ensure `path` names an existing regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match bysykkel_data::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Load a ride dataset, reporting failures against its path.
pub(crate) fn load_dataset(path: &Utf8Path) -> Result<Vec<RideRecord>, CliError> {
    let rides = bysykkel_data::load_rides(path).map_err(|source| CliError::LoadDataset {
        path: path.to_path_buf(),
        source,
    })?;
    info!("loaded {} rides from {path}", rides.len());
    Ok(rides)
}

#[cfg(test)]
mod tests;
