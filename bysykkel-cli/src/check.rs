//! Check command implementation for the Bysykkel CLI.

use bysykkel_core::{RideLimit, check_selection, decorate_distances, select_longest_rides};
use camino::Utf8PathBuf;
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::output::{CheckSummary, write_json};
use crate::{ARG_DATASET, ARG_LIMIT, CliError, ENV_CHECK_DATASET, load_dataset, require_existing};

/// CLI arguments for the `check` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "check",
    long_about = "Select the longest rides from a monthly export and verify \
                 the selection against an independent ranking of every ride \
                 duration. Exits with a failure status on any disagreement.",
    about = "Verify the longest-ride selection for a dataset"
)]
#[ortho_config(prefix = "BYSYKKEL")]
pub(crate) struct CheckArgs {
    /// Path to a JSON ride export.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Number of rides to select (defaults to 10; zero or less selects none).
    #[arg(long = ARG_LIMIT, value_name = "count", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) limit: Option<i64>,
}

impl CheckArgs {
    pub(crate) fn into_config(self) -> Result<CheckConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        CheckConfig::try_from(merged)
    }
}

/// Resolved `check` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CheckConfig {
    /// Path to the ride export.
    pub(crate) dataset: Utf8PathBuf,
    /// Number of rides to select.
    pub(crate) limit: RideLimit,
}

impl TryFrom<CheckArgs> for CheckConfig {
    type Error = CliError;

    fn try_from(args: CheckArgs) -> Result<Self, Self::Error> {
        let dataset = args.dataset.ok_or(CliError::MissingArgument {
            field: ARG_DATASET,
            env: ENV_CHECK_DATASET,
        })?;
        Ok(Self {
            dataset,
            limit: args.limit.map_or(RideLimit::DEFAULT, RideLimit::from_signed),
        })
    }
}

pub(crate) fn run_check(args: CheckArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_check_with(args, &mut stdout)
}

pub(crate) fn run_check_with(args: CheckArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_existing(&config.dataset, ARG_DATASET)?;
    let rides = decorate_distances(&load_dataset(&config.dataset)?);
    let selected = select_longest_rides(&rides, config.limit);
    check_selection(&rides, &selected, config.limit).map_err(CliError::Check)?;
    info!("verified {} longest of {} rides", selected.len(), rides.len());

    let summary = CheckSummary {
        rides: rides.len(),
        selected: selected.len(),
        longest_duration_seconds: selected.first().map(|ride| ride.duration_seconds),
    };
    write_json(writer, &summary)
}
