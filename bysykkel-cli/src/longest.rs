//! Longest command implementation for the Bysykkel CLI.

use bysykkel_core::{
    RideLimit, RideRecord, RouteProvider, decorate_distances, route_rides, select_longest_rides,
};
use bysykkel_data::routing::{HttpRouteProvider, HttpRouteProviderConfig};
use camino::Utf8PathBuf;
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::output::{RideRouteOutput, write_json};
use crate::{
    ARG_ACCESS_TOKEN, ARG_DATASET, ARG_DIRECTIONS_BASE_URL, ARG_LIMIT, ARG_WITH_ROUTES, CliError,
    ENV_LONGEST_DATASET, load_dataset, require_existing,
};

/// CLI arguments for the `longest` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "longest",
    long_about = "Load a monthly ride export, add straight-line distances \
                 and print the longest rides as JSON. With --with-routes \
                 each selected ride is paired with a cycling route from a \
                 Mapbox-compatible Directions service.",
    about = "Print the longest rides in a dataset"
)]
#[ortho_config(prefix = "BYSYKKEL")]
pub(crate) struct LongestArgs {
    /// Path to a JSON ride export.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) dataset: Option<Utf8PathBuf>,
    /// Number of rides to select (defaults to 10; zero or less selects none).
    #[arg(long = ARG_LIMIT, value_name = "count", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) limit: Option<i64>,
    /// Resolve a cycling route for every selected ride.
    #[arg(long = ARG_WITH_ROUTES)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) with_routes: bool,
    /// Base URL for the Directions service (e.g. "https://api.mapbox.com").
    #[arg(long = ARG_DIRECTIONS_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) directions_base_url: Option<String>,
    /// Access token for the Directions service.
    #[arg(long = ARG_ACCESS_TOKEN, value_name = "token")]
    #[serde(default)]
    pub(crate) access_token: Option<String>,
}

impl LongestArgs {
    pub(crate) fn into_config(self) -> Result<LongestConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        LongestConfig::try_from(merged)
    }
}

/// Resolved `longest` command configuration.
#[derive(Debug, Clone)]
pub(crate) struct LongestConfig {
    /// Path to the ride export.
    pub(crate) dataset: Utf8PathBuf,
    /// Number of rides to select.
    pub(crate) limit: RideLimit,
    /// Directions settings when routes were requested.
    pub(crate) routing: Option<HttpRouteProviderConfig>,
}

impl LongestConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.dataset, ARG_DATASET)
    }
}

impl TryFrom<LongestArgs> for LongestConfig {
    type Error = CliError;

    fn try_from(args: LongestArgs) -> Result<Self, Self::Error> {
        let dataset = args.dataset.ok_or(CliError::MissingArgument {
            field: ARG_DATASET,
            env: ENV_LONGEST_DATASET,
        })?;
        let limit = args.limit.map_or(RideLimit::DEFAULT, RideLimit::from_signed);
        if args.with_routes && limit > RideLimit::ROUTING_MAX {
            return Err(CliError::RouteLimitExceeded {
                limit: limit.get(),
                max: RideLimit::ROUTING_MAX.get(),
            });
        }

        let routing = args.with_routes.then(|| {
            let config = args
                .directions_base_url
                .map_or_else(HttpRouteProviderConfig::default, HttpRouteProviderConfig::new);
            match args.access_token {
                Some(token) => config.with_access_token(token),
                None => config,
            }
        });

        Ok(Self {
            dataset,
            limit,
            routing,
        })
    }
}

/// Builds a route provider for the current invocation.
pub(crate) trait RouteProviderBuilder {
    fn build(&self, config: &HttpRouteProviderConfig) -> Result<Box<dyn RouteProvider>, CliError>;
}

pub(crate) struct DefaultRouteProviderBuilder;

impl RouteProviderBuilder for DefaultRouteProviderBuilder {
    fn build(&self, config: &HttpRouteProviderConfig) -> Result<Box<dyn RouteProvider>, CliError> {
        let provider = HttpRouteProvider::with_config(config.clone()).map_err(|source| {
            CliError::BuildRouteProvider {
                base_url: config.base_url.clone(),
                source,
            }
        })?;
        Ok(Box::new(provider))
    }
}

pub(crate) fn run_longest(args: LongestArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultRouteProviderBuilder;
    run_longest_with(args, &builder, &mut stdout)
}

pub(crate) fn run_longest_with(
    args: LongestArgs,
    builder: &dyn RouteProviderBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let selected = select_from_dataset(&config)?;

    match &config.routing {
        Some(routing) => {
            let provider = builder.build(routing)?;
            let routes = route_rides(provider.as_ref(), &selected).map_err(CliError::Routing)?;
            let output: Vec<RideRouteOutput> =
                routes.into_iter().map(RideRouteOutput::from).collect();
            write_json(writer, &output)
        }
        None => write_json(writer, &selected),
    }
}

fn select_from_dataset(config: &LongestConfig) -> Result<Vec<RideRecord>, CliError> {
    let rides = decorate_distances(&load_dataset(&config.dataset)?);
    let selected = select_longest_rides(&rides, config.limit);
    info!(
        "selected {} of {} rides (limit {})",
        selected.len(),
        rides.len(),
        config.limit.get()
    );
    Ok(selected)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<LongestConfig, CliError> {
    let merged = LongestArgs::merge_from_layers(layers).map_err(CliError::from)?;
    LongestConfig::try_from(merged)
}
