//! Error types emitted by the Bysykkel CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>`.

use std::sync::Arc;

use bysykkel_core::{RideRoutingError, SelectionCheckError};
use bysykkel_data::DatasetError;
use bysykkel_data::routing::ProviderBuildError;
use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors emitted by the Bysykkel CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// More rides were requested than one routing batch accepts.
    #[error("--with-routes accepts at most {max} rides, got --limit {limit}")]
    RouteLimitExceeded { limit: usize, max: usize },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Loading the ride dataset failed.
    #[error("failed to load rides from {path:?}: {source}")]
    LoadDataset {
        path: Utf8PathBuf,
        #[source]
        source: DatasetError,
    },
    /// Constructing the route provider failed.
    #[error("failed to build route provider for {base_url:?}: {source}")]
    BuildRouteProvider {
        base_url: String,
        #[source]
        source: ProviderBuildError,
    },
    /// Resolving routes for the selected rides failed.
    #[error("failed to route selected rides: {0}")]
    Routing(#[source] RideRoutingError),
    /// The selection disagreed with the independent ranking.
    #[error("selection check failed: {0}")]
    Check(#[source] SelectionCheckError),
    /// Serialising the command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing the command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
