//! Test helpers for writing ride datasets and stubbing route providers.

use bysykkel_core::test_support::StraightLineRouteProvider;
use bysykkel_core::{RouteProvider, RoutingError};
use bysykkel_data::routing::HttpRouteProviderConfig;
use bysykkel_data::routing::test_support::StubRouteProvider;
use camino::{Utf8Path, Utf8PathBuf};
use std::cell::RefCell;
use tempfile::TempDir;

use crate::CliError;
use crate::longest::RouteProviderBuilder;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write test file");
}

/// One ride in export format; the start station id carries `label`.
pub(super) fn ride_json(duration: u64, label: &str) -> serde_json::Value {
    serde_json::json!({
        "started_at": "2022-01-01 04:00:00.000000+00:00",
        "ended_at": "2022-01-01 08:00:00.000000+00:00",
        "duration": duration,
        "start_station_id": label,
        "start_station_name": "Høgskulen på Vestlandet",
        "start_station_description": "Ved hovedinngang til skolen",
        "start_station_latitude": 60.369179844976586,
        "start_station_longitude": 5.349443793165847,
        "end_station_id": "132",
        "end_station_name": "Nøstetorget",
        "end_station_description": "Sukkerhusbryggen",
        "end_station_latitude": 60.39222475946063,
        "end_station_longitude": 5.314881116119068
    })
}

/// A dataset export whose rides are labelled by their input position.
pub(super) fn dataset_json(durations: &[u64]) -> Vec<u8> {
    let rides: Vec<serde_json::Value> = durations
        .iter()
        .enumerate()
        .map(|(index, &duration)| ride_json(duration, &index.to_string()))
        .collect();
    serde_json::to_vec_pretty(&rides).expect("serialise dataset")
}

/// Temporary workspace holding a dataset path.
#[derive(Debug)]
pub(super) struct Workspace {
    _tmp: TempDir,
    pub(super) root: Utf8PathBuf,
    pub(super) dataset: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
        let dataset = root.join("2022-01.json");
        Self {
            _tmp: tmp,
            root,
            dataset,
        }
    }

    pub(super) fn with_durations(durations: &[u64]) -> Self {
        let workspace = Self::new();
        write_utf8(&workspace.dataset, &dataset_json(durations));
        workspace
    }
}

/// Route providers handed out by [`StubRouteProviderBuilder`].
#[derive(Debug, Clone, Copy)]
pub(super) enum StubRoutes {
    StraightLines,
    NoRoute,
}

/// Records the provider configuration and hands out a stub provider.
#[derive(Debug)]
pub(super) struct StubRouteProviderBuilder {
    routes: StubRoutes,
    pub(super) seen: RefCell<Option<HttpRouteProviderConfig>>,
}

impl StubRouteProviderBuilder {
    pub(super) fn new(routes: StubRoutes) -> Self {
        Self {
            routes,
            seen: RefCell::new(None),
        }
    }
}

impl RouteProviderBuilder for StubRouteProviderBuilder {
    fn build(&self, config: &HttpRouteProviderConfig) -> Result<Box<dyn RouteProvider>, CliError> {
        self.seen.replace(Some(config.clone()));
        Ok(match self.routes {
            StubRoutes::StraightLines => Box::new(StraightLineRouteProvider),
            StubRoutes::NoRoute => Box::new(StubRouteProvider::with_error(RoutingError::NoRoute)),
        })
    }
}
