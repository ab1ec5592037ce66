//! Facade crate for the Bysykkel longest-ride engine.
//!
//! This crate re-exports the core domain types and exposes the dataset loader
//! and HTTP route provider behind the `data` feature.

#![forbid(unsafe_code)]

pub use bysykkel_core::{
    CycleRoute, Endpoint, MAX_ROUTE_REQUESTS, RideLimit, RideRecord, RideRecordError, RideRoute,
    RideRoutingError, RouteProvider, RouteRequest, RouteRequestError, RoutingError,
    SelectionCheckError, Station, check_selection, decorate_distances, great_circle_distance,
    longest_durations, route_rides, select_default, select_longest_rides,
};

#[cfg(feature = "test-support")]
pub use bysykkel_core::test_support;

#[cfg(feature = "data")]
pub use bysykkel_data::{DatasetError, load_rides, parse_rides};

#[cfg(feature = "data")]
pub use bysykkel_data::routing::{HttpRouteProvider, HttpRouteProviderConfig, ProviderBuildError};
