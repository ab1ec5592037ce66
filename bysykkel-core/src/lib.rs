//! Core domain types for the Bysykkel longest-ride engine.
//!
//! The crate models completed bike-share rentals ([`RideRecord`]) and offers
//! the pure operations the rest of the workspace builds on:
//!
//! - [`select_longest_rides`] picks the rides of greatest duration, longest
//!   first, keeping the input order among equal durations.
//! - [`decorate_distances`] attaches the great-circle distance between the
//!   start and end stations of every ride.
//! - [`RouteRequest::from_ride`] turns a ride into a request for a routing
//!   service, and the [`RouteProvider`] trait abstracts that service.
//! - [`check_selection`] verifies a selection against an independently
//!   computed list of the longest durations.
//!
//! Nothing here performs I/O. Dataset loading and HTTP routing live in
//! `bysykkel-data`.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod check;
pub mod distance;
pub mod ride;
pub mod route;
pub mod routing;
pub mod selection;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use check::{SelectionCheckError, check_selection, longest_durations};
pub use distance::{decorate_distances, great_circle_distance};
pub use ride::{RideRecord, RideRecordError, Station};
pub use route::{CycleRoute, Endpoint, RideRoute, RouteRequest, RouteRequestError};
pub use routing::{
    MAX_ROUTE_REQUESTS, RideRoutingError, RouteProvider, RoutingError, route_rides,
};
pub use selection::{RideLimit, select_default, select_longest_rides};
