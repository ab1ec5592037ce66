//! Resolve selected rides to cycling routes.
//!
//! The [`RouteProvider`] trait abstracts a routing service that turns
//! [`RouteRequest`](crate::RouteRequest) values into
//! [`CycleRoute`](crate::CycleRoute) geometries. [`route_rides`] wires the
//! selection output to a provider: it maps every ride to a request, calls the
//! provider once for the whole batch and pairs each ride with its route.
//!
//! A batch holds at most [`MAX_ROUTE_REQUESTS`] requests. If any single
//! request fails, the whole batch fails.

mod error;
mod provider;

pub use error::{RideRoutingError, RoutingError};
pub use provider::{MAX_ROUTE_REQUESTS, RouteProvider, route_rides};
