//! HTTP route providers for cycling directions.
//!
//! This module provides [`HttpRouteProvider`], an implementation of
//! [`bysykkel_core::RouteProvider`] that resolves cycling routes from a
//! Mapbox-compatible Directions API.
//!
//! # Architecture
//!
//! Each [`RouteRequest`](bysykkel_core::RouteRequest) becomes one Directions
//! call. A batch of up to ten calls is issued concurrently and awaited as a
//! whole; the first failure fails the batch. The synchronous
//! [`RouteProvider`](bysykkel_core::RouteProvider) trait is implemented by
//! blocking on the async calls internally.
//!
//! # Example
//!
//! ```no_run
//! use bysykkel_data::routing::{HttpRouteProvider, HttpRouteProviderConfig};
//! use bysykkel_core::{RouteProvider, RouteRequest};
//! use geo::Coord;
//! use std::time::Duration;
//!
//! let config = HttpRouteProviderConfig::default()
//!     .with_access_token("pk.example")
//!     .with_timeout(Duration::from_secs(10));
//! let provider = HttpRouteProvider::with_config(config)?;
//!
//! let request = RouteRequest {
//!     origin: Coord { x: 5.349, y: 60.369 },
//!     destination: Coord { x: 5.315, y: 60.392 },
//! };
//! let routes = provider.get_routes(&[request])?;
//! println!("{} m", routes[0].distance_meters);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod directions;
mod provider;

#[doc(hidden)]
pub mod test_support;

pub use provider::{
    DEFAULT_BASE_URL, DEFAULT_PROFILE, DEFAULT_USER_AGENT, HttpRouteProvider,
    HttpRouteProviderConfig, ProviderBuildError,
};
