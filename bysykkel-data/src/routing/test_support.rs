//! Test utilities for routing providers.
//!
//! This module provides [`StubRouteProvider`], a deterministic test double
//! for [`RouteProvider`] that returns pre-configured responses without
//! making actual HTTP requests.

use std::cell::Cell;

use bysykkel_core::{CycleRoute, MAX_ROUTE_REQUESTS, RouteProvider, RouteRequest, RoutingError};

/// Stub `RouteProvider` for testing.
///
/// This provider returns pre-configured responses, allowing tests to verify
/// behaviour without requiring a running Directions service. It counts the
/// batches it receives so callers can assert that no request was made.
///
/// # Example
///
/// ```
/// use bysykkel_data::routing::test_support::StubRouteProvider;
/// use bysykkel_core::{RouteProvider, RouteRequest, RoutingError};
/// use geo::Coord;
///
/// let provider = StubRouteProvider::with_error(RoutingError::NoRoute);
/// let request = RouteRequest {
///     origin: Coord { x: 5.349, y: 60.369 },
///     destination: Coord { x: 5.315, y: 60.392 },
/// };
///
/// assert_eq!(provider.get_routes(&[request]), Err(RoutingError::NoRoute));
/// assert_eq!(provider.calls(), 1);
/// ```
#[derive(Debug)]
pub struct StubRouteProvider {
    response: StubResponse,
    calls: Cell<usize>,
}

#[derive(Debug, Clone)]
enum StubResponse {
    Routes(Vec<CycleRoute>),
    Error(RoutingError),
}

impl StubRouteProvider {
    /// Create a provider that returns the given routes.
    ///
    /// The routes are returned regardless of the requests provided, as long
    /// as the batch is within the request limits.
    #[must_use]
    pub const fn with_routes(routes: Vec<CycleRoute>) -> Self {
        Self::from_response(StubResponse::Routes(routes))
    }

    /// Create a provider that returns the given error.
    ///
    /// The error will be returned for any non-empty input.
    /// Empty input still returns `RoutingError::EmptyInput`.
    #[must_use]
    pub const fn with_error(error: RoutingError) -> Self {
        Self::from_response(StubResponse::Error(error))
    }

    const fn from_response(response: StubResponse) -> Self {
        Self {
            response,
            calls: Cell::new(0),
        }
    }

    /// Number of batches received so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl RouteProvider for StubRouteProvider {
    fn get_routes(&self, requests: &[RouteRequest]) -> Result<Vec<CycleRoute>, RoutingError> {
        self.calls.set(self.calls.get().saturating_add(1));

        if requests.is_empty() {
            return Err(RoutingError::EmptyInput);
        }
        if requests.len() > MAX_ROUTE_REQUESTS {
            return Err(RoutingError::TooManyRequests {
                requested: requests.len(),
                limit: MAX_ROUTE_REQUESTS,
            });
        }

        match &self.response {
            StubResponse::Routes(routes) => Ok(routes.clone()),
            StubResponse::Error(error) => Err(error.clone()),
        }
    }
}
