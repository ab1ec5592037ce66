//! Route provider trait and the ride-to-route pipeline.

use crate::{CycleRoute, RideRecord, RideRoute, RouteRequest};

use super::error::{RideRoutingError, RoutingError};

/// Largest number of route requests issued in one batch.
///
/// Routing services meter usage per request; drawing more than this many
/// routes at a time is refused rather than sent.
pub const MAX_ROUTE_REQUESTS: usize = 10;

/// Resolve cycling routes for a batch of requests.
///
/// Implementers must return exactly one route per request, in request order.
/// `routes[i]` is the route for `requests[i]`.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use geo::{Coord, LineString};
/// use bysykkel_core::{CycleRoute, MAX_ROUTE_REQUESTS, RouteProvider, RouteRequest, RoutingError};
///
/// struct DirectProvider;
///
/// impl RouteProvider for DirectProvider {
///     fn get_routes(&self, requests: &[RouteRequest]) -> Result<Vec<CycleRoute>, RoutingError> {
///         if requests.is_empty() {
///             return Err(RoutingError::EmptyInput);
///         }
///         if requests.len() > MAX_ROUTE_REQUESTS {
///             return Err(RoutingError::TooManyRequests {
///                 requested: requests.len(),
///                 limit: MAX_ROUTE_REQUESTS,
///             });
///         }
///         Ok(requests
///             .iter()
///             .map(|request| CycleRoute {
///                 geometry: LineString::from(vec![request.origin, request.destination]),
///                 distance_meters: 0.0,
///                 duration: Duration::ZERO,
///             })
///             .collect())
///     }
/// }
///
/// let request = RouteRequest {
///     origin: Coord { x: 5.34, y: 60.36 },
///     destination: Coord { x: 5.31, y: 60.39 },
/// };
/// let routes = DirectProvider.get_routes(&[request])?;
/// assert_eq!(routes.len(), 1);
/// # Ok::<(), RoutingError>(())
/// ```
pub trait RouteProvider {
    /// Return one route per entry in `requests`.
    ///
    /// Implementations must return `Err(RoutingError::EmptyInput)` when
    /// `requests` is empty and `Err(RoutingError::TooManyRequests { .. })`
    /// when it holds more than [`MAX_ROUTE_REQUESTS`] entries. A failure of
    /// any single request fails the whole batch.
    fn get_routes(&self, requests: &[RouteRequest]) -> Result<Vec<CycleRoute>, RoutingError>;
}

/// Resolve a route for every ride and pair each ride with its route.
///
/// An empty `rides` slice returns an empty result without calling the
/// provider. Rides are checked before any request is sent, so an invalid ride
/// never costs a network call.
///
/// # Errors
///
/// - [`RideRoutingError::InvalidRide`] for the first ride whose stations are
///   not valid coordinates.
/// - [`RideRoutingError::Routing`] wrapping [`RoutingError::TooManyRequests`]
///   when `rides` exceeds [`MAX_ROUTE_REQUESTS`], or any provider failure.
/// - [`RideRoutingError::RouteCountMismatch`] when the provider breaks its
///   one-route-per-request contract.
pub fn route_rides<P>(provider: &P, rides: &[RideRecord]) -> Result<Vec<RideRoute>, RideRoutingError>
where
    P: RouteProvider + ?Sized,
{
    if rides.is_empty() {
        return Ok(Vec::new());
    }
    if rides.len() > MAX_ROUTE_REQUESTS {
        return Err(RoutingError::TooManyRequests {
            requested: rides.len(),
            limit: MAX_ROUTE_REQUESTS,
        }
        .into());
    }

    let requests = rides
        .iter()
        .enumerate()
        .map(|(index, ride)| {
            RouteRequest::from_ride(ride)
                .map_err(|source| RideRoutingError::InvalidRide { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let routes = provider.get_routes(&requests)?;
    if routes.len() != requests.len() {
        return Err(RideRoutingError::RouteCountMismatch {
            expected: requests.len(),
            found: routes.len(),
        });
    }

    Ok(rides
        .iter()
        .cloned()
        .zip(routes)
        .map(|(ride, route)| RideRoute { ride, route })
        .collect())
}
