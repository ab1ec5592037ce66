use thiserror::Error;

use crate::RouteRequestError;

/// Errors from [`crate::routing::RouteProvider::get_routes`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// No route requests were provided.
    #[error("at least one route request is required")]
    EmptyInput,
    /// More requests than the routing service allows in one batch.
    #[error("{requested} route requests exceed the limit of {limit} per batch")]
    TooManyRequests {
        /// Number of requests passed in.
        requested: usize,
        /// Largest batch the provider accepts.
        limit: usize,
    },
    /// The service could not be reached.
    #[error("network error calling {url}: {message}")]
    NetworkError {
        /// Request URL without query parameters.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The service did not answer in time.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL without query parameters.
        url: String,
        /// Configured timeout.
        timeout_secs: u64,
    },
    /// The service answered with a non-success HTTP status.
    #[error("HTTP {status} from {url}: {message}")]
    HttpError {
        /// Request URL without query parameters.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The service reported a routing failure in its response body.
    #[error("routing service returned {code}: {message}")]
    ServiceError {
        /// Service status code, e.g. `"NoSegment"`.
        code: String,
        /// Service message, possibly empty.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to parse routing response: {message}")]
    ParseError {
        /// Decoder error description.
        message: String,
    },
    /// The service answered successfully but without any route.
    #[error("no route found between the requested coordinates")]
    NoRoute,
}

/// Errors from [`crate::routing::route_rides`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RideRoutingError {
    /// A ride could not be turned into a route request.
    #[error("ride {index} cannot be routed: {source}")]
    InvalidRide {
        /// Position of the ride in the batch.
        index: usize,
        /// Why the request was rejected.
        #[source]
        source: RouteRequestError,
    },
    /// The provider rejected or failed the batch.
    #[error(transparent)]
    Routing(#[from] RoutingError),
    /// The provider returned a different number of routes than requested.
    #[error("expected {expected} routes but the provider returned {found}")]
    RouteCountMismatch {
        /// Number of requests sent.
        expected: usize,
        /// Number of routes received.
        found: usize,
    },
}
