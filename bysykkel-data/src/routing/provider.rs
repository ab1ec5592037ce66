//! HTTP-based `RouteProvider` using a Directions API.
//!
//! This module provides [`HttpRouteProvider`], an implementation of the
//! [`RouteProvider`] trait that fetches cycling routes from a Mapbox-compatible
//! Directions service via HTTP.
//!
//! # Architecture
//!
//! The [`RouteProvider`] trait is synchronous to keep the core library
//! embeddable in synchronous contexts. This provider bridges the async HTTP
//! calls to the sync interface by blocking on a Tokio runtime internally.
//! Within one batch every request is in flight at the same time.
//!
//! # Example
//!
//! ```no_run
//! use bysykkel_data::routing::HttpRouteProvider;
//! use bysykkel_core::{RouteProvider, RouteRequest};
//! use geo::Coord;
//!
//! let provider = HttpRouteProvider::new("http://localhost:5000")?;
//! let request = RouteRequest {
//!     origin: Coord { x: 5.349, y: 60.369 },
//!     destination: Coord { x: 5.315, y: 60.392 },
//! };
//!
//! let routes = provider.get_routes(&[request])?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::time::Duration;

use bysykkel_core::{CycleRoute, MAX_ROUTE_REQUESTS, RouteProvider, RouteRequest, RoutingError};
use futures_util::future::try_join_all;
use geo::LineString;
use log::debug;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

use super::directions::DirectionsResponse;

/// Error type for [`HttpRouteProvider`] construction failures.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Default user agent for Directions requests.
pub const DEFAULT_USER_AGENT: &str = "bysykkel-routing/0.1";

/// Default Directions service.
pub const DEFAULT_BASE_URL: &str = "https://api.mapbox.com";

/// Default routing profile.
pub const DEFAULT_PROFILE: &str = "mapbox/cycling";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`HttpRouteProvider`].
#[derive(Clone)]
pub struct HttpRouteProviderConfig {
    /// Base URL for the Directions service (e.g., `"https://api.mapbox.com"`).
    pub base_url: String,
    /// Routing profile path segment, e.g. `"mapbox/cycling"`.
    pub profile: String,
    /// Access token appended as the `access_token` query parameter.
    pub access_token: Option<String>,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl std::fmt::Debug for HttpRouteProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRouteProviderConfig")
            .field("base_url", &self.base_url)
            .field("profile", &self.profile)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Default for HttpRouteProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            profile: DEFAULT_PROFILE.to_owned(),
            access_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpRouteProviderConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the routing profile.
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Set the access token.
    #[must_use]
    pub fn with_access_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = Some(access_token.into());
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// HTTP-based route provider using a Directions API.
///
/// This provider implements the synchronous [`RouteProvider`] trait by
/// internally blocking on asynchronous HTTP requests. It owns a Tokio runtime
/// that is reused across calls.
///
/// # Runtime behaviour
///
/// When called from outside any Tokio runtime, the provider uses its own
/// stored runtime. When called from within an existing multi-threaded Tokio
/// runtime (detected via [`Handle::try_current()`] and
/// [`RuntimeFlavor::MultiThread`]), it uses that runtime's handle with
/// [`tokio::task::block_in_place`] to avoid nested runtime panics. Inside a
/// `current_thread` runtime it falls back to its own runtime.
///
/// # Batches
///
/// One Directions call is made per request, all of them concurrently. The
/// first route of each response is used. If any call fails, the batch fails
/// with that error and no routes are returned.
pub struct HttpRouteProvider {
    client: Client,
    config: HttpRouteProviderConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for HttpRouteProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRouteProvider")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl HttpRouteProvider {
    /// Create a new provider with default configuration.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL for the Directions service
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpRouteProviderConfig::new(base_url))
    }

    /// Create a new provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: HttpRouteProviderConfig) -> Result<Self, ProviderBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    /// Build the Directions URL for one request, without query parameters.
    ///
    /// The URL format is: `{base_url}/directions/v5/{profile}/{coordinates}`
    /// where coordinates are two semicolon-separated `lon,lat` pairs.
    fn build_directions_url(&self, request: &RouteRequest) -> String {
        format!(
            "{}/directions/v5/{}/{},{};{},{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile.trim_matches('/'),
            request.origin.x,
            request.origin.y,
            request.destination.x,
            request.destination.y,
        )
    }

    /// Query parameters sent with every request.
    fn query_params(&self) -> Vec<(&'static str, &str)> {
        let mut params = vec![("geometries", "geojson"), ("overview", "full")];
        if let Some(token) = &self.config.access_token {
            params.push(("access_token", token.as_str()));
        }
        params
    }

    /// Fetch the route for one request asynchronously.
    async fn fetch_route_async(&self, request: &RouteRequest) -> Result<CycleRoute, RoutingError> {
        let url = self.build_directions_url(request);

        let response = self
            .client
            .get(&url)
            .query(&self.query_params())
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(err, &url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RoutingError::HttpError {
                url,
                status: status.as_u16(),
                message: http_error_message(status, &body),
            });
        }

        let directions: DirectionsResponse =
            response
                .json()
                .await
                .map_err(|err| RoutingError::ParseError {
                    message: err.without_url().to_string(),
                })?;

        convert_response(directions)
    }

    /// Fetch all routes concurrently, failing on the first error.
    async fn fetch_routes_async(
        &self,
        requests: &[RouteRequest],
    ) -> Result<Vec<CycleRoute>, RoutingError> {
        debug!("requesting {} cycling routes", requests.len());
        try_join_all(
            requests
                .iter()
                .map(|request| self.fetch_route_async(request)),
        )
        .await
    }

    /// Convert a reqwest error to a `RoutingError`.
    ///
    /// The URL is dropped from the message so access tokens in the query
    /// string never reach logs or terminals.
    fn convert_reqwest_error(&self, error: reqwest::Error, url: &str) -> RoutingError {
        if error.is_timeout() {
            return RoutingError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return RoutingError::HttpError {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.without_url().to_string(),
            };
        }

        RoutingError::NetworkError {
            url: url.to_owned(),
            message: error.without_url().to_string(),
        }
    }
}

/// Describe a non-success status, preferring the service's own `message`.
fn http_error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<DirectionsResponse>(body)
        .ok()
        .and_then(|response| response.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| status.to_string())
}

/// Convert a Directions response to the first route it offers.
fn convert_response(response: DirectionsResponse) -> Result<CycleRoute, RoutingError> {
    if !response.is_ok() {
        return Err(RoutingError::ServiceError {
            code: response.code,
            message: response.message.unwrap_or_default(),
        });
    }

    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or(RoutingError::NoRoute)?;

    if !(route.distance.is_finite() && route.distance >= 0.0) {
        return Err(RoutingError::ParseError {
            message: format!("invalid route distance {}", route.distance),
        });
    }
    let duration =
        Duration::try_from_secs_f64(route.duration).map_err(|_| RoutingError::ParseError {
            message: format!("invalid route duration {}", route.duration),
        })?;

    Ok(CycleRoute {
        geometry: LineString::from(route.geometry.coordinates),
        distance_meters: route.distance,
        duration,
    })
}

impl RouteProvider for HttpRouteProvider {
    /// Fetch one route per request.
    ///
    /// # Runtime requirements
    ///
    /// When called from within an existing Tokio runtime, the runtime must be
    /// multi-threaded (`flavor = "multi_thread"`). If called from within a
    /// `current_thread` runtime, the method falls back to using its own
    /// internal runtime, which may block the caller's runtime.
    fn get_routes(&self, requests: &[RouteRequest]) -> Result<Vec<CycleRoute>, RoutingError> {
        if requests.is_empty() {
            return Err(RoutingError::EmptyInput);
        }
        if requests.len() > MAX_ROUTE_REQUESTS {
            return Err(RoutingError::TooManyRequests {
                requested: requests.len(),
                limit: MAX_ROUTE_REQUESTS,
            });
        }

        let future = self.fetch_routes_async(requests);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            // No runtime detected, or current_thread runtime: use our own runtime.
            _ => self.runtime.block_on(future),
        }
    }
}
