//! Route requests derived from rides, and the routes a provider returns.

use std::fmt;
use std::time::Duration;

use geo::{Coord, LineString};
use thiserror::Error;

use crate::RideRecord;

/// Which end of a ride a coordinate belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// The start station.
    Origin,
    /// The end station.
    Destination,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Origin => f.write_str("origin"),
            Self::Destination => f.write_str("destination"),
        }
    }
}

/// Errors returned by [`RouteRequest::from_ride`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RouteRequestError {
    /// A station coordinate is not a valid WGS84 position.
    #[error("{endpoint} coordinate (lon {longitude}, lat {latitude}) is out of range")]
    InvalidCoordinate {
        /// Which station carried the bad coordinate.
        endpoint: Endpoint,
        /// Reported longitude.
        longitude: f64,
        /// Reported latitude.
        latitude: f64,
    },
}

/// A request for a cycling route between two stations.
///
/// # Examples
/// ```
/// use bysykkel_core::{RouteRequest, RideRecord, Station};
/// use chrono::{TimeZone, Utc};
/// use geo::Coord;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let at = Utc.with_ymd_and_hms(2022, 6, 1, 12, 0, 0).unwrap();
/// let start = Station::new("33", "Start", "", Coord { x: 5.34, y: 60.36 });
/// let end = Station::new("132", "End", "", Coord { x: 5.31, y: 60.39 });
/// let ride = RideRecord::new(at, at, 600, start, end)?;
///
/// let request = RouteRequest::from_ride(&ride)?;
/// assert_eq!(request.origin, Coord { x: 5.34, y: 60.36 });
/// assert_eq!(request.destination, Coord { x: 5.31, y: 60.39 });
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteRequest {
    /// Where the route starts.
    pub origin: Coord<f64>,
    /// Where the route ends.
    pub destination: Coord<f64>,
}

impl RouteRequest {
    /// Build a request from the start and end stations of `ride`.
    ///
    /// # Errors
    ///
    /// Returns [`RouteRequestError::InvalidCoordinate`] when either station
    /// lies outside latitude `[-90, 90]` or longitude `[-180, 180]`, or has a
    /// non-finite component.
    pub fn from_ride(ride: &RideRecord) -> Result<Self, RouteRequestError> {
        let origin = validate(ride.start_station.location, Endpoint::Origin)?;
        let destination = validate(ride.end_station.location, Endpoint::Destination)?;
        Ok(Self {
            origin,
            destination,
        })
    }
}

fn validate(location: Coord<f64>, endpoint: Endpoint) -> Result<Coord<f64>, RouteRequestError> {
    let in_range =
        (-180.0..=180.0).contains(&location.x) && (-90.0..=90.0).contains(&location.y);
    if in_range {
        Ok(location)
    } else {
        Err(RouteRequestError::InvalidCoordinate {
            endpoint,
            longitude: location.x,
            latitude: location.y,
        })
    }
}

/// A cycling route resolved by a [`RouteProvider`](crate::RouteProvider).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CycleRoute {
    /// Path to follow, as `(longitude, latitude)` positions.
    pub geometry: LineString<f64>,
    /// Length of the path in metres.
    pub distance_meters: f64,
    /// Estimated cycling time.
    pub duration: Duration,
}

/// A selected ride paired with the route drawn for it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RideRoute {
    /// The ride as selected.
    pub ride: RideRecord,
    /// Route between its stations.
    pub route: CycleRoute,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ride_between;
    use rstest::rstest;

    #[rstest]
    fn request_uses_station_coordinates() {
        let ride = ride_between(Coord { x: 5.3, y: 60.3 }, Coord { x: 5.4, y: 60.4 });

        let request = RouteRequest::from_ride(&ride).expect("valid coordinates");

        assert_eq!(request.origin, Coord { x: 5.3, y: 60.3 });
        assert_eq!(request.destination, Coord { x: 5.4, y: 60.4 });
    }

    #[rstest]
    #[case(Coord { x: 5.3, y: 91.0 }, Coord { x: 5.4, y: 60.4 }, Endpoint::Origin)]
    #[case(Coord { x: -181.0, y: 60.0 }, Coord { x: 5.4, y: 60.4 }, Endpoint::Origin)]
    #[case(Coord { x: 5.3, y: 60.3 }, Coord { x: f64::NAN, y: 60.4 }, Endpoint::Destination)]
    #[case(Coord { x: 5.3, y: 60.3 }, Coord { x: 5.4, y: f64::INFINITY }, Endpoint::Destination)]
    fn request_rejects_invalid_coordinates(
        #[case] origin: Coord<f64>,
        #[case] destination: Coord<f64>,
        #[case] expected: Endpoint,
    ) {
        let ride = ride_between(origin, destination);

        let err = RouteRequest::from_ride(&ride).expect_err("invalid coordinate");

        let RouteRequestError::InvalidCoordinate { endpoint, .. } = err;
        assert_eq!(endpoint, expected);
    }

    #[rstest]
    #[case(Coord { x: 180.0, y: 90.0 })]
    #[case(Coord { x: -180.0, y: -90.0 })]
    fn request_accepts_boundary_coordinates(#[case] corner: Coord<f64>) {
        let ride = ride_between(corner, corner);
        assert!(RouteRequest::from_ride(&ride).is_ok());
    }

    #[rstest]
    fn error_names_the_endpoint() {
        let err = RouteRequestError::InvalidCoordinate {
            endpoint: Endpoint::Destination,
            longitude: 200.0,
            latitude: 10.0,
        };
        assert_eq!(
            err.to_string(),
            "destination coordinate (lon 200, lat 10) is out of range"
        );
    }
}
