//! Test helpers for ride selection and routing.
//!
//! Available to this crate's unit tests and, behind the `test-support`
//! feature, to downstream crates.

use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use geo::{Coord, LineString};

use crate::{
    CycleRoute, MAX_ROUTE_REQUESTS, RideRecord, RouteProvider, RouteRequest, RoutingError,
    Station, great_circle_distance,
};

/// Average cycling speed used by [`StraightLineRouteProvider`], in m/s.
pub const CYCLING_SPEED_MPS: f64 = 4.0;

const BERGEN_CENTRE: Coord<f64> = Coord { x: 5.3221, y: 60.3913 };
const NOSTETORGET: Coord<f64> = Coord {
    x: 5.314_881_116_119_068,
    y: 60.392_224_759_460_63,
};

fn ride_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2022, 6, 1, 12, 0, 0)
        .single()
        .unwrap_or(DateTime::UNIX_EPOCH)
}

/// A ride lasting `duration_seconds` that starts at a station named `station_id`.
///
/// The station id doubles as a label so tests can track rides through a
/// selection.
#[must_use]
pub fn ride_with_duration(duration_seconds: u64, station_id: &str) -> RideRecord {
    let started_at = ride_start();
    let ended_at = i64::try_from(duration_seconds)
        .ok()
        .and_then(chrono::TimeDelta::try_seconds)
        .and_then(|elapsed| started_at.checked_add_signed(elapsed))
        .unwrap_or(started_at);
    RideRecord {
        started_at,
        ended_at,
        duration_seconds,
        start_station: Station::new(station_id, station_id, "", BERGEN_CENTRE),
        end_station: Station::new("132", "Nøstetorget", "Sukkerhusbryggen", NOSTETORGET),
        distance_meters: None,
    }
}

/// A one-minute ride between two arbitrary coordinates.
///
/// The coordinates are not validated, which lets tests build rides a routing
/// service would reject.
#[must_use]
pub fn ride_between(origin: Coord<f64>, destination: Coord<f64>) -> RideRecord {
    let mut ride = ride_with_duration(60, "origin");
    ride.start_station.location = origin;
    ride.end_station.location = destination;
    ride
}

/// Deterministic [`RouteProvider`] drawing a straight line between endpoints.
///
/// Distances are great-circle distances and durations assume
/// [`CYCLING_SPEED_MPS`]. Batch limits match a real provider.
#[derive(Default, Debug, Copy, Clone)]
pub struct StraightLineRouteProvider;

impl RouteProvider for StraightLineRouteProvider {
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
        Ok(requests.iter().map(straight_line).collect())
    }
}

fn straight_line(request: &RouteRequest) -> CycleRoute {
    let distance_meters = great_circle_distance(request.origin, request.destination);
    #[expect(
        clippy::float_arithmetic,
        reason = "travel time is distance over a fixed speed"
    )]
    let seconds = distance_meters / CYCLING_SPEED_MPS;
    CycleRoute {
        geometry: LineString::from(vec![request.origin, request.destination]),
        distance_meters,
        duration: Duration::try_from_secs_f64(seconds).unwrap_or(Duration::ZERO),
    }
}
