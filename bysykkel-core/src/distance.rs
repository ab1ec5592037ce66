//! Great-circle distances between ride stations.

use geo::{Coord, Distance, Haversine, Point};

use crate::RideRecord;

/// Distance in metres between two WGS84 coordinates along a great circle.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use bysykkel_core::great_circle_distance;
///
/// let here = Coord { x: 5.32, y: 60.39 };
/// assert_eq!(great_circle_distance(here, here), 0.0);
/// ```
#[must_use]
pub fn great_circle_distance(from: Coord<f64>, to: Coord<f64>) -> f64 {
    Haversine.distance(Point::from(from), Point::from(to))
}

/// Return a copy of `rides` with `distance_meters` attached to every ride.
///
/// The input slice is left untouched and the output keeps its order.
#[must_use]
pub fn decorate_distances(rides: &[RideRecord]) -> Vec<RideRecord> {
    rides.iter().cloned().map(RideRecord::with_distance).collect()
}
