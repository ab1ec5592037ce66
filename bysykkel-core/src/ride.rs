//! Completed bike-share rentals and the stations they connect.

use chrono::{DateTime, Utc};
use geo::Coord;
use thiserror::Error;

/// A docking station at either end of a ride.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use bysykkel_core::Station;
///
/// let station = Station::new(
///     "33",
///     "Høgskulen på Vestlandet",
///     "Ved hovedinngang til skolen",
///     Coord { x: 5.349_443, y: 60.369_179 },
/// );
///
/// assert_eq!(station.id, "33");
/// assert_eq!(station.location.y, 60.369_179);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Station {
    /// Operator-assigned station identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-text description of where the station sits.
    pub description: String,
    /// Geographic position of the station.
    pub location: Coord<f64>,
}

impl Station {
    /// Construct a station from its parts.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        location: Coord<f64>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            location,
        }
    }
}

/// One completed bike rental.
///
/// `duration_seconds` is authoritative. It normally equals
/// `ended_at - started_at`, but nothing in this crate recomputes it.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use geo::Coord;
/// use bysykkel_core::{RideRecord, Station};
///
/// # fn main() -> Result<(), bysykkel_core::RideRecordError> {
/// let start = Station::new("33", "Start", "", Coord { x: 5.34, y: 60.36 });
/// let end = Station::new("132", "End", "", Coord { x: 5.31, y: 60.39 });
/// let started_at = Utc.with_ymd_and_hms(2022, 1, 1, 4, 1, 22).unwrap();
/// let ended_at = Utc.with_ymd_and_hms(2022, 1, 1, 4, 19, 41).unwrap();
///
/// let ride = RideRecord::new(started_at, ended_at, 1099, start, end)?;
/// assert_eq!(ride.duration_seconds, 1099);
/// assert!(ride.distance_meters.is_none());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RideRecord {
    /// When the bike left the start station.
    pub started_at: DateTime<Utc>,
    /// When the bike was docked at the end station.
    pub ended_at: DateTime<Utc>,
    /// Length of the rental in whole seconds.
    pub duration_seconds: u64,
    /// Station the ride started from.
    pub start_station: Station,
    /// Station the ride ended at.
    pub end_station: Station,
    /// Great-circle distance between the two stations, when computed.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub distance_meters: Option<f64>,
}

/// Errors returned by [`RideRecord::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RideRecordError {
    /// The ride ended before it started.
    #[error("ride ended at {ended_at} before it started at {started_at}")]
    EndsBeforeStart {
        /// Reported start time.
        started_at: DateTime<Utc>,
        /// Reported end time.
        ended_at: DateTime<Utc>,
    },
}

impl RideRecord {
    /// Validate the timestamps and construct a ride without a distance.
    ///
    /// # Errors
    ///
    /// Returns [`RideRecordError::EndsBeforeStart`] when `ended_at` precedes
    /// `started_at`.
    pub fn new(
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
        duration_seconds: u64,
        start_station: Station,
        end_station: Station,
    ) -> Result<Self, RideRecordError> {
        if ended_at < started_at {
            return Err(RideRecordError::EndsBeforeStart {
                started_at,
                ended_at,
            });
        }
        Ok(Self {
            started_at,
            ended_at,
            duration_seconds,
            start_station,
            end_station,
            distance_meters: None,
        })
    }

    /// Return a copy of this ride with `distance_meters` filled in.
    #[must_use]
    pub fn with_distance(self) -> Self {
        let distance = crate::great_circle_distance(
            self.start_station.location,
            self.end_station.location,
        );
        Self {
            distance_meters: Some(distance),
            ..self
        }
    }
}
