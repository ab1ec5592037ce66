//! Ride builders shared by the integration tests.

use bysykkel_core::{RideRecord, Station};
use chrono::{TimeDelta, TimeZone, Utc};
use geo::Coord;

/// A ride of `duration_seconds` tagged with `label` as its start station id.
pub fn ride(duration_seconds: u64, label: &str) -> RideRecord {
    let started_at = Utc
        .with_ymd_and_hms(2022, 6, 14, 8, 30, 0)
        .single()
        .expect("valid start time");
    let elapsed = TimeDelta::try_seconds(i64::try_from(duration_seconds).expect("fits i64"))
        .expect("duration in range");
    let start = Station::new(label, label, "", Coord { x: 5.3242, y: 60.3929 });
    let end = Station::new("6", "Torgallmenningen", "", Coord { x: 5.3237, y: 60.3925 });
    RideRecord::new(started_at, started_at + elapsed, duration_seconds, start, end)
        .expect("valid ride")
}

/// Rides with the given durations, labelled by their input position.
pub fn rides_with_durations(durations: &[u64]) -> Vec<RideRecord> {
    durations
        .iter()
        .enumerate()
        .map(|(index, &duration)| ride(duration, &index.to_string()))
        .collect()
}

/// Input positions of `rides`, recovered from their labels.
pub fn input_positions(rides: &[RideRecord]) -> Vec<usize> {
    rides
        .iter()
        .map(|ride| ride.start_station.id.parse().expect("numeric label"))
        .collect()
}
