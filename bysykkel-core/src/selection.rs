//! Pick the rides of greatest duration.
//!
//! Selection is a pure function of its inputs: the caller's slice is never
//! reordered and the records in it are never modified. The result is a new
//! `Vec` ordered longest first. Rides with equal durations keep the relative
//! order they had in the input, so repeated runs over the same data produce
//! identical output.

use std::cmp::Reverse;

use crate::RideRecord;

/// Upper bound on the number of rides a selection may return.
///
/// # Examples
/// ```
/// use bysykkel_core::RideLimit;
///
/// assert_eq!(RideLimit::DEFAULT.get(), 10);
/// assert_eq!(RideLimit::from_signed(-3).get(), 0);
/// assert_eq!(RideLimit::from_signed(4).get(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RideLimit(usize);

impl RideLimit {
    /// Number of rides selected when the caller does not say otherwise.
    pub const DEFAULT: Self = Self(10);

    /// Most rides the routing layer accepts in one batch.
    pub const ROUTING_MAX: Self = Self(crate::MAX_ROUTE_REQUESTS);

    /// Wrap a raw limit.
    #[must_use]
    pub const fn new(limit: usize) -> Self {
        Self(limit)
    }

    /// Convert a signed limit; zero and negative values select nothing.
    #[must_use]
    pub fn from_signed(limit: i64) -> Self {
        Self(usize::try_from(limit).unwrap_or(0))
    }

    /// The raw limit.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl Default for RideLimit {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<usize> for RideLimit {
    fn from(limit: usize) -> Self {
        Self::new(limit)
    }
}

/// Return up to `limit` rides with the longest `duration_seconds`.
///
/// The result has `min(limit, records.len())` entries, sorted by duration
/// from longest to shortest. Equal durations keep their input order.
///
/// # Examples
/// ```
/// use bysykkel_core::{RideLimit, select_longest_rides};
/// # use bysykkel_core::{RideRecord, Station};
/// # use chrono::{TimeZone, Utc};
/// # use geo::Coord;
/// # fn ride(duration: u64) -> RideRecord {
/// #     let at = Utc.with_ymd_and_hms(2022, 6, 1, 12, 0, 0).unwrap();
/// #     let station = Station::new("1", "Station", "", Coord { x: 5.32, y: 60.39 });
/// #     RideRecord::new(at, at, duration, station.clone(), station).unwrap()
/// # }
///
/// let rides = vec![ride(1099), ride(500), ride(1099), ride(2000)];
/// let longest = select_longest_rides(&rides, RideLimit::new(3));
///
/// let durations: Vec<u64> = longest.iter().map(|r| r.duration_seconds).collect();
/// assert_eq!(durations, vec![2000, 1099, 1099]);
/// ```
#[must_use]
pub fn select_longest_rides(records: &[RideRecord], limit: RideLimit) -> Vec<RideRecord> {
    let mut ranked: Vec<&RideRecord> = records.iter().collect();
    // `sort_by_key` is stable, which keeps ties in input order.
    ranked.sort_by_key(|ride| Reverse(ride.duration_seconds));
    ranked.into_iter().take(limit.get()).cloned().collect()
}

/// Select with [`RideLimit::DEFAULT`].
#[must_use]
pub fn select_default(records: &[RideRecord]) -> Vec<RideRecord> {
    select_longest_rides(records, RideLimit::DEFAULT)
}
