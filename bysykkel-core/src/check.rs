//! Verify a selection against an independently computed ranking.
//!
//! [`check_selection`] answers one question: does a list of rides contain
//! exactly the longest rides of a dataset, longest first, each of which can be
//! drawn on a map? It recomputes the expected durations by sorting the raw
//! duration values, which does not depend on how the selection was made.

use std::cmp::Reverse;

use thiserror::Error;

use crate::{RideLimit, RideRecord, RouteRequest, RouteRequestError};

/// Reasons a selection fails [`check_selection`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectionCheckError {
    /// A selected ride cannot be turned into a route request.
    #[error("selected ride {index} cannot be routed: {source}")]
    Unroutable {
        /// Position of the ride in the selection.
        index: usize,
        /// Why the request was rejected.
        #[source]
        source: RouteRequestError,
    },
    /// The selection holds the wrong number of rides.
    #[error("expected {expected} rides but the selection holds {found}")]
    LengthMismatch {
        /// `min(limit, records.len())`.
        expected: usize,
        /// Length of the selection.
        found: usize,
    },
    /// A selected ride does not have the expected duration for its rank.
    #[error("ride {index} lasts {found}s but the ride at that rank lasts {expected}s")]
    DurationMismatch {
        /// Rank at which the mismatch occurred.
        index: usize,
        /// Duration at this rank in the dataset.
        expected: u64,
        /// Duration of the selected ride.
        found: u64,
    },
}

/// The `limit` largest durations in `records`, longest first.
///
/// # Examples
/// ```
/// use bysykkel_core::{RideLimit, longest_durations};
///
/// assert!(longest_durations(&[], RideLimit::DEFAULT).is_empty());
/// ```
#[must_use]
pub fn longest_durations(records: &[RideRecord], limit: RideLimit) -> Vec<u64> {
    let mut durations: Vec<u64> = records.iter().map(|ride| ride.duration_seconds).collect();
    durations.sort_unstable_by_key(|&duration| Reverse(duration));
    durations.truncate(limit.get());
    durations
}

/// Check that `selected` holds the `limit` longest rides of `records`.
///
/// Every selected ride must map to a valid [`RouteRequest`], the selection
/// must hold `min(limit, records.len())` rides, and its durations must match
/// [`longest_durations`] rank by rank.
///
/// # Errors
///
/// Returns the first [`SelectionCheckError`] found, checking routability
/// first, then length, then durations in rank order.
pub fn check_selection(
    records: &[RideRecord],
    selected: &[RideRecord],
    limit: RideLimit,
) -> Result<(), SelectionCheckError> {
    for (index, ride) in selected.iter().enumerate() {
        RouteRequest::from_ride(ride)
            .map_err(|source| SelectionCheckError::Unroutable { index, source })?;
    }

    let expected = longest_durations(records, limit);
    if expected.len() != selected.len() {
        return Err(SelectionCheckError::LengthMismatch {
            expected: expected.len(),
            found: selected.len(),
        });
    }

    let mismatch = expected
        .iter()
        .zip(selected)
        .enumerate()
        .find(|(_, (duration, ride))| **duration != ride.duration_seconds);
    match mismatch {
        Some((index, (&duration, ride))) => Err(SelectionCheckError::DurationMismatch {
            index,
            expected: duration,
            found: ride.duration_seconds,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::select_longest_rides;
    use crate::test_support::{ride_between, ride_with_duration};
    use geo::Coord;
    use rstest::{fixture, rstest};

    #[fixture]
    fn rides() -> Vec<RideRecord> {
        vec![
            ride_with_duration(1099, "a"),
            ride_with_duration(500, "b"),
            ride_with_duration(1099, "c"),
            ride_with_duration(2000, "d"),
        ]
    }

    #[rstest]
    fn longest_durations_sorts_descending(rides: Vec<RideRecord>) {
        assert_eq!(
            longest_durations(&rides, RideLimit::new(3)),
            vec![2000, 1099, 1099]
        );
    }

    #[rstest]
    fn selector_output_passes(rides: Vec<RideRecord>) {
        let selected = select_longest_rides(&rides, RideLimit::DEFAULT);
        assert_eq!(check_selection(&rides, &selected, RideLimit::DEFAULT), Ok(()));
    }

    #[rstest]
    fn input_order_fails_on_first_wrong_rank(rides: Vec<RideRecord>) {
        let err = check_selection(&rides, &rides, RideLimit::DEFAULT)
            .expect_err("unsorted selection");

        assert_eq!(
            err,
            SelectionCheckError::DurationMismatch {
                index: 0,
                expected: 2000,
                found: 1099,
            }
        );
    }

    #[rstest]
    fn truncated_selection_fails_on_length(rides: Vec<RideRecord>) {
        let selected = select_longest_rides(&rides, RideLimit::new(2));

        let err = check_selection(&rides, &selected, RideLimit::DEFAULT)
            .expect_err("too few rides");

        assert_eq!(
            err,
            SelectionCheckError::LengthMismatch {
                expected: 4,
                found: 2
            }
        );
    }

    #[rstest]
    fn unroutable_ride_fails_first() {
        let broken = ride_between(Coord { x: 5.3, y: 95.0 }, Coord { x: 5.3, y: 60.0 });
        let records = vec![broken.clone()];

        let err = check_selection(&records, &[broken], RideLimit::DEFAULT)
            .expect_err("unroutable ride");

        assert!(matches!(err, SelectionCheckError::Unroutable { index: 0, .. }));
    }

    #[rstest]
    fn empty_dataset_with_empty_selection_passes() {
        assert_eq!(check_selection(&[], &[], RideLimit::DEFAULT), Ok(()));
    }
}
