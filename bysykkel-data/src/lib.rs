//! Data access for the Bysykkel longest-ride engine.
//!
//! Responsibilities:
//! - Load monthly ride exports from JSON files into
//!   [`RideRecord`](bysykkel_core::RideRecord) values ([`dataset`]).
//! - Resolve cycling routes over HTTP from a Mapbox-compatible Directions
//!   API ([`routing`]).
//!
//! Boundaries:
//! - Do not encode selection rules (they live in `bysykkel-core`).
//! - Keep blocking I/O off async executors.
//!
//! Invariants:
//! - No global mutable state; loaded datasets are plain values.

#![forbid(unsafe_code)]

pub mod dataset;
pub mod routing;

pub use dataset::{DatasetError, file_is_file, load_rides, parse_rides};
