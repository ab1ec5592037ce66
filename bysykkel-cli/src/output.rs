//! JSON shapes printed by the CLI.

use std::io::Write;

use bysykkel_core::{RideRecord, RideRoute};
use serde::{Deserialize, Serialize};

use crate::CliError;

/// A cycling route with its geometry as `[longitude, latitude]` pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct RouteOutput {
    pub(crate) coordinates: Vec<[f64; 2]>,
    pub(crate) distance_meters: f64,
    pub(crate) duration_seconds: f64,
}

/// A selected ride paired with its route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct RideRouteOutput {
    pub(crate) ride: RideRecord,
    pub(crate) route: RouteOutput,
}

impl From<RideRoute> for RideRouteOutput {
    fn from(value: RideRoute) -> Self {
        let RideRoute { ride, route } = value;
        Self {
            ride,
            route: RouteOutput {
                coordinates: route.geometry.0.iter().map(|coord| [coord.x, coord.y]).collect(),
                distance_meters: route.distance_meters,
                duration_seconds: route.duration.as_secs_f64(),
            },
        }
    }
}

/// Summary printed by `check` when the selection holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct CheckSummary {
    pub(crate) rides: usize,
    pub(crate) selected: usize,
    pub(crate) longest_duration_seconds: Option<u64>,
}

/// Write `value` as pretty JSON followed by a newline.
pub(crate) fn write_json<T: Serialize>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
