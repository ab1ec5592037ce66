//! Load monthly ride exports.
//!
//! Bergen Bysykkel publishes one JSON file per month. Each file is an array
//! of flat objects, one per completed ride:
//!
//! ```json
//! {
//!   "started_at": "2022-01-01 04:01:22.287000+00:00",
//!   "ended_at": "2022-01-01 04:19:41.611000+00:00",
//!   "duration": 1099,
//!   "start_station_id": "33",
//!   "start_station_name": "Høgskulen på Vestlandet",
//!   "start_station_description": "Ved hovedinngang til skolen",
//!   "start_station_latitude": 60.369179844976586,
//!   "start_station_longitude": 5.349443793165847,
//!   "end_station_id": "132",
//!   "end_station_name": "Nøstetorget",
//!   "end_station_description": "Sukkerhusbryggen",
//!   "end_station_latitude": 60.39222475946063,
//!   "end_station_longitude": 5.314881116119068
//! }
//! ```
//!
//! An optional `distance` key (metres) is carried over when present.

use std::io::{self, BufReader, Read};

use bysykkel_core::{RideRecord, RideRecordError, Station};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use chrono::{DateTime, Utc};
use geo::Coord;
use log::debug;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Errors returned when loading a ride dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The dataset file could not be opened.
    #[error("failed to open ride dataset at {path:?}: {source}")]
    Open {
        /// Path that was requested.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The file is not valid JSON.
    #[error("failed to decode ride dataset: {source}")]
    Decode {
        /// Decoder failure.
        #[source]
        source: serde_json::Error,
    },
    /// The document is valid JSON but not an array of rides.
    #[error("ride dataset must be a JSON array, found {found}")]
    NotASequence {
        /// Kind of JSON value found instead.
        found: &'static str,
    },
    /// An array element does not have the shape of a ride.
    #[error("ride {index} is malformed: {source}")]
    MalformedRide {
        /// Position of the element in the array.
        index: usize,
        /// Decoder failure.
        #[source]
        source: serde_json::Error,
    },
    /// An array element decodes but describes an impossible ride.
    #[error("ride {index} is invalid: {source}")]
    InvalidRide {
        /// Position of the element in the array.
        index: usize,
        /// Validation failure.
        #[source]
        source: RideRecordError,
    },
}

/// One ride as it appears in the export.
#[derive(Debug, Deserialize)]
struct RawRide {
    started_at: DateTime<Utc>,
    ended_at: DateTime<Utc>,
    duration: u64,
    start_station_id: String,
    start_station_name: String,
    #[serde(default)]
    start_station_description: Option<String>,
    start_station_latitude: f64,
    start_station_longitude: f64,
    end_station_id: String,
    end_station_name: String,
    #[serde(default)]
    end_station_description: Option<String>,
    end_station_latitude: f64,
    end_station_longitude: f64,
    #[serde(default)]
    distance: Option<f64>,
}

impl RawRide {
    fn into_ride(self) -> Result<RideRecord, RideRecordError> {
        let start = Station::new(
            self.start_station_id,
            self.start_station_name,
            self.start_station_description.unwrap_or_default(),
            Coord {
                x: self.start_station_longitude,
                y: self.start_station_latitude,
            },
        );
        let end = Station::new(
            self.end_station_id,
            self.end_station_name,
            self.end_station_description.unwrap_or_default(),
            Coord {
                x: self.end_station_longitude,
                y: self.end_station_latitude,
            },
        );
        let ride = RideRecord::new(self.started_at, self.ended_at, self.duration, start, end)?;
        Ok(RideRecord {
            distance_meters: self.distance,
            ..ride
        })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Decode a ride export from `reader`.
///
/// # Errors
///
/// Returns [`DatasetError::Decode`] for invalid JSON,
/// [`DatasetError::NotASequence`] when the document is not an array, and
/// [`DatasetError::MalformedRide`] or [`DatasetError::InvalidRide`] for the
/// first bad element. No partial result is returned.
///
/// # Examples
/// ```
/// use bysykkel_data::{DatasetError, parse_rides};
///
/// let rides = parse_rides("[]".as_bytes())?;
/// assert!(rides.is_empty());
///
/// let err = parse_rides("{}".as_bytes()).unwrap_err();
/// assert!(matches!(err, DatasetError::NotASequence { found: "an object" }));
/// # Ok::<(), DatasetError>(())
/// ```
pub fn parse_rides<R: Read>(reader: R) -> Result<Vec<RideRecord>, DatasetError> {
    let document: Value =
        serde_json::from_reader(reader).map_err(|source| DatasetError::Decode { source })?;
    let entries = match document {
        Value::Array(entries) => entries,
        other => {
            return Err(DatasetError::NotASequence {
                found: json_kind(&other),
            });
        }
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let raw: RawRide = serde_json::from_value(entry)
                .map_err(|source| DatasetError::MalformedRide { index, source })?;
            raw.into_ride()
                .map_err(|source| DatasetError::InvalidRide { index, source })
        })
        .collect()
}

/// Load the ride export stored at `path`.
///
/// # Errors
///
/// Returns [`DatasetError::Open`] when the file cannot be opened, otherwise
/// the errors of [`parse_rides`].
pub fn load_rides(path: &Utf8Path) -> Result<Vec<RideRecord>, DatasetError> {
    let file = fs_utf8::File::open_ambient(path, ambient_authority()).map_err(|source| {
        DatasetError::Open {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let rides = parse_rides(BufReader::new(file))?;
    debug!("loaded {} rides from {path}", rides.len());
    Ok(rides)
}

/// Return whether a path exists and is a regular file using capability-based IO.
///
/// # Errors
///
/// Propagates I/O failures, including [`io::ErrorKind::NotFound`] when the
/// path or its parent directory does not exist.
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other("path should include a file name"))?;
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.metadata(file_name).map(|meta| meta.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    const SAMPLE_RIDE: &str = r#"{
        "started_at": "2022-01-01 04:01:22.287000+00:00",
        "ended_at": "2022-01-01 04:19:41.611000+00:00",
        "duration": 1099,
        "start_station_id": "33",
        "start_station_name": "Høgskulen på Vestlandet",
        "start_station_description": "Ved hovedinngang til skolen",
        "start_station_latitude": 60.369179844976586,
        "start_station_longitude": 5.349443793165847,
        "end_station_id": "132",
        "end_station_name": "Nøstetorget",
        "end_station_description": "Sukkerhusbryggen",
        "end_station_latitude": 60.39222475946063,
        "end_station_longitude": 5.314881116119068
    }"#;

    fn utf8_root(tmp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace")
    }

    #[rstest]
    fn parses_export_record() {
        let json = format!("[{SAMPLE_RIDE}]");

        let rides = parse_rides(json.as_bytes()).expect("sample should parse");

        assert_eq!(rides.len(), 1);
        let ride = &rides[0];
        assert_eq!(ride.duration_seconds, 1099);
        assert_eq!(ride.start_station.id, "33");
        assert_eq!(ride.start_station.description, "Ved hovedinngang til skolen");
        assert_eq!(ride.start_station.location.x, 5.349_443_793_165_847);
        assert_eq!(ride.start_station.location.y, 60.369_179_844_976_586);
        assert_eq!(ride.end_station.name, "Nøstetorget");
        assert_eq!(ride.started_at.to_rfc3339(), "2022-01-01T04:01:22.287+00:00");
        assert!(ride.distance_meters.is_none());
    }

    #[rstest]
    fn carries_precomputed_distance() {
        let json = format!(
            "[{}]",
            SAMPLE_RIDE.replacen("\"duration\": 1099,", "\"duration\": 1099, \"distance\": 3190.5,", 1)
        );

        let rides = parse_rides(json.as_bytes()).expect("sample should parse");

        assert_eq!(rides[0].distance_meters, Some(3190.5));
    }

    #[rstest]
    fn missing_description_defaults_to_empty() {
        let json = format!(
            "[{}]",
            SAMPLE_RIDE.replacen(
                "\"end_station_description\": \"Sukkerhusbryggen\",",
                "\"end_station_description\": null,",
                1
            )
        );

        let rides = parse_rides(json.as_bytes()).expect("null description is accepted");

        assert_eq!(rides[0].end_station.description, "");
    }

    #[rstest]
    #[case("{}", "an object")]
    #[case("null", "null")]
    #[case("42", "a number")]
    #[case("\"rides\"", "a string")]
    fn rejects_non_array_documents(#[case] json: &str, #[case] expected: &'static str) {
        let err = parse_rides(json.as_bytes()).expect_err("not a sequence");

        match err {
            DatasetError::NotASequence { found } => assert_eq!(found, expected),
            other => panic!("expected NotASequence, found {other:?}"),
        }
    }

    #[rstest]
    fn rejects_invalid_json() {
        let err = parse_rides("[ not json".as_bytes()).expect_err("invalid json");
        assert!(matches!(err, DatasetError::Decode { .. }));
    }

    #[rstest]
    fn reports_index_of_malformed_ride() {
        let json = format!("[{SAMPLE_RIDE}, {{\"duration\": -5}}]");

        let err = parse_rides(json.as_bytes()).expect_err("malformed ride");

        assert!(matches!(err, DatasetError::MalformedRide { index: 1, .. }));
    }

    #[rstest]
    fn reports_ride_ending_before_start() {
        let json = format!(
            "[{}]",
            SAMPLE_RIDE.replacen(
                "\"ended_at\": \"2022-01-01 04:19:41.611000+00:00\"",
                "\"ended_at\": \"2022-01-01 03:00:00+00:00\"",
                1
            )
        );

        let err = parse_rides(json.as_bytes()).expect_err("invalid ride");

        assert!(matches!(err, DatasetError::InvalidRide { index: 0, .. }));
    }

    #[rstest]
    fn load_rides_reads_file() {
        let tmp = TempDir::new().expect("tempdir");
        let path = utf8_root(&tmp).join("06.json");
        std::fs::write(&path, format!("[{SAMPLE_RIDE}, {SAMPLE_RIDE}]")).expect("write dataset");

        let rides = load_rides(&path).expect("dataset should load");

        assert_eq!(rides.len(), 2);
    }

    #[rstest]
    fn load_rides_reports_missing_file() {
        let tmp = TempDir::new().expect("tempdir");
        let path = utf8_root(&tmp).join("missing.json");

        let err = load_rides(&path).expect_err("missing file");

        match err {
            DatasetError::Open { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("expected Open, found {other:?}"),
        }
    }

    #[rstest]
    fn file_is_file_distinguishes_directories() {
        let tmp = TempDir::new().expect("tempdir");
        let root = utf8_root(&tmp);
        let file = root.join("06.json");
        std::fs::write(&file, "[]").expect("write dataset");

        let nested = root.join("nested");
        std::fs::create_dir(&nested).expect("create directory");

        assert!(file_is_file(&file).expect("file metadata"));
        assert!(!file_is_file(&nested).expect("directory metadata"));

        let err = file_is_file(&root.join("missing.json")).expect_err("missing path");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
