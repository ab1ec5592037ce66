//! Directions API response types.
//!
//! Deserialisation types for the Mapbox Directions API (v5), which shares its
//! response shape with the OSRM route service. Only the fields needed to draw
//! a route are decoded.
//!
//! See: <https://docs.mapbox.com/api/navigation/directions/>

use serde::Deserialize;

/// Directions API response.
///
/// The response contains routes on success or a message on failure. The
/// `code` field indicates the response status.
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    /// Status code from the service.
    ///
    /// Common values:
    /// - `"Ok"` - Request was successful
    /// - `"NoRoute"` - No route between the coordinates
    /// - `"NoSegment"` - A coordinate could not be snapped to the network
    /// - `"InvalidInput"` - Invalid query parameters
    #[serde(default)]
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Candidate routes, best first.
    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,
}

impl DirectionsResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }
}

/// One route candidate.
#[derive(Debug, Deserialize)]
pub struct DirectionsRoute {
    /// Route path, requested with `geometries=geojson`.
    pub geometry: GeoJsonLineString,
    /// Length in metres.
    pub distance: f64,
    /// Estimated travel time in seconds.
    pub duration: f64,
}

/// GeoJSON `LineString` geometry.
#[derive(Debug, Deserialize)]
pub struct GeoJsonLineString {
    /// Positions as `[longitude, latitude]` pairs.
    pub coordinates: Vec<[f64; 2]>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialise_success_response() {
        let json = r#"{
            "code": "Ok",
            "routes": [{
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[5.349, 60.369], [5.33, 60.38], [5.315, 60.392]]
                },
                "distance": 3420.7,
                "duration": 812.4,
                "weight": 900.1
            }],
            "waypoints": []
        }"#;

        let response: DirectionsResponse =
            serde_json::from_str(json).expect("should deserialise");

        assert!(response.is_ok());
        assert!(response.message.is_none());
        assert_eq!(response.routes.len(), 1);
        let route = &response.routes[0];
        assert_eq!(route.geometry.coordinates.len(), 3);
        assert_eq!(route.geometry.coordinates[0], [5.349, 60.369]);
        assert_eq!(route.distance, 3420.7);
        assert_eq!(route.duration, 812.4);
    }

    #[test]
    fn deserialise_error_response() {
        let json = r#"{
            "code": "NoSegment",
            "message": "No suitable edges near location"
        }"#;

        let response: DirectionsResponse =
            serde_json::from_str(json).expect("should deserialise");

        assert!(!response.is_ok());
        assert_eq!(
            response.message,
            Some("No suitable edges near location".to_string())
        );
        assert!(response.routes.is_empty());
    }

    #[test]
    fn deserialise_message_without_code() {
        let json = r#"{ "message": "Not Authorized - Invalid Token" }"#;

        let response: DirectionsResponse =
            serde_json::from_str(json).expect("should deserialise");

        assert!(!response.is_ok());
        assert_eq!(response.code, "");
    }
}
