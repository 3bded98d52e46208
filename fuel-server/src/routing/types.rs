//! Wire types for the geocoding and directions services.
//!
//! These mirror the JSON the services exchange and are converted into
//! domain types at the boundary; nothing past `convert` sees them.

use serde::{Deserialize, Serialize};

/// One Nominatim search hit. Coordinates arrive as strings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeHit {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: String,
}

/// OpenRouteService directions request body.
#[derive(Debug, Clone, Serialize)]
pub struct DirectionsRequest {
    /// `[longitude, latitude]` pairs, origin first.
    pub coordinates: Vec<[f64; 2]>,
    pub instructions: bool,
    pub geometry: bool,
    pub units: &'static str,
}

impl DirectionsRequest {
    /// Request a geometry-only route in miles between two lon/lat pairs.
    pub fn between(origin: [f64; 2], destination: [f64; 2]) -> Self {
        Self {
            coordinates: vec![origin, destination],
            instructions: false,
            geometry: true,
            units: "mi",
        }
    }
}

/// OpenRouteService directions response.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsResponse {
    #[serde(default)]
    pub routes: Vec<DirectionsRoute>,
}

/// A single route alternative.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsRoute {
    pub summary: RouteSummary,

    /// Encoded polyline, precision 5, latitude first.
    pub geometry: String,

    /// `[min_lon, min_lat, max_lon, max_lat]`
    #[serde(default)]
    pub bbox: Option<Vec<f64>>,
}

/// Totals for a route, in the requested units.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteSummary {
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub duration: f64,
}
