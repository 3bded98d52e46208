//! Conversion from route service DTOs to domain types.

use crate::domain::{Coordinates, RoutePath};

use super::error::RouteServiceError;
use super::polyline::{self, DEFAULT_PRECISION};
use super::types::{DirectionsResponse, GeocodeHit};

/// A driving route between two named places.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Normalized origin as requested.
    pub origin: String,
    /// Normalized destination as requested.
    pub destination: String,
    /// Road distance reported by the directions service.
    pub distance_miles: f64,
    /// Route geometry with cumulative distances scaled to `distance_miles`.
    pub path: RoutePath,
}

/// Parse a geocoder hit into a position.
pub fn coordinates_from_hit(hit: &GeocodeHit) -> Result<Coordinates, RouteServiceError> {
    let parse = |value: &str| {
        value.trim().parse::<f64>().map_err(|_| RouteServiceError::Json {
            message: format!("geocoder returned non-numeric coordinate {value:?}"),
            body: None,
        })
    };
    let lat = parse(&hit.lat)?;
    let lon = parse(&hit.lon)?;
    Coordinates::new(lat, lon).map_err(|e| RouteServiceError::Json {
        message: e.to_string(),
        body: None,
    })
}

/// Convert a directions response into a [`Route`].
///
/// Takes the first route alternative, decodes its geometry, and rescales
/// cumulative distances to the reported road distance so mile markers
/// line up with the odometer rather than the straight-line polyline.
pub fn convert_directions(
    response: DirectionsResponse,
    origin: &str,
    destination: &str,
) -> Result<Route, RouteServiceError> {
    let no_route = || RouteServiceError::NoRoute {
        origin: origin.to_string(),
        destination: destination.to_string(),
    };

    let first = response.routes.into_iter().next().ok_or_else(no_route)?;

    let pairs = polyline::decode(&first.geometry, DEFAULT_PRECISION)
        .map_err(|e| RouteServiceError::InvalidGeometry(e.to_string()))?;
    if pairs.len() < 2 {
        return Err(no_route());
    }

    let positions = pairs
        .into_iter()
        .map(|(lat, lon)| Coordinates::new(lat, lon))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| RouteServiceError::InvalidGeometry(e.to_string()))?;

    let path = RoutePath::from_positions(positions);
    let reported = first.summary.distance;
    let distance_miles = if reported.is_finite() && reported > 0.0 {
        reported
    } else {
        path.length_miles()
    };

    Ok(Route {
        origin: origin.to_string(),
        destination: destination.to_string(),
        distance_miles,
        path: path.scaled_to(distance_miles),
    })
}
