//! Offline route provider for development and tests.
//!
//! Loads fixture routes from a directory of JSON files and serves them as
//! if they came from the live services.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::domain::{Coordinates, RoutePath};

use super::convert::Route;
use super::error::RouteServiceError;
use super::{RouteProvider, normalize_place};

/// On-disk fixture: one route per file.
#[derive(Debug, Deserialize)]
struct RouteFixture {
    origin: String,
    destination: String,
    /// Road distance. Defaults to the great-circle length of `points`.
    #[serde(default)]
    distance_miles: Option<f64>,
    /// `[latitude, longitude]` pairs from origin to destination.
    points: Vec<[f64; 2]>,
}

impl RouteFixture {
    fn into_route(self) -> Result<Route, String> {
        let positions = self
            .points
            .iter()
            .map(|[lat, lon]| Coordinates::new(*lat, *lon))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| e.to_string())?;
        if positions.len() < 2 {
            return Err("a route needs at least two points".to_string());
        }

        let path = RoutePath::from_positions(positions);
        let distance_miles = self.distance_miles.unwrap_or_else(|| path.length_miles());

        Ok(Route {
            origin: normalize_place(&self.origin),
            destination: normalize_place(&self.destination),
            distance_miles,
            path: path.scaled_to(distance_miles),
        })
    }
}

/// Route provider serving pre-recorded routes.
///
/// Lookups are keyed by the normalized place names, so `"Chicago, IL"` and
/// `"  chicago,   il "` hit the same fixture.
#[derive(Debug, Clone)]
pub struct MockRouteClient {
    routes: Arc<HashMap<(String, String), Arc<Route>>>,
}

impl MockRouteClient {
    /// Load every `*.json` file in `dir` as a route fixture.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, RouteServiceError> {
        let dir = dir.as_ref();
        let entries = std::fs::read_dir(dir).map_err(|e| {
            RouteServiceError::Fixture(format!("failed to read {}: {e}", dir.display()))
        })?;

        let mut routes = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| RouteServiceError::Fixture(format!("directory entry: {e}")))?
                .path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let json = std::fs::read_to_string(&path).map_err(|e| {
                RouteServiceError::Fixture(format!("failed to read {}: {e}", path.display()))
            })?;
            let fixture: RouteFixture = serde_json::from_str(&json).map_err(|e| {
                RouteServiceError::Fixture(format!("failed to parse {}: {e}", path.display()))
            })?;
            let route = fixture
                .into_route()
                .map_err(|e| RouteServiceError::Fixture(format!("{}: {e}", path.display())))?;
            routes.push(route);
        }

        if routes.is_empty() {
            return Err(RouteServiceError::Fixture(format!(
                "no route fixtures found in {}",
                dir.display()
            )));
        }

        info!(count = routes.len(), dir = %dir.display(), "loaded route fixtures");
        Ok(Self::from_routes(routes))
    }

    pub fn from_routes(routes: impl IntoIterator<Item = Route>) -> Self {
        let routes = routes
            .into_iter()
            .map(|r| ((r.origin.clone(), r.destination.clone()), Arc::new(r)))
            .collect();
        Self {
            routes: Arc::new(routes),
        }
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl RouteProvider for MockRouteClient {
    async fn fetch_route(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Arc<Route>, RouteServiceError> {
        let key = (normalize_place(origin), normalize_place(destination));
        self.routes
            .get(&key)
            .cloned()
            .ok_or(RouteServiceError::NoRoute {
                origin: key.0,
                destination: key.1,
            })
    }
}
