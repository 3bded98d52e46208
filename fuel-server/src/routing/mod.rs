//! Route lookup: place names in, driving geometry out.
//!
//! The live [`RouteClient`] geocodes both endpoints with Nominatim and
//! asks OpenRouteService for a driving route. [`MockRouteClient`] serves
//! recorded routes from disk so the server runs without network access.
//! Both implement [`RouteProvider`], which is what the web layer and the
//! cache are written against.

mod client;
mod convert;
mod error;
mod geocode;
mod mock;
pub mod polyline;
mod types;

use std::future::Future;
use std::sync::Arc;

pub use client::{DirectionsConfig, RouteClient};
pub use convert::{Route, convert_directions, coordinates_from_hit};
pub use error::RouteServiceError;
pub use geocode::{GeocodeClient, GeocodeConfig};
pub use mock::MockRouteClient;
pub use types::{DirectionsRequest, DirectionsResponse, DirectionsRoute, GeocodeHit, RouteSummary};

/// Something that can turn a pair of place names into a driving route.
pub trait RouteProvider: Send + Sync {
    fn fetch_route(
        &self,
        origin: &str,
        destination: &str,
    ) -> impl Future<Output = Result<Arc<Route>, RouteServiceError>> + Send;
}

/// Canonical form of a user-entered place name: trimmed, lowercased, and
/// with internal whitespace collapsed.
///
/// ```
/// use fuel_server::routing::normalize_place;
///
/// assert_eq!(normalize_place("  New   York, NY "), "new york, ny");
/// ```
pub fn normalize_place(place: &str) -> String {
    place
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
