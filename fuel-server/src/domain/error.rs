//! Domain error types.
//!
//! These errors represent validation failures when constructing domain
//! values. They are distinct from planning, catalog, and API errors.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Latitude or longitude out of range or not finite
    #[error("invalid coordinates: ({latitude}, {longitude})")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    /// Price must be a positive finite number
    #[error("invalid price per gallon: {0}")]
    InvalidPrice(f64),

    /// Station identifier is blank
    #[error("station id must not be empty")]
    EmptyStationId,

    /// A route's first waypoint is not at mile 0
    #[error("route must start at mile 0, first waypoint is at {0}")]
    RouteNotAnchored(f64),

    /// Cumulative distances along a route went backwards
    #[error("route distance decreases at waypoint {index}: {previous} -> {current}")]
    NonMonotonicRoute {
        index: usize,
        previous: f64,
        current: f64,
    },
}
