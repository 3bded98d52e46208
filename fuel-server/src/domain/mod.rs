//! Domain types for the fuel route planner.
//!
//! This module contains the core domain model types: validated
//! positions, priced stations, and distance-annotated route paths. All
//! types enforce their invariants at construction time, so code that
//! receives these types can trust their validity.

mod coords;
mod error;
mod route;
mod station;

pub use coords::{Coordinates, METERS_PER_MILE, haversine_miles, point_miles};
pub use error::DomainError;
pub use route::{RoutePath, Waypoint, pad_rect};
pub use station::{FuelStation, StationId};
