//! Optimal refuelling planner.
//!
//! Given a route and a snapshot of priced fuel stations, chooses where to
//! stop and how much to buy so the trip costs as little as possible
//! without ever exceeding the vehicle's range.
//!
//! The pipeline works on a single axis, miles from the origin:
//! stations are projected onto the route, sorted and checked for gaps
//! longer than a full tank, then a greedy pass decides purchases.

mod assemble;
mod config;
mod error;
mod optimize;
mod plan;
mod project;
mod reach;


pub use assemble::{RefuelPlan, RefuelStop, RouteLeg, assemble};
pub use config::{
    DEFAULT_CORRIDOR_WIDTH_MILES, DEFAULT_MAX_RANGE_MILES, DEFAULT_MILES_PER_GALLON,
    PlannerConfig, VehicleProfile,
};
pub use error::PlanError;
pub use optimize::{Purchase, optimize};
pub use plan::Planner;
pub use project::{ProjectedStation, nearest_point, project};
pub use reach::{RouteStations, filter_feasible, station_order};
