//! The planning pipeline: project → filter → verdict → optimize → assemble.

use tracing::debug;

use crate::domain::{FuelStation, RoutePath};

use super::assemble::{RefuelPlan, assemble};
use super::config::PlannerConfig;
use super::error::PlanError;
use super::optimize::optimize;
use super::project::project;
use super::reach::filter_feasible;

/// Refuel planner over a fixed configuration.
///
/// Pure and synchronous: the route and station snapshot are already in
/// memory, so a planner can be called any number of times, from any
/// number of requests, without coordination.
pub struct Planner<'a> {
    config: &'a PlannerConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(config: &'a PlannerConfig) -> Self {
        Self { config }
    }

    /// Compute the cheapest refuelling plan for `route` using `stations`.
    pub fn plan(
        &self,
        route: &RoutePath,
        stations: &[FuelStation],
    ) -> Result<RefuelPlan, PlanError> {
        let vehicle = &self.config.vehicle;
        vehicle.validate()?;

        let length = route.length_miles();
        if route.len() < 2 || length <= 0.0 {
            return Err(PlanError::EmptyRoute);
        }

        let projected = project(route, stations, self.config.corridor_width_miles);
        debug!(
            catalog = stations.len(),
            on_corridor = projected.len(),
            route_miles = length,
            "projected stations"
        );

        let route_stations = filter_feasible(projected, length);
        route_stations.check_gaps(vehicle.max_range_miles)?;

        let purchases = optimize(
            &route_stations.stations,
            route_stations.destination_miles,
            vehicle,
        )?;

        let plan = assemble(&purchases, &route_stations, vehicle);
        debug!(
            stops = plan.stops.len(),
            total_cost = plan.total_cost_dollars,
            "plan assembled"
        );
        Ok(plan)
    }
}
