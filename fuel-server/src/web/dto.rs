//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::planner::{RefuelPlan, RefuelStop, RouteLeg};
use crate::routing::Route;

/// Request to plan a trip. Used for both the query string and JSON body.
#[derive(Debug, Default, Deserialize)]
pub struct PlanRequest {
    #[serde(default)]
    pub origin: String,

    #[serde(default)]
    pub destination: String,
}

impl PlanRequest {
    /// Both endpoints, trimmed, or `None` if either is blank.
    pub fn endpoints(&self) -> Option<(&str, &str)> {
        let origin = self.origin.trim();
        let destination = self.destination.trim();
        if origin.is_empty() || destination.is_empty() {
            None
        } else {
            Some((origin, destination))
        }
    }
}

/// Response for a planned trip.
#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub origin: String,
    pub destination: String,

    /// Road distance in miles
    pub total_distance_miles: f64,

    pub total_gallons: f64,

    /// Dollars, rounded to cents
    pub total_cost: f64,

    /// Corridor stations the optimizer could pick from
    pub stations_considered: usize,

    /// Fuel stops in route order
    pub stops: Vec<StopResult>,

    /// Driving legs between origin, stops, and destination
    pub legs: Vec<LegResult>,

    /// Route geometry as `[latitude, longitude]` pairs
    pub route: Vec<[f64; 2]>,
}

impl PlanResponse {
    pub fn from_plan(route: &Route, plan: &RefuelPlan) -> Self {
        Self {
            origin: route.origin.clone(),
            destination: route.destination.clone(),
            total_distance_miles: round_to(plan.total_distance_miles, 2),
            total_gallons: round_to(plan.total_gallons, 3),
            total_cost: plan.total_cost_cents() as f64 / 100.0,
            stations_considered: plan.stations_considered,
            stops: plan.stops.iter().map(StopResult::from_stop).collect(),
            legs: plan.legs.iter().map(LegResult::from_leg).collect(),
            route: route
                .path
                .waypoints()
                .iter()
                .map(|wp| wp.position.to_lat_lon())
                .collect(),
        }
    }
}

/// A fuel stop in the response.
#[derive(Debug, Serialize)]
pub struct StopResult {
    pub station_id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub latitude: f64,
    pub longitude: f64,
    pub price_per_gallon: f64,

    /// Miles from the origin along the route
    pub mile_marker: f64,

    /// Miles off the route line
    pub offset_miles: f64,

    pub gallons: f64,

    /// Dollars, rounded to cents
    pub cost: f64,
}

impl StopResult {
    pub fn from_stop(stop: &RefuelStop) -> Self {
        let station = &stop.station;
        Self {
            station_id: station.id.to_string(),
            name: station.name.clone(),
            address: station.address.clone(),
            city: station.city.clone(),
            state: station.state.clone(),
            latitude: station.position.latitude(),
            longitude: station.position.longitude(),
            price_per_gallon: stop.price_per_gallon(),
            mile_marker: round_to(stop.mile_marker, 2),
            offset_miles: round_to(stop.offset_miles, 2),
            gallons: round_to(stop.gallons, 3),
            cost: round_to(stop.cost_dollars, 2),
        }
    }
}

/// A driving leg in the response.
#[derive(Debug, Serialize)]
pub struct LegResult {
    pub from_miles: f64,
    pub to_miles: f64,
    pub distance_miles: f64,
    pub gallons_used: f64,
}

impl LegResult {
    pub fn from_leg(leg: &RouteLeg) -> Self {
        Self {
            from_miles: round_to(leg.from_miles, 2),
            to_miles: round_to(leg.to_miles, 2),
            distance_miles: round_to(leg.distance_miles, 2),
            gallons_used: round_to(leg.gallons_used, 3),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Round for presentation. Totals are computed unrounded upstream.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
