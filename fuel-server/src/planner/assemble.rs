//! Turning optimizer purchases into a presentable itinerary.

use crate::domain::FuelStation;

use super::config::VehicleProfile;
use super::optimize::Purchase;
use super::reach::RouteStations;

/// A fuel stop in the final plan.
#[derive(Debug, Clone, PartialEq)]
pub struct RefuelStop {
    pub station: FuelStation,

    /// Distance from the origin along the route.
    pub mile_marker: f64,

    /// How far the station sits off the route line.
    pub offset_miles: f64,

    /// Range left on arrival.
    pub range_on_arrival_miles: f64,

    /// Fuel bought here.
    pub gallons: f64,

    /// `gallons * price`, unrounded.
    pub cost_dollars: f64,
}

impl RefuelStop {
    pub fn price_per_gallon(&self) -> f64 {
        self.station.price_per_gallon()
    }
}

/// A stretch of driving between consecutive plan nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteLeg {
    pub from_miles: f64,
    pub to_miles: f64,
    pub distance_miles: f64,
    pub gallons_used: f64,
}

/// The planner's output.
///
/// Built fresh per request and never mutated afterwards. Money stays
/// unrounded; use [`RefuelPlan::total_cost_cents`] for presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct RefuelPlan {
    /// Stops in route order.
    pub stops: Vec<RefuelStop>,

    /// Origin → stops → destination.
    pub legs: Vec<RouteLeg>,

    pub total_distance_miles: f64,
    pub total_gallons: f64,
    pub total_cost_dollars: f64,

    /// Stations on the corridor that the optimizer could choose from.
    pub stations_considered: usize,
}

impl RefuelPlan {
    /// Total cost rounded to whole cents.
    pub fn total_cost_cents(&self) -> i64 {
        (self.total_cost_dollars * 100.0).round() as i64
    }

    /// Whether the trip needs any stop at all.
    pub fn needs_fuel(&self) -> bool {
        !self.stops.is_empty()
    }
}

/// Build the plan from purchases against the sorted route stations.
pub fn assemble(
    purchases: &[Purchase],
    route_stations: &RouteStations<'_>,
    vehicle: &VehicleProfile,
) -> RefuelPlan {
    let stops: Vec<RefuelStop> = purchases
        .iter()
        .map(|p| {
            let projected = &route_stations.stations[p.station_index];
            RefuelStop {
                station: projected.station.clone(),
                mile_marker: projected.mile_marker,
                offset_miles: projected.offset_miles,
                range_on_arrival_miles: p.range_on_arrival_miles,
                gallons: p.gallons,
                cost_dollars: p.gallons * projected.price(),
            }
        })
        .collect();

    let mut nodes = Vec::with_capacity(stops.len() + 2);
    nodes.push(route_stations.origin_miles);
    nodes.extend(stops.iter().map(|s| s.mile_marker));
    nodes.push(route_stations.destination_miles);

    let legs: Vec<RouteLeg> = nodes
        .windows(2)
        .map(|w| {
            let distance = w[1] - w[0];
            RouteLeg {
                from_miles: w[0],
                to_miles: w[1],
                distance_miles: distance,
                gallons_used: vehicle.gallons_for(distance),
            }
        })
        .collect();

    RefuelPlan {
        total_gallons: stops.iter().map(|s| s.gallons).sum(),
        total_cost_dollars: stops.iter().map(|s| s.cost_dollars).sum(),
        total_distance_miles: route_stations.destination_miles,
        stations_considered: route_stations.stations.len(),
        stops,
        legs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinates, StationId};
    use crate::planner::project::ProjectedStation;

    fn station(id: &str, price: f64) -> FuelStation {
        FuelStation::new(
            StationId::parse(id).unwrap(),
            format!("Stop {id}"),
            format!("{id} Main St"),
            "Amarillo",
            "TX",
            Coordinates::new(35.2, -101.8).unwrap(),
            price,
        )
        .unwrap()
    }

    #[test]
    fn sums_cost_and_maps_identity() {
        let a = station("a", 3.5);
        let b = station("b", 3.0);
        let route_stations = RouteStations {
            stations: vec![
                ProjectedStation {
                    station: &a,
                    mile_marker: 400.0,
                    offset_miles: 1.5,
                },
                ProjectedStation {
                    station: &b,
                    mile_marker: 700.0,
                    offset_miles: 0.2,
                },
            ],
            origin_miles: 0.0,
            destination_miles: 900.0,
        };
        let purchases = vec![
            Purchase {
                station_index: 0,
                range_on_arrival_miles: 100.0,
                range_bought_miles: 200.0,
                gallons: 20.0,
            },
            Purchase {
                station_index: 1,
                range_on_arrival_miles: 0.0,
                range_bought_miles: 200.0,
                gallons: 20.0,
            },
        ];

        let plan = assemble(&purchases, &route_stations, &VehicleProfile::default());

        assert_eq!(plan.stops.len(), 2);
        assert_eq!(plan.stops[0].station.address, "a Main St");
        assert_eq!(plan.stops[0].offset_miles, 1.5);
        assert_eq!(plan.stops[0].cost_dollars, 70.0);
        assert_eq!(plan.stops[1].cost_dollars, 60.0);
        assert_eq!(plan.total_cost_dollars, 130.0);
        assert_eq!(plan.total_cost_cents(), 13000);
        assert_eq!(plan.total_gallons, 40.0);
        assert_eq!(plan.total_distance_miles, 900.0);
        assert_eq!(plan.stations_considered, 2);

        let distances: Vec<f64> = plan.legs.iter().map(|l| l.distance_miles).collect();
        assert_eq!(distances, vec![400.0, 300.0, 200.0]);
        assert_eq!(plan.legs[1].gallons_used, 30.0);
    }

    #[test]
    fn no_purchases_single_leg() {
        let route_stations = RouteStations {
            stations: Vec::new(),
            origin_miles: 0.0,
            destination_miles: 450.0,
        };

        let plan = assemble(&[], &route_stations, &VehicleProfile::default());

        assert!(!plan.needs_fuel());
        assert_eq!(plan.total_cost_dollars, 0.0);
        assert_eq!(plan.legs.len(), 1);
        assert_eq!(plan.legs[0].distance_miles, 450.0);
        assert_eq!(plan.legs[0].gallons_used, 45.0);
    }

    #[test]
    fn cents_rounding_happens_last() {
        let plan = RefuelPlan {
            stops: Vec::new(),
            legs: Vec::new(),
            total_distance_miles: 0.0,
            total_gallons: 0.0,
            total_cost_dollars: 12.345_6,
            stations_considered: 0,
        };
        assert_eq!(plan.total_cost_cents(), 1235);
    }
}
