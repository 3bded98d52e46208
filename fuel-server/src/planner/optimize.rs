//! Minimum-cost refueling along a line.
//!
//! The vehicle starts at mile 0 with a full tank and visits stations in
//! route order. At each node it applies the classic rule for continuous
//! fuel with stop-specific prices:
//!
//! 1. If a strictly cheaper station is within a full tank ahead, buy only
//!    enough to reach the nearest such station.
//! 2. Otherwise, if the destination is within a full tank, buy only enough
//!    to reach it.
//! 3. Otherwise fill the tank and drive to the cheapest station in range.
//!
//! The origin acts as a node with price 0, which is how the free starting
//! tank enters the rule. Fuel is tracked as miles of range; gallons are
//! derived only when recording a purchase.

use tracing::trace;

use super::config::VehicleProfile;
use super::error::PlanError;
use super::project::ProjectedStation;
use super::reach::DISTANCE_EPSILON;

/// A decision to buy fuel at a station.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Purchase {
    /// Index into the sorted station list.
    pub station_index: usize,

    /// Range left in the tank on arrival (miles).
    pub range_on_arrival_miles: f64,

    /// Range bought (miles).
    pub range_bought_miles: f64,

    /// Fuel bought.
    pub gallons: f64,
}

/// Where the vehicle heads next from the current node.
enum Target {
    Station(usize),
    Destination,
}

/// Compute purchases minimising total cost.
///
/// `stations` must be sorted by mile marker (see
/// [`filter_feasible`](super::reach::filter_feasible)) and lie within
/// `[0, destination_miles]`. Stations contributing no purchase are left
/// out of the result.
///
/// Returns [`PlanError::NoFeasiblePath`] if at some node neither another
/// station nor the destination is within range.
pub fn optimize(
    stations: &[ProjectedStation<'_>],
    destination_miles: f64,
    vehicle: &VehicleProfile,
) -> Result<Vec<Purchase>, PlanError> {
    vehicle.validate()?;
    let max_range = vehicle.max_range_miles;

    let mut purchases = Vec::new();
    let mut current: Option<usize> = None;
    let mut position = 0.0;
    let mut price = 0.0;
    let mut range = max_range;
    let mut next = 0;

    loop {
        let in_range = stations[next..]
            .iter()
            .take_while(|s| s.mile_marker - position <= max_range + DISTANCE_EPSILON)
            .count();
        let window = next..next + in_range;

        let cheaper = window.clone().find(|&j| stations[j].price() < price);
        let destination_in_range = destination_miles - position <= max_range + DISTANCE_EPSILON;

        let (target, needed) = match cheaper {
            Some(j) => (Target::Station(j), stations[j].mile_marker - position),
            None if destination_in_range => (Target::Destination, destination_miles - position),
            None => {
                let cheapest = window
                    .clone()
                    .min_by(|&a, &b| stations[a].price().total_cmp(&stations[b].price()));
                match cheapest {
                    Some(j) => (Target::Station(j), max_range),
                    None => {
                        let blocked_at = stations
                            .get(next)
                            .map(|s| s.mile_marker)
                            .unwrap_or(destination_miles);
                        return Err(PlanError::gap(position, blocked_at, max_range));
                    }
                }
            }
        };

        let bought = (needed - range).clamp(0.0, max_range - range);
        if bought > DISTANCE_EPSILON
            && let Some(index) = current
        {
            trace!(index, bought, price, "purchase");
            purchases.push(Purchase {
                station_index: index,
                range_on_arrival_miles: range,
                range_bought_miles: bought,
                gallons: vehicle.gallons_for(bought),
            });
        }
        range += bought;

        match target {
            Target::Destination => break,
            Target::Station(j) => {
                let leg = stations[j].mile_marker - position;
                range = (range - leg).max(0.0);
                position = stations[j].mile_marker;
                price = stations[j].price();
                current = Some(j);
                next = j + 1;
            }
        }
    }

    Ok(purchases)
}
