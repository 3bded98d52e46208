//! Reachability: ordering stations along the route and checking that no
//! stretch is longer than a full tank.

use std::cmp::Ordering;

use tracing::debug;

use super::error::PlanError;
use super::project::ProjectedStation;

/// Slack for floating-point noise when comparing distances (miles).
pub(crate) const DISTANCE_EPSILON: f64 = 1e-9;

/// Stations sorted along the route, bracketed by the virtual origin and
/// destination nodes.
#[derive(Debug, Clone)]
pub struct RouteStations<'a> {
    /// Ascending by mile marker, then price, then station id.
    pub stations: Vec<ProjectedStation<'a>>,

    /// Mile marker of the origin (always 0).
    pub origin_miles: f64,

    /// Mile marker of the destination (the route length).
    pub destination_miles: f64,
}

impl RouteStations<'_> {
    /// Every node position in order: origin, stations, destination.
    pub fn node_miles(&self) -> impl Iterator<Item = f64> + '_ {
        std::iter::once(self.origin_miles)
            .chain(self.stations.iter().map(|s| s.mile_marker))
            .chain(std::iter::once(self.destination_miles))
    }

    /// Trip-feasibility verdict.
    ///
    /// Fails with the first gap between consecutive nodes (including
    /// origin-to-first and last-to-destination) that exceeds `max_range`.
    pub fn check_gaps(&self, max_range_miles: f64) -> Result<(), PlanError> {
        let mut previous = self.origin_miles;
        for mile in self.node_miles().skip(1) {
            if mile - previous > max_range_miles + DISTANCE_EPSILON {
                debug!(from = previous, to = mile, "gap exceeds range");
                return Err(PlanError::gap(previous, mile, max_range_miles));
            }
            previous = mile;
        }
        Ok(())
    }
}

/// Total order used for route stations: position, then price, then id.
pub fn station_order(a: &ProjectedStation<'_>, b: &ProjectedStation<'_>) -> Ordering {
    a.mile_marker
        .total_cmp(&b.mile_marker)
        .then_with(|| a.price().total_cmp(&b.price()))
        .then_with(|| a.station.id.cmp(&b.station.id))
}

/// Sort projected stations along the route and drop any outside
/// `[0, route_length]`.
///
/// Nothing else is discarded here: a station far from its neighbours may
/// be the only bridge across an empty stretch. Whether the trip as a whole
/// is possible is decided by [`RouteStations::check_gaps`].
pub fn filter_feasible(
    mut projected: Vec<ProjectedStation<'_>>,
    route_length_miles: f64,
) -> RouteStations<'_> {
    projected.retain(|s| {
        s.mile_marker >= 0.0 && s.mile_marker <= route_length_miles && s.mile_marker.is_finite()
    });
    projected.sort_by(station_order);

    RouteStations {
        stations: projected,
        origin_miles: 0.0,
        destination_miles: route_length_miles,
    }
}
