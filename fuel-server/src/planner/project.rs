//! Route projection: placing stations on the route's distance axis.
//!
//! Each station is snapped to the nearest point of the route, whose
//! segments are great-circle arcs. The distance along the route to that
//! point becomes its mile marker; the distance from the station to it is
//! its lateral offset.

use geo::{Closest, HaversineClosestPoint, Intersects, Line, Point};
use tracing::trace;

use crate::domain::{Coordinates, FuelStation, RoutePath, Waypoint, pad_rect, point_miles};

/// A station positioned along the route.
///
/// `mile_marker` is in `[0, route length]` and `offset_miles` is never
/// negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedStation<'a> {
    pub station: &'a FuelStation,

    /// Distance from the origin along the route to the nearest route point.
    pub mile_marker: f64,

    /// Distance from the station to the nearest route point.
    pub offset_miles: f64,
}

impl ProjectedStation<'_> {
    pub fn price(&self) -> f64 {
        self.station.price_per_gallon()
    }
}

/// Project stations onto the route, keeping those within the corridor.
///
/// Stations outside the route's bounding box (padded by the corridor
/// width) are rejected before any per-segment work. Output order follows
/// the input order.
pub fn project<'a>(
    route: &RoutePath,
    stations: &'a [FuelStation],
    corridor_width_miles: f64,
) -> Vec<ProjectedStation<'a>> {
    let Some(bbox) = route.bounding_rect() else {
        return Vec::new();
    };
    let search_box = pad_rect(bbox, corridor_width_miles);

    stations
        .iter()
        .filter(|s| search_box.intersects(&s.position.to_coord()))
        .filter_map(|station| {
            let (mile_marker, offset_miles) = nearest_point(route, &station.position)?;
            if offset_miles > corridor_width_miles {
                trace!(station = %station.id, offset_miles, "outside corridor");
                return None;
            }
            Some(ProjectedStation {
                station,
                mile_marker,
                offset_miles,
            })
        })
        .collect()
}

/// Find the nearest point of the route to `target`.
///
/// Returns `(mile_marker, offset_miles)`, or `None` for an empty route.
/// On ties the earliest segment wins.
pub fn nearest_point(route: &RoutePath, target: &Coordinates) -> Option<(f64, f64)> {
    let target = target.to_point();
    match route.waypoints() {
        [] => None,
        [only] => Some((
            only.cumulative_miles,
            point_miles(only.position.to_point(), target),
        )),
        _ => {
            let mut best: Option<(f64, f64)> = None;
            for (a, b) in route.segments() {
                let foot = closest_on_segment(a, b, target);
                let offset = point_miles(foot, target);
                if best.is_none_or(|(_, nearest)| offset < nearest) {
                    best = Some((mile_at(a, b, foot), offset));
                }
            }
            best
        }
    }
}

/// Great-circle closest point to `target` on the segment `a`-`b`.
fn closest_on_segment(a: &Waypoint, b: &Waypoint, target: Point<f64>) -> Point<f64> {
    let (start, end) = (a.position.to_point(), b.position.to_point());
    if start == end {
        return start;
    }
    match Line::new(start, end).haversine_closest_point(&target) {
        Closest::Intersection(foot) | Closest::SinglePoint(foot) => foot,
        // Antipodal cases: fall back to the nearer endpoint.
        Closest::Indeterminate => {
            if point_miles(start, target) <= point_miles(end, target) {
                start
            } else {
                end
            }
        }
    }
}

/// Cumulative miles at `foot`, interpolated by its share of the segment's
/// ground length.
fn mile_at(a: &Waypoint, b: &Waypoint, foot: Point<f64>) -> f64 {
    let start = a.position.to_point();
    let span = point_miles(start, b.position.to_point());
    if span <= 0.0 {
        return a.cumulative_miles;
    }
    let fraction = (point_miles(start, foot) / span).clamp(0.0, 1.0);
    a.cumulative_miles + fraction * (b.cumulative_miles - a.cumulative_miles)
}
