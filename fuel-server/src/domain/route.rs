//! Route geometry annotated with cumulative distance.
//!
//! A `RoutePath` is the coordinate system the planner works in: every
//! station and the destination are positioned by their distance from the
//! origin along this path.

use geo::{BoundingRect, Coord, Destination, Haversine, LineString, Point, Rect};

use super::coords::{Coordinates, METERS_PER_MILE, haversine_miles};
use super::error::DomainError;

/// A point on the route with its distance from the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub position: Coordinates,
    pub cumulative_miles: f64,
}

impl Waypoint {
    pub fn new(position: Coordinates, cumulative_miles: f64) -> Self {
        Self {
            position,
            cumulative_miles,
        }
    }
}

/// An ordered, distance-annotated route path.
///
/// Cumulative distances never decrease. Repeated coordinates may share
/// a cumulative distance. Immutable once built.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoutePath {
    waypoints: Vec<Waypoint>,
}

impl RoutePath {
    /// Build a path from pre-annotated waypoints.
    ///
    /// Fails if the first waypoint is not at mile 0, or if any cumulative
    /// distance is non-finite or lower than its predecessor.
    pub fn new(waypoints: Vec<Waypoint>) -> Result<Self, DomainError> {
        if let Some(first) = waypoints.first()
            && first.cumulative_miles != 0.0
        {
            return Err(DomainError::RouteNotAnchored(first.cumulative_miles));
        }
        let mut previous = 0.0;
        for (index, wp) in waypoints.iter().enumerate() {
            let current = wp.cumulative_miles;
            if !current.is_finite() || current < previous {
                return Err(DomainError::NonMonotonicRoute {
                    index,
                    previous,
                    current,
                });
            }
            previous = current;
        }
        Ok(Self { waypoints })
    }

    /// Build a path from raw positions, deriving cumulative distances from
    /// great-circle distance between consecutive points.
    pub fn from_positions(points: impl IntoIterator<Item = Coordinates>) -> Self {
        let mut waypoints: Vec<Waypoint> = Vec::new();
        let mut total = 0.0;
        for position in points {
            if let Some(last) = waypoints.last() {
                total += haversine_miles(&last.position, &position);
            }
            waypoints.push(Waypoint::new(position, total));
        }
        Self { waypoints }
    }

    /// Rescale cumulative distances so the path length equals `total_miles`.
    ///
    /// Used to reconcile straight-line geometry with a reported road
    /// distance. A zero-length path or a non-positive target is returned
    /// unchanged.
    pub fn scaled_to(self, total_miles: f64) -> Self {
        let length = self.length_miles();
        if length <= 0.0 || !total_miles.is_finite() || total_miles <= 0.0 {
            return self;
        }
        let factor = total_miles / length;
        let waypoints = self
            .waypoints
            .into_iter()
            .map(|wp| Waypoint::new(wp.position, wp.cumulative_miles * factor))
            .collect();
        Self { waypoints }
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Total route length: the last waypoint's cumulative distance.
    pub fn length_miles(&self) -> f64 {
        self.waypoints
            .last()
            .map(|wp| wp.cumulative_miles)
            .unwrap_or(0.0)
    }

    pub fn origin(&self) -> Option<Coordinates> {
        self.waypoints.first().map(|wp| wp.position)
    }

    pub fn destination(&self) -> Option<Coordinates> {
        self.waypoints.last().map(|wp| wp.position)
    }

    /// Consecutive waypoint pairs.
    pub fn segments(&self) -> impl Iterator<Item = (&Waypoint, &Waypoint)> {
        self.waypoints.windows(2).map(|w| (&w[0], &w[1]))
    }

    /// The path as a `geo` line string.
    pub fn line_string(&self) -> LineString<f64> {
        self.waypoints.iter().map(|wp| wp.position.to_point()).collect()
    }

    /// Smallest box containing every waypoint, or `None` for an empty path.
    pub fn bounding_rect(&self) -> Option<Rect<f64>> {
        self.line_string().bounding_rect()
    }
}

/// Grow `rect` by `miles` of ground distance on every side.
///
/// Longitude padding is measured at the edge nearest a pole, where a mile
/// spans the most degrees.
pub fn pad_rect(rect: Rect<f64>, miles: f64) -> Rect<f64> {
    let meters = miles * METERS_PER_MILE;
    let (min, max) = (rect.min(), rect.max());

    let south = Haversine::destination(Point::new(min.x, min.y), 180.0, meters).y();
    let north = Haversine::destination(Point::new(max.x, max.y), 0.0, meters).y();

    let polar_edge = if min.y.abs() > max.y.abs() { min.y } else { max.y };
    let lon_pad = Haversine::destination(Point::new(0.0, polar_edge), 90.0, meters).x();

    Rect::new(
        Coord {
            x: (min.x - lon_pad).max(-180.0),
            y: south.max(-90.0),
        },
        Coord {
            x: (max.x + lon_pad).min(180.0),
            y: north.min(90.0),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(lat: f64, lon: f64) -> Coordinates {
        Coordinates::new(lat, lon).unwrap()
    }

    fn wp(lat: f64, miles: f64) -> Waypoint {
        Waypoint::new(coords(lat, 0.0), miles)
    }

    #[test]
    fn accepts_non_decreasing_distances() {
        let path = RoutePath::new(vec![wp(0.0, 0.0), wp(0.0, 0.0), wp(1.0, 69.0)]).unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path.length_miles(), 69.0);
    }

    #[test]
    fn rejects_decreasing_distances() {
        let err = RoutePath::new(vec![wp(0.0, 0.0), wp(1.0, 10.0), wp(2.0, 9.0)]).unwrap_err();
        assert_eq!(
            err,
            DomainError::NonMonotonicRoute {
                index: 2,
                previous: 10.0,
                current: 9.0
            }
        );
    }

    #[test]
    fn rejects_path_not_starting_at_zero() {
        let err = RoutePath::new(vec![wp(0.0, 25.0), wp(1.0, 94.0)]).unwrap_err();
        assert_eq!(err, DomainError::RouteNotAnchored(25.0));

        assert!(RoutePath::new(vec![wp(0.0, -1.0), wp(1.0, 68.0)]).is_err());
        assert!(RoutePath::new(Vec::new()).is_ok());
    }

    #[test]
    fn rejects_nan_distance() {
        assert!(RoutePath::new(vec![wp(0.0, 0.0), wp(1.0, f64::NAN)]).is_err());
    }

    #[test]
    fn empty_path_has_zero_length() {
        let path = RoutePath::default();
        assert!(path.is_empty());
        assert_eq!(path.length_miles(), 0.0);
        assert!(path.bounding_rect().is_none());
        assert!(path.origin().is_none());
    }

    #[test]
    fn from_positions_accumulates() {
        let path =
            RoutePath::from_positions([coords(40.0, -100.0), coords(41.0, -100.0), coords(42.0, -100.0)]);
        let wps = path.waypoints();
        assert_eq!(wps[0].cumulative_miles, 0.0);
        assert!((wps[1].cumulative_miles - 69.09).abs() < 0.1);
        assert!((wps[2].cumulative_miles - 138.18).abs() < 0.2);
        assert_eq!(path.segments().count(), 2);
    }

    #[test]
    fn scaled_to_matches_target() {
        let path = RoutePath::from_positions([coords(40.0, -100.0), coords(41.0, -100.0)]);
        let scaled = path.scaled_to(80.0);
        assert!((scaled.length_miles() - 80.0).abs() < 1e-9);
        assert_eq!(scaled.waypoints()[0].cumulative_miles, 0.0);
    }

    #[test]
    fn scaled_to_ignores_degenerate_input() {
        let single = RoutePath::from_positions([coords(40.0, -100.0)]);
        assert_eq!(single.clone().scaled_to(100.0), single);

        let path = RoutePath::from_positions([coords(40.0, -100.0), coords(41.0, -100.0)]);
        assert_eq!(path.clone().scaled_to(0.0), path);
    }

    #[test]
    fn bounding_rect_and_padding() {
        use geo::Intersects;

        let path = RoutePath::from_positions([coords(35.0, -100.0), coords(36.0, -98.0)]);
        let rect = path.bounding_rect().unwrap();
        assert_eq!(rect.min().y, 35.0);
        assert_eq!(rect.max().x, -98.0);

        let outside = coords(36.05, -97.97);
        assert!(!rect.intersects(&outside.to_coord()));
        assert!(pad_rect(rect, 5.0).intersects(&outside.to_coord()));
        assert!(!pad_rect(rect, 1.0).intersects(&coords(37.0, -98.0).to_coord()));
    }

    #[test]
    fn padding_covers_the_requested_distance() {
        let rect = RoutePath::from_positions([coords(40.0, -100.0), coords(41.0, -99.0)])
            .bounding_rect()
            .unwrap();
        let padded = pad_rect(rect, 10.0);

        // Ten miles north of the top edge, and ten miles east of the
        // north-east corner along the parallel.
        let north = haversine_miles(&coords(41.0, -99.0), &coords(padded.max().y, -99.0));
        let east = haversine_miles(&coords(41.0, -99.0), &coords(41.0, padded.max().x));
        assert!((north - 10.0).abs() < 0.01, "got {north}");
        assert!(east >= 9.99, "got {east}");
    }
}
