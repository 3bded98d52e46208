//! Geographic coordinates and great-circle distance.

use std::fmt;

use geo::{Coord, Distance, Haversine, Point};
use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Metres in a statute mile. `geo` measures in metres.
pub const METERS_PER_MILE: f64 = 1609.344;

/// A validated WGS84 position.
///
/// Latitude is in [-90, 90] and longitude in [-180, 180], both finite.
///
/// # Examples
///
/// ```
/// use fuel_server::domain::Coordinates;
///
/// let chicago = Coordinates::new(41.8781, -87.6298).unwrap();
/// assert_eq!(chicago.latitude(), 41.8781);
///
/// assert!(Coordinates::new(91.0, 0.0).is_err());
/// assert!(Coordinates::new(f64::NAN, 0.0).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinates")]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinates {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinates> for Coordinates {
    type Error = DomainError;

    fn try_from(raw: RawCoordinates) -> Result<Self, Self::Error> {
        Coordinates::new(raw.latitude, raw.longitude)
    }
}

impl Coordinates {
    /// Create a position, rejecting out-of-range or non-finite values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(DomainError::InvalidCoordinates {
                latitude,
                longitude,
            });
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::InvalidCoordinates {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to another position, in miles.
    pub fn distance_miles(&self, other: &Coordinates) -> f64 {
        haversine_miles(self, other)
    }

    /// The position as a `geo` point (x = longitude, y = latitude).
    pub fn to_point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }

    pub fn to_coord(&self) -> Coord<f64> {
        self.to_point().0
    }

    /// `[latitude, longitude]` pair, the order map widgets expect.
    pub fn to_lat_lon(&self) -> [f64; 2] {
        [self.latitude, self.longitude]
    }
}

impl fmt::Debug for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coordinates({:.5}, {:.5})", self.latitude, self.longitude)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5},{:.5}", self.latitude, self.longitude)
    }
}

/// Haversine distance between two positions, in miles.
pub fn haversine_miles(a: &Coordinates, b: &Coordinates) -> f64 {
    point_miles(a.to_point(), b.to_point())
}

/// Haversine distance between two `geo` points, in miles.
pub fn point_miles(a: Point<f64>, b: Point<f64>) -> f64 {
    Haversine::distance(a, b) / METERS_PER_MILE
}
