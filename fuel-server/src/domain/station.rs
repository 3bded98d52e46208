//! Fuel station identity and pricing.

use std::fmt;

use serde::Serialize;

use super::coords::Coordinates;
use super::error::DomainError;

/// Identifier of a fuel station in the price catalog.
///
/// Always non-empty with surrounding whitespace removed.
///
/// # Examples
///
/// ```
/// use fuel_server::domain::StationId;
///
/// let id = StationId::parse(" 7 ").unwrap();
/// assert_eq!(id.as_str(), "7");
///
/// assert!(StationId::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StationId(String);

impl StationId {
    /// Parse a station id, trimming whitespace.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyStationId);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A candidate fuel station with a known price.
///
/// Name and address fields are opaque to the planner; only `position`
/// and `price_per_gallon` influence the plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuelStation {
    pub id: StationId,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub position: Coordinates,
    price_per_gallon: f64,
}

impl FuelStation {
    /// Create a station, rejecting non-positive or non-finite prices.
    pub fn new(
        id: StationId,
        name: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        position: Coordinates,
        price_per_gallon: f64,
    ) -> Result<Self, DomainError> {
        if !price_per_gallon.is_finite() || price_per_gallon <= 0.0 {
            return Err(DomainError::InvalidPrice(price_per_gallon));
        }
        Ok(Self {
            id,
            name: name.into(),
            address: address.into(),
            city: city.into(),
            state: state.into(),
            position,
            price_per_gallon,
        })
    }

    pub fn price_per_gallon(&self) -> f64 {
        self.price_per_gallon
    }

    /// "City, ST" for display.
    pub fn locality(&self) -> String {
        match (self.city.is_empty(), self.state.is_empty()) {
            (false, false) => format!("{}, {}", self.city, self.state),
            (false, true) => self.city.clone(),
            (true, false) => self.state.clone(),
            (true, true) => String::new(),
        }
    }
}
