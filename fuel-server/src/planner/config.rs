//! Planner configuration: the vehicle profile and corridor tolerance.

use super::error::PlanError;

/// Default maximum distance on a full tank (miles).
pub const DEFAULT_MAX_RANGE_MILES: f64 = 500.0;

/// Default fuel economy (miles per gallon).
pub const DEFAULT_MILES_PER_GALLON: f64 = 10.0;

/// Default lateral tolerance for a station to count as on-route (miles).
pub const DEFAULT_CORRIDOR_WIDTH_MILES: f64 = 5.0;

/// Fixed vehicle characteristics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleProfile {
    /// Miles the vehicle can travel on a full tank.
    pub max_range_miles: f64,

    /// Constant fuel economy.
    pub miles_per_gallon: f64,
}

impl VehicleProfile {
    /// Create a validated profile.
    pub fn new(max_range_miles: f64, miles_per_gallon: f64) -> Result<Self, PlanError> {
        let profile = Self {
            max_range_miles,
            miles_per_gallon,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Check both constants are positive and finite.
    pub fn validate(&self) -> Result<(), PlanError> {
        if !self.max_range_miles.is_finite() || self.max_range_miles <= 0.0 {
            return Err(PlanError::InvalidProfile(format!(
                "max range must be positive, got {}",
                self.max_range_miles
            )));
        }
        if !self.miles_per_gallon.is_finite() || self.miles_per_gallon <= 0.0 {
            return Err(PlanError::InvalidProfile(format!(
                "miles per gallon must be positive, got {}",
                self.miles_per_gallon
            )));
        }
        Ok(())
    }

    /// Tank size implied by range and economy.
    pub fn tank_capacity_gallons(&self) -> f64 {
        self.max_range_miles / self.miles_per_gallon
    }

    /// Gallons burned over `miles`.
    pub fn gallons_for(&self, miles: f64) -> f64 {
        miles / self.miles_per_gallon
    }
}

impl Default for VehicleProfile {
    fn default() -> Self {
        Self {
            max_range_miles: DEFAULT_MAX_RANGE_MILES,
            miles_per_gallon: DEFAULT_MILES_PER_GALLON,
        }
    }
}

/// Configuration parameters for refuel planning.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// The vehicle being planned for.
    pub vehicle: VehicleProfile,

    /// Stations farther than this from the route line are ignored (miles).
    pub corridor_width_miles: f64,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(vehicle: VehicleProfile, corridor_width_miles: f64) -> Self {
        Self {
            vehicle,
            corridor_width_miles,
        }
    }

    /// Set the vehicle profile.
    pub fn with_vehicle(mut self, vehicle: VehicleProfile) -> Self {
        self.vehicle = vehicle;
        self
    }

    /// Set the corridor width.
    pub fn with_corridor_width(mut self, miles: f64) -> Self {
        self.corridor_width_miles = miles;
        self
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            vehicle: VehicleProfile::default(),
            corridor_width_miles: DEFAULT_CORRIDOR_WIDTH_MILES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlannerConfig::default();

        assert_eq!(config.vehicle.max_range_miles, 500.0);
        assert_eq!(config.vehicle.miles_per_gallon, 10.0);
        assert_eq!(config.vehicle.tank_capacity_gallons(), 50.0);
        assert_eq!(config.corridor_width_miles, 5.0);
    }

    #[test]
    fn custom_config() {
        let vehicle = VehicleProfile::new(300.0, 6.0).unwrap();
        let config = PlannerConfig::default()
            .with_vehicle(vehicle)
            .with_corridor_width(2.5);

        assert_eq!(config.vehicle.tank_capacity_gallons(), 50.0);
        assert_eq!(config.corridor_width_miles, 2.5);
        assert_eq!(config.vehicle.gallons_for(120.0), 20.0);
    }

    #[test]
    fn rejects_invalid_profiles() {
        assert!(matches!(
            VehicleProfile::new(0.0, 10.0),
            Err(PlanError::InvalidProfile(_))
        ));
        assert!(matches!(
            VehicleProfile::new(500.0, -1.0),
            Err(PlanError::InvalidProfile(_))
        ));
        assert!(matches!(
            VehicleProfile::new(f64::NAN, 10.0),
            Err(PlanError::InvalidProfile(_))
        ));
        assert!(matches!(
            VehicleProfile::new(500.0, f64::INFINITY),
            Err(PlanError::InvalidProfile(_))
        ));
    }
}
