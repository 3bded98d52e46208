//! Planner error types.

/// Errors from refuel planning.
///
/// Each pipeline stage returns these and short-circuits the rest; none are
/// retried since the planner performs no I/O.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    /// Route has fewer than two waypoints or zero length
    #[error("route is empty")]
    EmptyRoute,

    /// Range or fuel economy is not a positive finite number
    #[error("invalid vehicle profile: {0}")]
    InvalidProfile(String),

    /// Some stretch of the route is longer than a full tank can cover
    #[error(
        "no feasible route with current range: {gap_miles:.1} mi gap between mile {from_miles:.1} and mile {to_miles:.1} exceeds {max_range_miles} mi"
    )]
    NoFeasiblePath {
        from_miles: f64,
        to_miles: f64,
        gap_miles: f64,
        max_range_miles: f64,
    },
}

impl PlanError {
    pub(crate) fn gap(from_miles: f64, to_miles: f64, max_range_miles: f64) -> Self {
        PlanError::NoFeasiblePath {
            from_miles,
            to_miles,
            gap_miles: to_miles - from_miles,
            max_range_miles,
        }
    }
}
