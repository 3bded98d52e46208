//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedRouteClient;
use crate::planner::PlannerConfig;
use crate::stations::StationCatalog;

/// Shared application state.
///
/// Generic over the route provider so the same router serves live
/// lookups or recorded fixtures.
pub struct AppState<P> {
    /// Cached route lookups
    pub routes: Arc<CachedRouteClient<P>>,

    /// Fuel station snapshot, refreshed in the background
    pub catalog: StationCatalog,

    /// Planner tunables
    pub config: Arc<PlannerConfig>,
}

impl<P> AppState<P> {
    pub fn new(routes: CachedRouteClient<P>, catalog: StationCatalog, config: PlannerConfig) -> Self {
        Self {
            routes: Arc::new(routes),
            catalog,
            config: Arc::new(config),
        }
    }
}

// Derived Clone would demand `P: Clone`.
impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            routes: self.routes.clone(),
            catalog: self.catalog.clone(),
            config: self.config.clone(),
        }
    }
}
