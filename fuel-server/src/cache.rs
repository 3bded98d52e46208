//! Caching layer for route lookups.
//!
//! Geocoding and directions are the slow, rate-limited part of a plan
//! request, and the route between two cities does not change between
//! requests. Routes are cached by normalized place names; station prices
//! are not cached here since the catalog is already in memory.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::routing::{Route, RouteProvider, RouteServiceError, normalize_place};

/// Cache key: normalized (origin, destination).
type RouteKey = (String, String);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached routes.
    pub ttl: Duration,

    /// Maximum number of cached routes.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(6 * 60 * 60),
            max_capacity: 1000,
        }
    }
}

impl CacheConfig {
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_max_capacity(mut self, n: u64) -> Self {
        self.max_capacity = n;
        self
    }
}

/// Route provider with caching.
///
/// Wraps any [`RouteProvider`]. Failed lookups are not cached, so a
/// transient upstream error is retried on the next request.
pub struct CachedRouteClient<P> {
    provider: P,
    routes: MokaCache<RouteKey, Arc<Route>>,
}

impl<P: RouteProvider> CachedRouteClient<P> {
    pub fn new(provider: P, config: &CacheConfig) -> Self {
        let routes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { provider, routes }
    }

    /// Access the wrapped provider for lookups that bypass the cache.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn cache_entry_count(&self) -> u64 {
        self.routes.entry_count()
    }

    pub fn invalidate_cache(&self) {
        self.routes.invalidate_all();
    }
}

impl<P: RouteProvider> RouteProvider for CachedRouteClient<P> {
    async fn fetch_route(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Arc<Route>, RouteServiceError> {
        let key = (normalize_place(origin), normalize_place(destination));

        if let Some(cached) = self.routes.get(&key).await {
            debug!(origin = %key.0, destination = %key.1, "route cache hit");
            return Ok(cached);
        }

        let route = self.provider.fetch_route(&key.0, &key.1).await?;
        self.routes.insert(key, route.clone()).await;

        Ok(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::domain::{Coordinates, RoutePath};

    /// Provider that counts calls and fails for one particular origin.
    struct CountingProvider {
        calls: AtomicUsize,
    }

    impl RouteProvider for CountingProvider {
        async fn fetch_route(
            &self,
            origin: &str,
            destination: &str,
        ) -> Result<Arc<Route>, RouteServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if origin == "nowhere" {
                return Err(RouteServiceError::PlaceNotFound(origin.to_string()));
            }
            let path = RoutePath::from_positions([
                Coordinates::new(40.0, -100.0).unwrap(),
                Coordinates::new(41.0, -100.0).unwrap(),
            ]);
            Ok(Arc::new(Route {
                origin: origin.to_string(),
                destination: destination.to_string(),
                distance_miles: path.length_miles(),
                path,
            }))
        }
    }

    fn cached() -> CachedRouteClient<CountingProvider> {
        CachedRouteClient::new(
            CountingProvider {
                calls: AtomicUsize::new(0),
            },
            &CacheConfig::default(),
        )
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(21600));
        assert_eq!(config.max_capacity, 1000);

        let config = config.with_ttl(Duration::from_secs(5)).with_max_capacity(3);
        assert_eq!(config.ttl, Duration::from_secs(5));
        assert_eq!(config.max_capacity, 3);
    }

    #[tokio::test]
    async fn second_lookup_hits_cache() {
        let client = cached();

        let first = client.fetch_route("Omaha, NE", "Lincoln, NE").await.unwrap();
        let second = client.fetch_route(" omaha,  ne", "LINCOLN, NE").await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(client.provider().calls.load(Ordering::SeqCst), 1);
        assert_eq!(first.origin, "omaha, ne");
    }

    #[tokio::test]
    async fn direction_is_part_of_the_key() {
        let client = cached();
        client.fetch_route("a", "b").await.unwrap();
        client.fetch_route("b", "a").await.unwrap();
        assert_eq!(client.provider().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let client = cached();
        assert!(client.fetch_route("nowhere", "b").await.is_err());
        assert!(client.fetch_route("nowhere", "b").await.is_err());
        assert_eq!(client.provider().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let client = cached();
        client.fetch_route("a", "b").await.unwrap();
        client.invalidate_cache();
        client.fetch_route("a", "b").await.unwrap();
        assert_eq!(client.provider().calls.load(Ordering::SeqCst), 2);
    }
}
