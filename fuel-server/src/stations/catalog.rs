//! In-memory station catalog with background refresh.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::info;

use crate::domain::FuelStation;

use super::error::StationError;
use super::record::{ParsedCatalog, parse_catalog};

/// Default catalog refresh interval: 24 hours.
const DEFAULT_REFRESH: Duration = Duration::from_secs(24 * 60 * 60);

/// Configuration for the station catalog.
#[derive(Debug, Clone)]
pub struct StationCatalogConfig {
    /// Path to the geocoded station JSON file.
    pub path: PathBuf,
    /// How often to reload the file.
    pub refresh_interval: Duration,
}

impl StationCatalogConfig {
    /// Create a new config with the given path and default refresh (24 hours).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            refresh_interval: DEFAULT_REFRESH,
        }
    }

    /// Set a custom refresh interval.
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }
}

impl Default for StationCatalogConfig {
    fn default() -> Self {
        Self::new("data/gas_stations.json")
    }
}

/// An immutable view of the catalog at one point in time.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub stations: Arc<Vec<FuelStation>>,
    pub loaded_at: DateTime<Utc>,
}

/// Thread-safe station catalog.
///
/// Requests take a [`CatalogSnapshot`] and plan against it; a refresh
/// swaps in a new snapshot without disturbing requests in flight.
#[derive(Clone)]
pub struct StationCatalog {
    inner: Arc<RwLock<CatalogSnapshot>>,
    source: Option<PathBuf>,
}

impl StationCatalog {
    /// Load the catalog from disk.
    ///
    /// Fails if the file is unreadable, malformed, or has no valid station.
    pub async fn load(config: &StationCatalogConfig) -> Result<Self, StationError> {
        let stations = read_catalog(&config.path).await?;

        Ok(Self {
            inner: Arc::new(RwLock::new(CatalogSnapshot {
                stations: Arc::new(stations),
                loaded_at: Utc::now(),
            })),
            source: Some(config.path.clone()),
        })
    }

    /// Build a catalog from stations already in memory (for tests and
    /// fixture mode). Such a catalog cannot be refreshed.
    pub fn from_stations(stations: Vec<FuelStation>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(CatalogSnapshot {
                stations: Arc::new(stations),
                loaded_at: Utc::now(),
            })),
            source: None,
        }
    }

    /// Current snapshot.
    pub async fn snapshot(&self) -> CatalogSnapshot {
        self.inner.read().await.clone()
    }

    /// Current station list.
    pub async fn stations(&self) -> Arc<Vec<FuelStation>> {
        self.inner.read().await.stations.clone()
    }

    /// Get the number of stations in the catalog.
    pub async fn len(&self) -> usize {
        self.inner.read().await.stations.len()
    }

    /// Check if the catalog is empty.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.stations.is_empty()
    }

    /// Reload the catalog from its source file.
    ///
    /// On success, replaces the current snapshot. On failure, the existing
    /// snapshot is preserved and the error is returned.
    pub async fn refresh(&self) -> Result<usize, StationError> {
        let path = self.source.as_ref().ok_or(StationError::NoSource)?;
        let stations = read_catalog(path).await?;
        let count = stations.len();

        let mut guard = self.inner.write().await;
        *guard = CatalogSnapshot {
            stations: Arc::new(stations),
            loaded_at: Utc::now(),
        };

        Ok(count)
    }
}

/// Read and validate the catalog file.
async fn read_catalog(path: &Path) -> Result<Vec<FuelStation>, StationError> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| StationError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    let ParsedCatalog {
        stations,
        rejected,
        duplicates,
    } = parse_catalog(&json)?;

    if stations.is_empty() {
        return Err(StationError::Empty);
    }

    info!(
        path = %path.display(),
        stations = stations.len(),
        rejected,
        duplicates,
        "loaded station catalog"
    );
    Ok(stations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(id: &str, price: f64) -> String {
        format!(
            r#"{{"truckstop_id": "{id}", "name": "Stop {id}", "address": "I-80",
               "city": "Reno", "state": "NV", "latitude": 39.5, "longitude": -119.8,
               "price_per_gallon": {price}}}"#
        )
    }

    fn write_catalog(path: &Path, records: &[String]) {
        std::fs::write(path, format!("[{}]", records.join(","))).unwrap();
    }

    #[tokio::test]
    async fn load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stations.json");
        write_catalog(&path, &[record("1", 3.1), record("2", 3.2)]);

        let catalog = StationCatalog::load(&StationCatalogConfig::new(&path))
            .await
            .unwrap();

        assert_eq!(catalog.len().await, 2);
        assert!(!catalog.is_empty().await);
    }

    #[tokio::test]
    async fn missing_file_fails() {
        let config = StationCatalogConfig::new("/nonexistent/path/stations.json");
        let result = StationCatalog::load(&config).await;
        assert!(matches!(result, Err(StationError::Io { .. })));
    }

    #[tokio::test]
    async fn all_invalid_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stations.json");
        write_catalog(&path, &[record("1", -1.0)]);

        let result = StationCatalog::load(&StationCatalogConfig::new(&path)).await;
        assert!(matches!(result, Err(StationError::Empty)));
    }

    #[tokio::test]
    async fn refresh_replaces_snapshot() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stations.json");
        write_catalog(&path, &[record("1", 3.1)]);
        let catalog = StationCatalog::load(&StationCatalogConfig::new(&path))
            .await
            .unwrap();
        let before = catalog.stations().await;

        write_catalog(&path, &[record("1", 2.9), record("2", 3.0), record("3", 3.3)]);
        let count = catalog.refresh().await.unwrap();

        assert_eq!(count, 3);
        assert_eq!(catalog.len().await, 3);
        // Earlier snapshots are unaffected.
        assert_eq!(before.len(), 1);
        assert_eq!(before[0].price_per_gallon(), 3.1);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stations.json");
        write_catalog(&path, &[record("1", 3.1)]);
        let catalog = StationCatalog::load(&StationCatalogConfig::new(&path))
            .await
            .unwrap();

        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            catalog.refresh().await,
            Err(StationError::Json { .. })
        ));
        assert_eq!(catalog.len().await, 1);
    }

    #[tokio::test]
    async fn in_memory_catalog_cannot_refresh() {
        let catalog = StationCatalog::from_stations(Vec::new());
        assert!(catalog.is_empty().await);
        assert!(matches!(
            catalog.refresh().await,
            Err(StationError::NoSource)
        ));
    }

    #[test]
    fn config_defaults() {
        let config = StationCatalogConfig::default();
        assert_eq!(config.path, PathBuf::from("data/gas_stations.json"));
        assert_eq!(config.refresh_interval, Duration::from_secs(86400));

        let config = StationCatalogConfig::new("x.json").with_refresh_interval(Duration::from_secs(60));
        assert_eq!(config.refresh_interval, Duration::from_secs(60));
    }
}
