use std::error::Error;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use fuel_server::cache::{CacheConfig, CachedRouteClient};
use fuel_server::planner::{
    DEFAULT_CORRIDOR_WIDTH_MILES, DEFAULT_MAX_RANGE_MILES, DEFAULT_MILES_PER_GALLON, PlannerConfig,
    VehicleProfile,
};
use fuel_server::routing::{
    DirectionsConfig, GeocodeConfig, MockRouteClient, RouteClient, RouteProvider,
};
use fuel_server::stations::{StationCatalog, StationCatalogConfig};
use fuel_server::web::{AppState, create_router};

/// Default catalog refresh period (24 hours).
const DEFAULT_REFRESH_SECS: u64 = 24 * 60 * 60;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("fuel_server=info,tower_http=info")),
        )
        .init();

    if let Err(e) = run().await {
        error!("{e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    // Planner settings (fail fast on nonsense)
    let vehicle = VehicleProfile::new(
        env_or("MAX_RANGE_MILES", DEFAULT_MAX_RANGE_MILES)?,
        env_or("MILES_PER_GALLON", DEFAULT_MILES_PER_GALLON)?,
    )?;
    let planner_config = PlannerConfig::default()
        .with_vehicle(vehicle)
        .with_corridor_width(env_or("CORRIDOR_MILES", DEFAULT_CORRIDOR_WIDTH_MILES)?);

    // Load the station catalog (fail fast if unavailable)
    let catalog_config = StationCatalogConfig::new(env_or(
        "STATIONS_PATH",
        "data/gas_stations.json".to_string(),
    )?)
    .with_refresh_interval(Duration::from_secs(env_or(
        "STATIONS_REFRESH_SECS",
        DEFAULT_REFRESH_SECS,
    )?));
    let catalog = StationCatalog::load(&catalog_config).await?;

    // Spawn background task to reload the catalog
    let catalog_refresh = catalog.clone();
    let refresh_interval = catalog_config.refresh_interval;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(refresh_interval);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            match catalog_refresh.refresh().await {
                Ok(count) => info!(count, "refreshed station catalog"),
                Err(e) => warn!("failed to refresh station catalog, keeping previous: {e}"),
            }
        }
    });

    let addr: SocketAddr = env_or("BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 3000)))?;
    let static_dir = env_or("STATIC_DIR", "static".to_string())?;

    // Route provider: recorded fixtures or the live services
    match std::env::var("ROUTE_FIXTURES") {
        Ok(dir) => {
            let provider = MockRouteClient::new(&dir)?;
            info!(routes = provider.len(), %dir, "serving recorded routes");
            serve(provider, catalog, planner_config, addr, &static_dir).await
        }
        Err(_) => {
            let api_key = std::env::var("ORS_API_KEY").unwrap_or_else(|_| {
                warn!("ORS_API_KEY not set. Route lookups will fail.");
                String::new()
            });
            let provider = RouteClient::new(DirectionsConfig::new(api_key), GeocodeConfig::default())?;
            serve(provider, catalog, planner_config, addr, &static_dir).await
        }
    }
}

async fn serve<P: RouteProvider + 'static>(
    provider: P,
    catalog: StationCatalog,
    config: PlannerConfig,
    addr: SocketAddr,
    static_dir: &str,
) -> Result<(), Box<dyn Error>> {
    let routes = CachedRouteClient::new(provider, &CacheConfig::default());
    let state = AppState::new(routes, catalog, config);
    let app = create_router(state, static_dir);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Fuel Stop Planner listening on http://{addr}");
    info!("  GET  /health  - Health check");
    info!("  GET  /plan    - Plan a trip (?origin=..&destination=..)");
    info!("  POST /plan    - Plan a trip (JSON body)");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Parse an environment variable, falling back to `default` when unset.
fn env_or<T>(name: &str, default: T) -> Result<T, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| format!("invalid {name}={raw:?}: {e}")),
        Err(_) => Ok(default),
    }
}
