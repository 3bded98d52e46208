//! Live route provider backed by a geocoder and OpenRouteService.

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use tracing::{debug, info};

use crate::domain::Coordinates;

use super::convert::{Route, convert_directions};
use super::error::RouteServiceError;
use super::geocode::{GeocodeClient, GeocodeConfig};
use super::types::{DirectionsRequest, DirectionsResponse};
use super::{RouteProvider, normalize_place};

const DEFAULT_BASE_URL: &str = "https://api.openrouteservice.org";
const DEFAULT_PROFILE: &str = "driving-car";

/// Configuration for the directions service.
#[derive(Debug, Clone)]
pub struct DirectionsConfig {
    /// OpenRouteService API key, sent as the `Authorization` header
    pub api_key: String,
    pub base_url: String,
    /// Routing profile, e.g. `driving-car` or `driving-hgv`
    pub profile: String,
    pub timeout_secs: u64,
}

impl DirectionsConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            profile: DEFAULT_PROFILE.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    fn directions_url(&self) -> String {
        format!(
            "{}/v2/directions/{}",
            self.base_url.trim_end_matches('/'),
            self.profile
        )
    }
}

/// Route provider that geocodes both endpoints, then asks the directions
/// service for a driving route between them.
#[derive(Debug, Clone)]
pub struct RouteClient {
    http: reqwest::Client,
    directions_url: String,
    geocoder: Arc<GeocodeClient>,
}

impl RouteClient {
    pub fn new(
        directions: DirectionsConfig,
        geocode: GeocodeConfig,
    ) -> Result<Self, RouteServiceError> {
        let mut headers = HeaderMap::new();
        let api_key = HeaderValue::from_str(&directions.api_key)
            .map_err(|_| RouteServiceError::Unauthorized)?;
        headers.insert(AUTHORIZATION, api_key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(directions.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            directions_url: directions.directions_url(),
            geocoder: Arc::new(GeocodeClient::new(geocode)?),
        })
    }

    async fn directions(
        &self,
        from: Coordinates,
        to: Coordinates,
    ) -> Result<DirectionsResponse, RouteServiceError> {
        let request = DirectionsRequest::between(
            [from.longitude(), from.latitude()],
            [to.longitude(), to.latitude()],
        );

        let response = self
            .http
            .post(&self.directions_url)
            .json(&request)
            .send()
            .await?;

        let body = read_success_body(response).await?;
        serde_json::from_str(&body).map_err(|e| RouteServiceError::json(e, &body))
    }
}

impl RouteProvider for RouteClient {
    async fn fetch_route(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Arc<Route>, RouteServiceError> {
        let origin = normalize_place(origin);
        let destination = normalize_place(destination);

        let (from, to) = futures::try_join!(
            self.geocoder.locate(&origin),
            self.geocoder.locate(&destination)
        )?;
        debug!(%origin, %destination, %from, %to, "endpoints geocoded");

        let response = self.directions(from, to).await?;
        let route = convert_directions(response, &origin, &destination)?;

        info!(
            %origin,
            %destination,
            miles = route.distance_miles,
            points = route.path.len(),
            "route fetched"
        );
        Ok(Arc::new(route))
    }
}

/// Map an HTTP response to its body, turning error statuses into
/// [`RouteServiceError`]s.
pub(super) async fn read_success_body(
    response: reqwest::Response,
) -> Result<String, RouteServiceError> {
    let status = response.status();

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(RouteServiceError::Unauthorized);
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(RouteServiceError::RateLimited);
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(RouteServiceError::Api {
            status: status.as_u16(),
            message: body.chars().take(500).collect(),
        });
    }

    Ok(response.text().await?)
}
