//! Place name lookup against a Nominatim-compatible geocoder.

use std::time::Duration;

use tracing::debug;

use crate::domain::Coordinates;

use super::convert::coordinates_from_hit;
use super::error::RouteServiceError;
use super::types::GeocodeHit;

const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Nominatim's usage policy requires an identifying user agent.
const DEFAULT_USER_AGENT: &str = concat!("fuel-server/", env!("CARGO_PKG_VERSION"));

/// Configuration for the geocoder.
#[derive(Debug, Clone)]
pub struct GeocodeConfig {
    pub base_url: String,
    pub user_agent: String,
    /// ISO country code searches are restricted to.
    pub country_code: String,
    /// Suffix appended to the free-text query, e.g. `"USA"`.
    pub query_suffix: Option<String>,
    pub timeout_secs: u64,
}

impl Default for GeocodeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            country_code: "us".to_string(),
            query_suffix: Some("USA".to_string()),
            timeout_secs: 10,
        }
    }
}

impl GeocodeConfig {
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }
}

/// Resolves place names to coordinates.
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    http: reqwest::Client,
    config: GeocodeConfig,
}

impl GeocodeClient {
    pub fn new(config: GeocodeConfig) -> Result<Self, RouteServiceError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    fn query_for(&self, place: &str) -> String {
        match &self.config.query_suffix {
            Some(suffix) => format!("{place}, {suffix}"),
            None => place.to_string(),
        }
    }

    /// Look up the best match for `place`.
    pub async fn locate(&self, place: &str) -> Result<Coordinates, RouteServiceError> {
        let url = format!("{}/search", self.config.base_url.trim_end_matches('/'));
        let query = self.query_for(place);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("q", query.as_str()),
                ("format", "json"),
                ("limit", "1"),
                ("countrycodes", self.config.country_code.as_str()),
            ])
            .send()
            .await?;

        let body = super::client::read_success_body(response).await?;
        let hits: Vec<GeocodeHit> =
            serde_json::from_str(&body).map_err(|e| RouteServiceError::json(e, &body))?;

        let hit = hits
            .first()
            .ok_or_else(|| RouteServiceError::PlaceNotFound(place.to_string()))?;
        debug!(place, matched = %hit.display_name, "geocoded");

        coordinates_from_hit(hit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = GeocodeConfig::default();
        assert_eq!(config.country_code, "us");
        assert!(config.user_agent.starts_with("fuel-server/"));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn query_suffix() {
        let client = GeocodeClient::new(GeocodeConfig::default()).unwrap();
        assert_eq!(client.query_for("chicago, il"), "chicago, il, USA");

        let plain = GeocodeClient::new(GeocodeConfig {
            query_suffix: None,
            ..GeocodeConfig::default()
        })
        .unwrap();
        assert_eq!(plain.query_for("chicago, il"), "chicago, il");
    }
}
