//! Route service error types.

/// Errors from geocoding and directions lookups.
#[derive(Debug, thiserror::Error)]
pub enum RouteServiceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the JSON we expected. `body` holds a
    /// truncated copy for logging.
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("could not find a location for {0:?}")]
    PlaceNotFound(String),

    #[error("no drivable route from {origin} to {destination}")]
    NoRoute { origin: String, destination: String },

    #[error("invalid route geometry: {0}")]
    InvalidGeometry(String),

    #[error("rate limited by route service")]
    RateLimited,

    #[error("unauthorized (check ORS_API_KEY)")]
    Unauthorized,

    /// Offline fixtures could not be loaded.
    #[error("route fixtures: {0}")]
    Fixture(String),
}

impl RouteServiceError {
    /// True when the lookup failed because of what the caller asked for,
    /// not because the upstream service misbehaved.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::PlaceNotFound(_) | Self::NoRoute { .. })
    }

    pub(crate) fn json(err: serde_json::Error, body: &str) -> Self {
        Self::Json {
            message: err.to_string(),
            body: Some(body.chars().take(500).collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err = RouteServiceError::PlaceNotFound("atlantis".into());
        assert_eq!(err.to_string(), "could not find a location for \"atlantis\"");
        assert!(err.is_not_found());

        let err = RouteServiceError::Api {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");
        assert!(!err.is_not_found());

        let err = RouteServiceError::NoRoute {
            origin: "honolulu, hi".into(),
            destination: "denver, co".into(),
        };
        assert!(err.is_not_found());
        assert!(err.to_string().contains("honolulu, hi"));
    }

    #[test]
    fn json_error_truncates_body() {
        let body = "x".repeat(2000);
        let parse_err = serde_json::from_str::<serde_json::Value>(&body).unwrap_err();
        match RouteServiceError::json(parse_err, &body) {
            RouteServiceError::Json { body: Some(b), .. } => assert_eq!(b.len(), 500),
            other => panic!("unexpected {other:?}"),
        }
    }
}
