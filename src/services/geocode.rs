//! Forward geocoding: convert a free-text place name to coordinates.
//! Uses Nominatim (OpenStreetMap) - free, no API key required.

use serde::Deserialize;

/// Coordinates returned when a place name cannot be resolved. Downstream
/// weather lookups still run against this placeholder location.
const DEFAULT_COORDS: (f64, f64) = (0.0, 0.0);

/// Client for the Nominatim search API.
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    client: reqwest::Client,
    base_url: String,
}

/// Nominatim search hit. Coordinates are returned as strings.
#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

impl GeocodeClient {
    /// The base URL comes from configuration so tests can point at a mock
    /// server.
    pub fn new(user_agent: &str, base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .expect("Failed to build HTTP client");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Resolve a city name to (latitude, longitude).
    ///
    /// Degrades to (0, 0) on any failure: no match, provider error, or a
    /// response we cannot parse. Callers never see an error from here.
    /// No retries, no caching.
    pub async fn resolve(&self, city: &str) -> (f64, f64) {
        let url = format!("{}/search", self.base_url);

        let response = match self
            .client
            .get(&url)
            .query(&[("q", city), ("format", "json"), ("limit", "1")])
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("Geocoding request failed for '{}': {}", city, e);
                return DEFAULT_COORDS;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(
                "Geocoder returned HTTP {} for '{}'",
                response.status(),
                city
            );
            return DEFAULT_COORDS;
        }

        let hits: Vec<SearchHit> = match response.json().await {
            Ok(h) => h,
            Err(e) => {
                tracing::warn!("Geocoder response parse error for '{}': {}", city, e);
                return DEFAULT_COORDS;
            }
        };

        let Some(hit) = hits.first() else {
            tracing::info!("No geocoding match for '{}'", city);
            return DEFAULT_COORDS;
        };

        match (hit.lat.parse::<f64>(), hit.lon.parse::<f64>()) {
            (Ok(lat), Ok(lon)) => (lat, lon),
            _ => {
                tracing::warn!(
                    "Geocoder returned non-numeric coordinates for '{}': ({}, {})",
                    city,
                    hit.lat,
                    hit.lon
                );
                DEFAULT_COORDS
            }
        }
    }
}
