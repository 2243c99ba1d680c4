//! OpenWeatherMap client.
//!
//! Three query shapes against the provider: current conditions
//! (`/data/2.5/weather`), multi-day forecast (`/data/2.5/onecall`), and
//! historical single-day data (`/data/2.5/onecall/timemachine`).
//!
//! Bodies are returned as raw `serde_json::Value`; field extraction happens
//! in the presenter. Errors are classified (unreachable provider vs.
//! unparseable body) but bodies are not schema-validated here.

use chrono::{Local, NaiveDate, NaiveTime, TimeZone, Utc};
use serde_json::Value;

use crate::errors::AppError;

/// Display unit system. Anything the user sends that isn't a known system
/// falls back to the provider default (Kelvin).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Units {
    Imperial,
    Metric,
    Standard,
}

impl Units {
    pub fn from_param(s: &str) -> Self {
        match s {
            "imperial" => Units::Imperial,
            "metric" => Units::Metric,
            _ => Units::Standard,
        }
    }

    /// Value sent to OpenWeatherMap in the `units` query parameter.
    pub fn as_query(self) -> &'static str {
        match self {
            Units::Imperial => "imperial",
            Units::Metric => "metric",
            Units::Standard => "standard",
        }
    }

    /// Shorthand letter shown next to temperatures.
    pub fn letter(self) -> char {
        match self {
            Units::Imperial => 'F',
            Units::Metric => 'C',
            Units::Standard => 'K',
        }
    }
}

/// Client for the OpenWeatherMap API.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl WeatherClient {
    /// The API key and base URL come from configuration; nothing here reads
    /// ambient process state.
    pub fn new(api_key: &str, base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .expect("Failed to build HTTP client");
        Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Current conditions at the given coordinates.
    pub async fn current(&self, lat: f64, lon: f64, units: Units) -> Result<Value, AppError> {
        self.get_json(
            "/data/2.5/weather",
            &[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("units", units.as_query().to_string()),
            ],
        )
        .await
    }

    /// Multi-day forecast anchored at the given date.
    pub async fn forecast(
        &self,
        lat: f64,
        lon: f64,
        units: Units,
        date: NaiveDate,
    ) -> Result<Value, AppError> {
        self.get_json(
            "/data/2.5/onecall",
            &[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("units", units.as_query().to_string()),
                ("dt", date_to_unix_seconds(date).to_string()),
            ],
        )
        .await
    }

    /// Historical conditions for a single past day.
    pub async fn historical(
        &self,
        lat: f64,
        lon: f64,
        units: Units,
        date: NaiveDate,
    ) -> Result<Value, AppError> {
        self.get_json(
            "/data/2.5/onecall/timemachine",
            &[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("units", units.as_query().to_string()),
                ("dt", date_to_unix_seconds(date).to_string()),
            ],
        )
        .await
    }

    async fn get_json(&self, path: &str, params: &[(&str, String)]) -> Result<Value, AppError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                AppError::UpstreamUnavailable(format!("weather request failed: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(AppError::UpstreamUnavailable(format!(
                "weather provider returned HTTP {}",
                response.status()
            )));
        }

        response.json().await.map_err(|e| {
            AppError::UpstreamMalformed(format!("weather JSON parse error: {}", e))
        })
    }
}

/// Convert a calendar date to Unix seconds at local midnight, matching what
/// the provider expects in the `dt` parameter.
fn date_to_unix_seconds(date: NaiveDate) -> i64 {
    let midnight = date.and_time(NaiveTime::MIN);
    match Local.from_local_datetime(&midnight).earliest() {
        Some(dt) => dt.timestamp(),
        // Local midnight can be skipped by a DST transition; fall back to UTC.
        None => Utc.from_utc_datetime(&midnight).timestamp(),
    }
}
