//! HTML page endpoints.
//!
//! - GET /                    - search forms with a bounded date picker
//! - GET /results             - current conditions for a city
//! - GET /forecast_results    - forecast for a city and date
//! - GET /historical_results  - historical conditions with min/max temps

use axum::extract::{Query, State};
use axum::response::Html;
use chrono::Local;
use serde::Deserialize;
use std::sync::Arc;

use crate::errors::AppError;
use crate::render::TemplateRenderer;
use crate::services::geocode::GeocodeClient;
use crate::services::presenter;
use crate::services::weather::{Units, WeatherClient};

/// Shared application state. Both clients are cheap clones around a
/// `reqwest::Client`; nothing here is mutable across requests.
#[derive(Clone)]
pub struct AppState {
    pub geocoder: GeocodeClient,
    pub weather: WeatherClient,
    pub renderer: Arc<TemplateRenderer>,
}

#[derive(Debug, Deserialize)]
pub struct CurrentQuery {
    pub city: String,
    pub units: String,
}

#[derive(Debug, Deserialize)]
pub struct DatedQuery {
    pub city: String,
    pub units: String,
    pub date: String,
}

/// Home page with the search forms and the historical date-picker bounds.
pub async fn home(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let context = presenter::home_context(Local::now());
    Ok(Html(state.renderer.render("home", &context)?))
}

/// Current conditions for a city.
pub async fn results(
    State(state): State<AppState>,
    Query(query): Query<CurrentQuery>,
) -> Result<Html<String>, AppError> {
    let units = Units::from_param(&query.units);
    let (lat, lon) = state.geocoder.resolve(&query.city).await;
    tracing::debug!("Resolved '{}' to ({}, {})", query.city, lat, lon);

    let body = state.weather.current(lat, lon, units).await?;
    let context = presenter::current_context(&body, units, Local::now())?;
    Ok(Html(state.renderer.render("results", &context)?))
}

/// Forecast for a city anchored at a date.
pub async fn forecast_results(
    State(state): State<AppState>,
    Query(query): Query<DatedQuery>,
) -> Result<Html<String>, AppError> {
    let units = Units::from_param(&query.units);
    let date = presenter::parse_request_date(&query.date)?;
    let (lat, lon) = state.geocoder.resolve(&query.city).await;

    let body = state.weather.forecast(lat, lon, units, date).await?;
    let context = presenter::forecast_context(&body, units, &query.city, date)?;
    Ok(Html(state.renderer.render("forecast_results", &context)?))
}

/// Historical conditions for a city on a past date.
pub async fn historical_results(
    State(state): State<AppState>,
    Query(query): Query<DatedQuery>,
) -> Result<Html<String>, AppError> {
    let units = Units::from_param(&query.units);
    let date = presenter::parse_request_date(&query.date)?;
    let (lat, lon) = state.geocoder.resolve(&query.city).await;

    let body = state.weather.historical(lat, lon, units, date).await?;
    let context = presenter::historical_context(&body, units, &query.city, date, lat, lon)?;
    Ok(Html(state.renderer.render("historical_results", &context)?))
}
