//! Chart image endpoint.
//!
//! GET /graph/:lat/:lon/:units/:date - hourly temperatures for a past day,
//! rendered as a PNG line chart.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::errors::AppError;
use crate::routes::pages::AppState;
use crate::services::chart;
use crate::services::presenter;
use crate::services::weather::Units;

pub async fn graph(
    State(state): State<AppState>,
    Path((lat, lon, units, date)): Path<(f64, f64, String, String)>,
) -> Result<Response, AppError> {
    let units = Units::from_param(&units);
    let date = presenter::parse_request_date(&date)?;

    let body = state.weather.historical(lat, lon, units, date).await?;
    let temps = presenter::hourly_temps(&body)?;
    let hours: Vec<f64> = (0..temps.len()).map(|h| h as f64).collect();

    let png = chart::render_chart(
        &hours,
        &temps,
        "Hour",
        &format!("Temperature ({})", units.letter()),
    )?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
}
