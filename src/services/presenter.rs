//! Presentation mapping: provider JSON in, template context out.
//!
//! Pure functions, no I/O. Field names in the produced contexts are a
//! contract with the templates and must not change.
//!
//! Timestamp formatting is intentionally uneven: the current-conditions page
//! shows sunrise/sunset as UTC wall clock, while the forecast and historical
//! pages use server-local time. Unifying the two is pending a product
//! decision; don't quietly change one side.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::services::weather::Units;

/// How many days back the historical date picker reaches.
const HISTORY_WINDOW_DAYS: i64 = 5;

fn malformed(what: &str) -> AppError {
    AppError::UpstreamMalformed(format!("missing or invalid field `{}`", what))
}

fn get<'a>(v: &'a Value, key: &str) -> Result<&'a Value, AppError> {
    v.get(key).ok_or_else(|| malformed(key))
}

fn get_f64(v: &Value, key: &str) -> Result<f64, AppError> {
    get(v, key)?.as_f64().ok_or_else(|| malformed(key))
}

fn get_i64(v: &Value, key: &str) -> Result<i64, AppError> {
    get(v, key)?.as_i64().ok_or_else(|| malformed(key))
}

fn get_str<'a>(v: &'a Value, key: &str) -> Result<&'a str, AppError> {
    get(v, key)?.as_str().ok_or_else(|| malformed(key))
}

fn get_array<'a>(v: &'a Value, key: &str) -> Result<&'a Vec<Value>, AppError> {
    get(v, key)?.as_array().ok_or_else(|| malformed(key))
}

/// First entry of the provider's `weather` array (description + icon).
fn weather_entry(v: &Value) -> Result<&Value, AppError> {
    get(v, "weather")?.get(0).ok_or_else(|| malformed("weather[0]"))
}

fn format_utc(ts: i64, fmt: &str) -> Result<String, AppError> {
    DateTime::<Utc>::from_timestamp(ts, 0)
        .map(|dt| dt.format(fmt).to_string())
        .ok_or_else(|| malformed("timestamp"))
}

fn format_local(ts: i64, fmt: &str) -> Result<String, AppError> {
    Local
        .timestamp_opt(ts, 0)
        .single()
        .map(|dt| dt.format(fmt).to_string())
        .ok_or_else(|| malformed("timestamp"))
}

/// Parse a `%Y-%m-%d` request parameter.
pub fn parse_request_date(s: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| AppError::InvalidInput(format!("invalid date `{}`: {}", s, e)))
}

/// Minimum temperature across an hourly series.
///
/// Errors on an empty series or an entry without a numeric `temp`.
pub fn min_temp(hourly: &[Value]) -> Result<f64, AppError> {
    let first = hourly
        .first()
        .ok_or_else(|| AppError::UpstreamMalformed("empty hourly series".to_string()))?;
    let mut min = get_f64(first, "temp")?;
    for entry in hourly {
        let t = get_f64(entry, "temp")?;
        if t < min {
            min = t;
        }
    }
    Ok(min)
}

/// Maximum temperature across an hourly series.
///
/// Uses `>=` where `min_temp` uses `<`. The asymmetry has no observable
/// effect on numeric temperatures; keep it in case tie-break semantics
/// were intended.
pub fn max_temp(hourly: &[Value]) -> Result<f64, AppError> {
    let first = hourly
        .first()
        .ok_or_else(|| AppError::UpstreamMalformed("empty hourly series".to_string()))?;
    let mut max = get_f64(first, "temp")?;
    for entry in hourly {
        let t = get_f64(entry, "temp")?;
        if t >= max {
            max = t;
        }
    }
    Ok(max)
}

/// Temperatures of the hourly series in provider order, for charting.
pub fn hourly_temps(body: &Value) -> Result<Vec<f64>, AppError> {
    get_array(body, "hourly")?
        .iter()
        .map(|entry| get_f64(entry, "temp"))
        .collect()
}

/// One formatted weekday string per daily entry, provider order preserved.
pub fn day_list(days: &[Value]) -> Result<Vec<String>, AppError> {
    days.iter()
        .map(|day| format_local(get_i64(day, "dt")?, "%A, %B %d, %Y"))
        .collect()
}

/// Context for the home page date picker: today and today minus the
/// historical window, formatted for an HTML date input.
pub fn home_context(now: DateTime<Local>) -> Value {
    json!({
        "min_date": (now - chrono::Duration::days(HISTORY_WINDOW_DAYS))
            .format("%Y-%m-%d")
            .to_string(),
        "max_date": now.format("%Y-%m-%d").to_string(),
    })
}

/// Context for the current-conditions page.
///
/// The city name comes from the provider response, not the user's input.
/// Sunrise/sunset are UTC wall clock here (see module docs).
pub fn current_context(
    body: &Value,
    units: Units,
    now: DateTime<Local>,
) -> Result<Value, AppError> {
    let entry = weather_entry(body)?;
    let main = get(body, "main")?;
    let sys = get(body, "sys")?;

    Ok(json!({
        "date": now.format("%Y-%m-%d %H:%M").to_string(),
        "city": get_str(body, "name")?,
        "description": get_str(entry, "description")?,
        "temp": get_f64(main, "temp")?,
        "humidity": get_f64(main, "humidity")?,
        "wind_speed": get_f64(get(body, "wind")?, "speed")?,
        "sunrise": format_utc(get_i64(sys, "sunrise")?, "%Y-%m-%d %H:%M %p")?,
        "sunset": format_utc(get_i64(sys, "sunset")?, "%Y-%m-%d %H:%M %p")?,
        "units_letter": units.letter().to_string(),
        "icon": get_str(entry, "icon")?,
    }))
}

/// Context for the forecast page: current conditions at the anchor date plus
/// the formatted day list. Sunrise/sunset are local time here.
pub fn forecast_context(
    body: &Value,
    units: Units,
    city: &str,
    date: NaiveDate,
) -> Result<Value, AppError> {
    let current = get(body, "current")?;
    let entry = weather_entry(current)?;
    let days = get_array(body, "daily")?;

    Ok(json!({
        "date": date.format("%A, %B %d, %Y").to_string(),
        "city": city,
        "description": get_str(entry, "description")?,
        "temp": get_f64(current, "temp")?,
        "humidity": get_f64(current, "humidity")?,
        "wind_speed": get_f64(current, "wind_speed")?,
        "sunrise": format_local(get_i64(current, "sunrise")?, "%I:%M %p")?,
        "sunset": format_local(get_i64(current, "sunset")?, "%I:%M %p")?,
        "units_letter": units.letter().to_string(),
        "icon": get_str(entry, "icon")?,
        "days": days,
        "day_list": day_list(days)?,
    }))
}

/// Context for the historical page: conditions for the requested day plus
/// min/max over the hourly series and a link to the chart endpoint.
pub fn historical_context(
    body: &Value,
    units: Units,
    city: &str,
    date: NaiveDate,
    lat: f64,
    lon: f64,
) -> Result<Value, AppError> {
    let current = get(body, "current")?;
    let entry = weather_entry(current)?;
    let hourly = get_array(body, "hourly")?;

    Ok(json!({
        "city": city,
        "date": date.format("%A, %B %d, %Y").to_string(),
        "lat": lat,
        "lon": lon,
        "units": units.as_query(),
        "units_letter": units.letter().to_string(),
        "description": get_str(entry, "description")?,
        "temp": get_f64(current, "temp")?,
        "min_temp": min_temp(hourly)?,
        "max_temp": max_temp(hourly)?,
        "icon": get_str(entry, "icon")?,
        "sunrise": format_local(get_i64(current, "sunrise")?, "%I:%M %p")?,
        "sunset": format_local(get_i64(current, "sunset")?, "%I:%M %p")?,
        "graph_url": format!(
            "/graph/{}/{}/{}/{}",
            lat,
            lon,
            units.as_query(),
            date.format("%Y-%m-%d")
        ),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hourly(temps: &[f64]) -> Vec<Value> {
        temps.iter().map(|t| json!({ "temp": t })).collect()
    }

    #[test]
    fn test_min_max_temp() {
        let series = hourly(&[5.0, 1.0, 9.0]);
        assert_eq!(min_temp(&series).unwrap(), 1.0);
        assert_eq!(max_temp(&series).unwrap(), 9.0);
    }

    #[test]
    fn test_min_max_temp_single_element() {
        let series = hourly(&[7.5]);
        assert_eq!(min_temp(&series).unwrap(), 7.5);
        assert_eq!(max_temp(&series).unwrap(), 7.5);
    }

    #[test]
    fn test_min_max_temp_empty_series_is_error() {
        assert!(matches!(
            min_temp(&[]).unwrap_err(),
            AppError::UpstreamMalformed(_)
        ));
        assert!(matches!(
            max_temp(&[]).unwrap_err(),
            AppError::UpstreamMalformed(_)
        ));
    }

    #[test]
    fn test_min_temp_missing_field_is_error() {
        let series = vec![json!({ "temp": 5.0 }), json!({ "humidity": 40 })];
        assert!(matches!(
            min_temp(&series).unwrap_err(),
            AppError::UpstreamMalformed(_)
        ));
    }

    #[test]
    fn test_hourly_temps_preserves_order() {
        let body = json!({ "hourly": [
            { "temp": 3.0 }, { "temp": 1.0 }, { "temp": 2.0 }
        ]});
        assert_eq!(hourly_temps(&body).unwrap(), vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_day_list_preserves_order_and_formats() {
        // Three consecutive days at 12:00 UTC, so local formatting never
        // lands on the same calendar day twice regardless of timezone.
        let days = vec![
            json!({ "dt": 1672574400i64 }), // 2023-01-01 12:00 UTC
            json!({ "dt": 1672660800i64 }), // 2023-01-02 12:00 UTC
            json!({ "dt": 1672747200i64 }), // 2023-01-03 12:00 UTC
        ];
        let list = day_list(&days).unwrap();
        assert_eq!(list.len(), 3);
        for formatted in &list {
            // "%A, %B %d, %Y" always contains two comma separators
            assert_eq!(formatted.matches(", ").count(), 2);
        }
        assert_ne!(list[0], list[1]);
        assert_ne!(list[1], list[2]);
    }

    #[test]
    fn test_home_context_spans_five_days() {
        let context = home_context(Local::now());
        let min = parse_request_date(context["min_date"].as_str().unwrap()).unwrap();
        let max = parse_request_date(context["max_date"].as_str().unwrap()).unwrap();
        assert_eq!((max - min).num_days(), 5);
    }

    #[test]
    fn test_parse_request_date() {
        assert_eq!(
            parse_request_date("2023-01-31").unwrap(),
            NaiveDate::from_ymd_opt(2023, 1, 31).unwrap()
        );
        assert!(matches!(
            parse_request_date("31/01/2023").unwrap_err(),
            AppError::InvalidInput(_)
        ));
    }

    #[test]
    fn test_current_context_fields() {
        let body = json!({
            "name": "Paris",
            "weather": [{ "description": "light rain", "icon": "10d" }],
            "main": { "temp": 18.2, "humidity": 81 },
            "wind": { "speed": 4.1 },
            "sys": { "sunrise": 1672552800i64, "sunset": 1672585200i64 }
        });

        let context = current_context(&body, Units::Metric, Local::now()).unwrap();

        assert_eq!(context["city"], "Paris");
        assert_eq!(context["description"], "light rain");
        assert_eq!(context["temp"], 18.2);
        assert_eq!(context["humidity"], 81.0);
        assert_eq!(context["wind_speed"], 4.1);
        assert_eq!(context["units_letter"], "C");
        assert_eq!(context["icon"], "10d");
        // Current page formats sunrise/sunset in UTC wall clock.
        assert_eq!(context["sunrise"], "2023-01-01 06:00 AM");
    }

    #[test]
    fn test_current_context_missing_field_is_malformed() {
        let body = json!({ "name": "Paris", "weather": [] });
        assert!(matches!(
            current_context(&body, Units::Metric, Local::now()).unwrap_err(),
            AppError::UpstreamMalformed(_)
        ));
    }

    #[test]
    fn test_forecast_context_fields() {
        let body = json!({
            "current": {
                "weather": [{ "description": "clear sky", "icon": "01d" }],
                "temp": 21.0,
                "humidity": 40,
                "wind_speed": 2.0,
                "sunrise": 1672552800i64,
                "sunset": 1672585200i64
            },
            "daily": [
                { "dt": 1672574400i64 },
                { "dt": 1672660800i64 }
            ]
        });
        let date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();

        let context = forecast_context(&body, Units::Imperial, "Oslo", date).unwrap();

        assert_eq!(context["city"], "Oslo");
        assert_eq!(context["units_letter"], "F");
        assert_eq!(context["day_list"].as_array().unwrap().len(), 2);
        assert_eq!(context["days"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_historical_context_fields() {
        let body = json!({
            "current": {
                "weather": [{ "description": "overcast clouds", "icon": "04d" }],
                "temp": 10.0,
                "sunrise": 1672552800i64,
                "sunset": 1672585200i64
            },
            "hourly": [
                { "temp": 5.0 }, { "temp": 1.0 }, { "temp": 9.0 }
            ]
        });
        let date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();

        let context =
            historical_context(&body, Units::Metric, "Paris", date, 48.85, 2.35).unwrap();

        assert_eq!(context["min_temp"], 1.0);
        assert_eq!(context["max_temp"], 9.0);
        assert_eq!(context["lat"], 48.85);
        assert_eq!(context["lon"], 2.35);
        assert_eq!(context["units"], "metric");
        assert_eq!(context["graph_url"], "/graph/48.85/2.35/metric/2023-01-01");
    }
}
