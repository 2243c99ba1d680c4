use crate::errors::AppError;

/// Application configuration, parsed from environment variables.
///
/// The OpenWeatherMap API key is injected here and threaded into the weather
/// client at construction; no component reads it from ambient process state.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// OpenWeatherMap API key (required).
    pub api_key: String,
    pub port: u16,
    /// User-Agent sent to Nominatim, required by their usage policy.
    pub geocoder_user_agent: String,
    /// OpenWeatherMap base URL, overridable so tests can point at a mock.
    pub weather_base_url: String,
    /// Nominatim base URL, overridable so tests can point at a mock.
    pub geocoder_base_url: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            api_key: std::env::var("API_KEY")
                .map_err(|_| AppError::MissingConfiguration("API_KEY must be set".to_string()))?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| {
                    AppError::MissingConfiguration("PORT must be a valid u16".to_string())
                })?,
            geocoder_user_agent: std::env::var("GEOCODER_USER_AGENT")
                .unwrap_or_else(|_| "Skycast/0.1 weather lookup".to_string()),
            weather_base_url: std::env::var("WEATHER_BASE_URL")
                .unwrap_or_else(|_| "https://api.openweathermap.org".to_string()),
            geocoder_base_url: std::env::var("GEOCODER_BASE_URL")
                .unwrap_or_else(|_| "https://nominatim.openstreetmap.org".to_string()),
        })
    }
}
