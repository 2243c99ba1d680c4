// Skycast v0.1 - server-rendered weather lookup site
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod errors;
mod render;
mod routes;
mod services;

use config::AppConfig;
use render::TemplateRenderer;
use routes::pages::AppState;
use services::geocode::GeocodeClient;
use services::weather::WeatherClient;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skycast=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let renderer = match TemplateRenderer::new() {
        Ok(r) => Arc::new(r),
        Err(e) => {
            tracing::error!("Failed to compile templates: {}", e);
            std::process::exit(1);
        }
    };

    // Build shared application state; the API key lives inside the weather
    // client, nothing reads it from the environment after this point.
    let state = AppState {
        geocoder: GeocodeClient::new(
            &config.geocoder_user_agent,
            &config.geocoder_base_url,
        ),
        weather: WeatherClient::new(&config.api_key, &config.weather_base_url),
        renderer,
    };

    let app = routes::app(state).layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Skycast listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind TCP listener");
    axum::serve(listener, app)
        .await
        .expect("Server terminated unexpectedly");
}
