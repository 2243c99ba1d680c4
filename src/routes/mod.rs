pub mod graph;
pub mod pages;

use axum::routing::get;
use axum::Router;

use pages::AppState;

/// Build the site router. Shared by `main` and the route tests.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/results", get(pages::results))
        .route("/forecast_results", get(pages::forecast_results))
        .route("/historical_results", get(pages::historical_results))
        .route("/graph/:lat/:lon/:units/:date", get(graph::graph))
        .with_state(state)
}
