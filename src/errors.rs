use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

/// Application error taxonomy.
///
/// Every failure renders the same kind of generic error page; the
/// classification below exists so handlers and logs can tell an unreachable
/// provider apart from a garbled response or a bad request.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Malformed upstream response: {0}")]
    UpstreamMalformed(String),

    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::UpstreamUnavailable(msg) => {
                tracing::warn!("Upstream unavailable: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "The weather provider could not be reached. Please try again later."
                        .to_string(),
                )
            }
            AppError::UpstreamMalformed(msg) => {
                tracing::warn!("Malformed upstream response: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "The weather provider returned an unexpected response.".to_string(),
                )
            }
            AppError::MissingConfiguration(msg) => {
                tracing::error!("Missing configuration: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "The service is misconfigured.".to_string(),
                )
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong.".to_string(),
                )
            }
        };

        let body = format!(
            "<!DOCTYPE html>\n<html>\n<head><title>Skycast - error</title></head>\n\
             <body>\n<h1>{}</h1>\n<p>{}</p>\n<p><a href=\"/\">Back to search</a></p>\n\
             </body>\n</html>\n",
            status.canonical_reason().unwrap_or("Error"),
            message
        );

        (status, Html(body)).into_response()
    }
}
