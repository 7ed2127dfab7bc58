use agrolink_core::error::CoreError;
use agrolink_core::protocol::{ErrorResponse, STATUS_ERROR};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Application-level error type for HTTP handlers.
///
/// Every variant renders as `{ "status": "error", "message": ... }` so
/// callers can branch on `status` the same way for success and failure.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `agrolink_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// No route matched the request path.
    #[error("Route not found: {0}")]
    RouteNotFound(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Core(CoreError::UnknownSensor(name)) => (
                StatusCode::NOT_FOUND,
                format!("Sensor type '{name}' not found"),
            ),
            // No handler returns the other core variants.
            AppError::Core(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            AppError::RouteNotFound(path) => {
                (StatusCode::NOT_FOUND, format!("No route for {path}"))
            }
        };

        let body = ErrorResponse {
            status: STATUS_ERROR.to_string(),
            message,
        };

        (status, axum::Json(body)).into_response()
    }
}
