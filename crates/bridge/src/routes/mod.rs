pub mod data;
pub mod health;
pub mod simulate;

use axum::http::Uri;
use axum::Router;

use crate::error::AppError;
use crate::state::AppState;

/// Build the full route tree.
///
/// ```text
/// /health            GET   source and service status
/// /data              GET   every sensor
/// /data/{name}       GET   one sensor, 404 for unknown names
/// /simulate          POST  force one synthetic update
/// ```
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(data::router())
        .merge(simulate::router())
        .fallback(fallback)
}

async fn fallback(uri: Uri) -> AppError {
    AppError::RouteNotFound(uri.path().to_string())
}
