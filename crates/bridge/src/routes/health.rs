use agrolink_core::protocol::{HealthResponse, PATH_HEALTH};
use axum::extract::State;
use axum::{routing::get, Json, Router};

use crate::state::AppState;

/// GET /health -- returns service status and which source feeds the cache.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let mode = if state.source.attached { "live" } else { "simulated" };

    Json(HealthResponse {
        status: "healthy".to_string(),
        source_attached: state.source.attached,
        source: state.source.identifier.clone(),
        mode: mode.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route(PATH_HEALTH, get(health_check))
}
