use agrolink_core::protocol::{SimulateResponse, PATH_SIMULATE, STATUS_SUCCESS};
use axum::extract::State;
use axum::{routing::post, Json, Router};

use crate::state::AppState;

/// POST /simulate -- force one synthetic update, regardless of mode.
async fn simulate(State(state): State<AppState>) -> Json<SimulateResponse> {
    let data = state.simulator.apply(&state.cache);
    tracing::info!("Simulation data generated on request");

    Json(SimulateResponse {
        status: STATUS_SUCCESS.to_string(),
        message: "Simulation data generated".to_string(),
        data,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route(PATH_SIMULATE, post(simulate))
}
