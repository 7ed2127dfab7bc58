use agrolink_core::protocol::{DataResponse, SensorDataResponse, PATH_DATA, STATUS_SUCCESS};
use agrolink_core::sensor::SensorKind;
use axum::extract::{Path, State};
use axum::{routing::get, Json, Router};
use chrono::Utc;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /data
async fn all_readings(State(state): State<AppState>) -> Json<DataResponse> {
    Json(DataResponse {
        status: STATUS_SUCCESS.to_string(),
        data: state.cache.snapshot(),
        timestamp: Utc::now(),
    })
}

/// GET /data/{name}
async fn one_reading(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<SensorDataResponse>> {
    let sensor_type: SensorKind = name.parse()?;

    Ok(Json(SensorDataResponse {
        status: STATUS_SUCCESS.to_string(),
        sensor_type,
        data: state.cache.reading(sensor_type),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(PATH_DATA, get(all_readings))
        .route(&format!("{PATH_DATA}/{{name}}"), get(one_reading))
}
