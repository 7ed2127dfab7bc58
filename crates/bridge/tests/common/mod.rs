use std::sync::Arc;
use std::time::Duration;

use agrolink_bridge::cache::SensorCache;
use agrolink_bridge::router::build_app_router;
use agrolink_bridge::simulate::Simulator;
use agrolink_bridge::state::{AppState, SourceInfo};
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Build the full application router around `cache`, in simulated mode.
///
/// Uses the same builder as `main.rs` so tests exercise the production
/// middleware stack.
pub fn build_test_app(cache: SensorCache) -> Router {
    build_test_app_with_source(cache, SourceInfo::simulated())
}

pub fn build_test_app_with_source(cache: SensorCache, source: SourceInfo) -> Router {
    let state = AppState {
        cache,
        simulator: Arc::new(Simulator::default()),
        source: Arc::new(source),
    };
    build_app_router(state, Duration::from_secs(10))
}

pub async fn send(app: Router, method: Method, uri: &str) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri).await
}

pub async fn post(app: Router, uri: &str) -> Response {
    send(app, Method::POST, uri).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
