//! `agrolink-bridge` -- sensor board bridge.
//!
//! Reads sensor lines from a serial board (or simulates them when no board
//! is configured), caches the latest value per sensor, and serves the cache
//! over HTTP for the sync agent and operator tooling.
//!
//! See [`BridgeConfig::from_env`] for the environment variables.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use agrolink_bridge::cache::SensorCache;
use agrolink_bridge::config::BridgeConfig;
use agrolink_bridge::ingest::{IngestionLoop, Mode};
use agrolink_bridge::router::build_app_router;
use agrolink_bridge::simulate::Simulator;
use agrolink_bridge::source::{SerialSettings, SerialSource};
use agrolink_bridge::state::{AppState, SourceInfo};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// How long to wait for the ingestion thread after the server stops.
const INGESTION_STOP_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agrolink_bridge=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = BridgeConfig::from_env();
    tracing::info!(host = %config.host, port = config.port, "Loaded bridge configuration");

    // --- Source ---
    let mode = match config.serial.clone() {
        Some(settings) => open_source(settings).await,
        None => {
            tracing::info!("SERIAL_PORT not set, running in simulation mode");
            Mode::Simulated
        }
    };
    let source = Arc::new(SourceInfo::from(&mode));

    // --- Ingestion ---
    let cache = SensorCache::new();
    let simulator = Arc::new(Simulator::default());
    let cancel = CancellationToken::new();

    let ingestion = IngestionLoop::new(cache.clone(), mode, Arc::clone(&simulator), config.tick);
    let ingestion_cancel = cancel.clone();
    let ingestion_handle = tokio::task::spawn_blocking(move || ingestion.run(ingestion_cancel));

    // --- Router ---
    let state = AppState {
        cache,
        simulator,
        source,
    };
    let app = build_app_router(state, Duration::from_secs(config.request_timeout_secs));

    // --- Start server ---
    let addr = match config.host.parse() {
        Ok(ip) => SocketAddr::new(ip, config.port),
        Err(e) => {
            tracing::error!(host = %config.host, error = %e, "Invalid HOST address");
            std::process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "Failed to bind");
            std::process::exit(1);
        }
    };
    tracing::info!(%addr, "Bridge listening");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "Server error");
    }

    // --- Post-shutdown cleanup ---
    cancel.cancel();
    if tokio::time::timeout(INGESTION_STOP_TIMEOUT, ingestion_handle)
        .await
        .is_err()
    {
        tracing::warn!("Ingestion loop did not stop in time");
    }

    tracing::info!("Graceful shutdown complete");
}

/// Open the serial device, falling back to simulation if it is unavailable.
async fn open_source(settings: SerialSettings) -> Mode {
    let path = settings.path.clone();
    match tokio::task::spawn_blocking(move || SerialSource::open(&settings)).await {
        Ok(Ok(source)) => Mode::Live(Box::new(source)),
        Ok(Err(e)) => {
            tracing::warn!(%path, error = %e, "Serial device not available, running in simulation mode");
            Mode::Simulated
        }
        Err(e) => {
            tracing::error!(%path, error = %e, "Serial open task failed, running in simulation mode");
            Mode::Simulated
        }
    }
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
