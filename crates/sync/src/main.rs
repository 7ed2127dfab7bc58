//! `agrolink-sync` -- forwards bridge readings to the system-of-record.
//!
//! Polls the bridge on the sync interval announced by the system-of-record,
//! checks each snapshot against the active plant profile, and posts the
//! readings upstream. See [`SyncConfig::from_env`] for the environment
//! variables.

use std::sync::Arc;

use agrolink_sync::client::{http_client, BridgeClient, RecordClient};
use agrolink_sync::config::SyncConfig;
use agrolink_sync::sync_loop::{LoopSettings, SyncLoop};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agrolink_sync=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = SyncConfig::from_env();
    tracing::info!(
        bridge_url = %config.bridge_url,
        plant_api_url = %config.plant_api_url,
        interval_api_url = %config.interval_api_url,
        "Loaded sync configuration",
    );

    // --- Clients ---
    let client = match http_client(config.http_timeout) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build HTTP client");
            std::process::exit(1);
        }
    };
    let feed = BridgeClient::new(client.clone(), &config.bridge_url);
    let record = Arc::new(RecordClient::new(
        client,
        &config.plant_api_url,
        &config.interval_api_url,
    ));

    // --- Startup ---
    let settings = LoopSettings {
        default_interval: config.default_interval,
        interval_refresh: config.interval_refresh,
        profile_refresh: config.profile_refresh,
    };
    // The record serves both configuration and ingest.
    let sync = match SyncLoop::start(feed, Arc::clone(&record), record, settings).await {
        Ok(sync) => sync,
        Err(e) => {
            tracing::error!(error = %e, "No active plant profile, cannot start");
            std::process::exit(1);
        }
    };

    // --- Run until signalled ---
    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        signal_cancel.cancel();
    });

    sync.run(cancel).await;
    tracing::info!("Graceful shutdown complete");
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
            tracing::info!("Received SIGINT (Ctrl-C), starting shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}
