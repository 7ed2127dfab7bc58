//! Collaborators of the sync loop.
//!
//! The loop talks to three remote roles through these traits. The HTTP
//! implementations live in the submodules; tests substitute in-memory
//! fakes.

pub mod bridge;
pub mod record;

use std::sync::Arc;
use std::time::Duration;

use agrolink_core::protocol::SyncResponse;
use agrolink_core::snapshot::{SensorSnapshot, SensorValues};
use agrolink_core::thresholds::ActiveProfile;
use async_trait::async_trait;

use crate::error::{ClientError, SyncError};

pub use bridge::BridgeClient;
pub use record::RecordClient;

/// A sync interval as announced by the config provider.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalSetting {
    pub interval: Duration,
    /// Human-readable form, e.g. `5m`.
    pub display: Option<String>,
}

/// Source of sensor snapshots (the bridge's query service).
#[async_trait]
pub trait SensorFeed: Send + Sync {
    /// Current reading of every sensor. Fails with
    /// [`SyncError::BridgeUnavailable`].
    async fn snapshot(&self) -> Result<SensorSnapshot, SyncError>;
}

/// Remote configuration. Both calls are idempotent reads and fail with
/// [`SyncError::ConfigUnavailable`].
#[async_trait]
pub trait ConfigProvider: Send + Sync {
    async fn fetch_sync_interval(&self) -> Result<IntervalSetting, SyncError>;

    async fn fetch_active_profile(&self) -> Result<ActiveProfile, SyncError>;
}

/// The system-of-record's ingest endpoint. Fails with
/// [`SyncError::SyncTargetUnavailable`].
#[async_trait]
pub trait SyncTarget: Send + Sync {
    async fn push(&self, values: SensorValues) -> Result<SyncResponse, SyncError>;
}

#[async_trait]
impl<T: SensorFeed + ?Sized> SensorFeed for Arc<T> {
    async fn snapshot(&self) -> Result<SensorSnapshot, SyncError> {
        (**self).snapshot().await
    }
}

#[async_trait]
impl<T: ConfigProvider + ?Sized> ConfigProvider for Arc<T> {
    async fn fetch_sync_interval(&self) -> Result<IntervalSetting, SyncError> {
        (**self).fetch_sync_interval().await
    }

    async fn fetch_active_profile(&self) -> Result<ActiveProfile, SyncError> {
        (**self).fetch_active_profile().await
    }
}

#[async_trait]
impl<T: SyncTarget + ?Sized> SyncTarget for Arc<T> {
    async fn push(&self, values: SensorValues) -> Result<SyncResponse, SyncError> {
        (**self).push(values).await
    }
}

/// Ensure the response has a success status code.
pub(crate) fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ClientError::HttpStatus(status.as_u16()));
    }
    Ok(response)
}

/// Build a [`reqwest::Client`] with the per-call timeout applied.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client, ClientError> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}
