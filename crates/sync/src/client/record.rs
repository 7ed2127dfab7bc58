//! HTTP client for the system-of-record.
//!
//! The record exposes two endpoints this agent uses: the interval endpoint,
//! and a plant endpoint that returns the active profile on `GET` and
//! ingests readings on `POST`.

use std::time::Duration;

use agrolink_core::protocol::{ActiveProfileResponse, IntervalResponse, SyncRequest, SyncResponse};
use agrolink_core::snapshot::SensorValues;
use agrolink_core::thresholds::ActiveProfile;
use async_trait::async_trait;

use super::{ensure_success, ConfigProvider, IntervalSetting, SyncTarget};
use crate::error::{ClientError, SyncError};

pub struct RecordClient {
    client: reqwest::Client,
    plant_url: String,
    interval_url: String,
}

impl RecordClient {
    pub fn new(
        client: reqwest::Client,
        plant_url: impl Into<String>,
        interval_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            plant_url: plant_url.into(),
            interval_url: interval_url.into(),
        }
    }

    async fn get_interval(&self) -> Result<IntervalSetting, ClientError> {
        let response = self.client.get(&self.interval_url).send().await?;
        let body: IntervalResponse = ensure_success(response)?.json().await?;

        if !body.success {
            return Err(ClientError::Rejected(
                body.message.unwrap_or_else(|| "interval unavailable".to_string()),
            ));
        }

        match body.interval_seconds {
            Some(secs) if secs > 0 => Ok(IntervalSetting {
                interval: Duration::from_secs(secs.unsigned_abs()),
                display: body.display,
            }),
            other => Err(ClientError::InvalidResponse(format!(
                "interval_seconds must be positive, got {other:?}"
            ))),
        }
    }

    async fn get_profile(&self) -> Result<ActiveProfile, ClientError> {
        let response = self.client.get(&self.plant_url).send().await?;
        let body: ActiveProfileResponse = ensure_success(response)?.json().await?;

        if !body.success {
            return Err(ClientError::Rejected(
                body.message.unwrap_or_else(|| "no active plant".to_string()),
            ));
        }

        body.active_plant
            .ok_or_else(|| ClientError::InvalidResponse("active_plant missing".to_string()))
    }

    async fn post_readings(&self, values: SensorValues) -> Result<SyncResponse, ClientError> {
        let body: SyncRequest = values;
        let response = self.client.post(&self.plant_url).json(&body).send().await?;
        let result: SyncResponse = ensure_success(response)?.json().await?;

        if !result.success {
            return Err(ClientError::Rejected(
                result.message.unwrap_or_else(|| "sync rejected".to_string()),
            ));
        }
        Ok(result)
    }
}

#[async_trait]
impl ConfigProvider for RecordClient {
    async fn fetch_sync_interval(&self) -> Result<IntervalSetting, SyncError> {
        self.get_interval().await.map_err(SyncError::ConfigUnavailable)
    }

    async fn fetch_active_profile(&self) -> Result<ActiveProfile, SyncError> {
        self.get_profile().await.map_err(SyncError::ConfigUnavailable)
    }
}

#[async_trait]
impl SyncTarget for RecordClient {
    async fn push(&self, values: SensorValues) -> Result<SyncResponse, SyncError> {
        self.post_readings(values)
            .await
            .map_err(SyncError::SyncTargetUnavailable)
    }
}
