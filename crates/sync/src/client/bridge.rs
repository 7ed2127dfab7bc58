//! HTTP client for the bridge's query service.

use agrolink_core::protocol::{DataResponse, PATH_DATA, STATUS_SUCCESS};
use agrolink_core::snapshot::SensorSnapshot;
use async_trait::async_trait;

use super::{ensure_success, SensorFeed};
use crate::error::{ClientError, SyncError};

pub struct BridgeClient {
    client: reqwest::Client,
    base_url: String,
}

impl BridgeClient {
    /// * `base_url` - e.g. `http://127.0.0.1:5000`, without trailing slash.
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    async fn fetch_data(&self) -> Result<SensorSnapshot, ClientError> {
        let response = self
            .client
            .get(format!("{}{PATH_DATA}", self.base_url))
            .send()
            .await?;
        let body: DataResponse = ensure_success(response)?.json().await?;

        if body.status != STATUS_SUCCESS {
            return Err(ClientError::InvalidResponse(format!(
                "bridge status was {:?}",
                body.status
            )));
        }
        Ok(body.data)
    }
}

#[async_trait]
impl SensorFeed for BridgeClient {
    async fn snapshot(&self) -> Result<SensorSnapshot, SyncError> {
        self.fetch_data().await.map_err(SyncError::BridgeUnavailable)
    }
}
