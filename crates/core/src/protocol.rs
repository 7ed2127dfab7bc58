//! JSON contracts between the bridge, the sync agent, and the
//! system-of-record.
//!
//! The bridge serializes the query-service types and the sync agent
//! deserializes them. The remaining types describe the system-of-record's
//! HTTP endpoints, which this repository only consumes.

use serde::{Deserialize, Serialize};

use crate::sensor::{SensorKind, SensorReading};
use crate::snapshot::{SensorSnapshot, SensorValues};
use crate::thresholds::ActiveProfile;
use crate::types::Timestamp;

/// `status` discriminator on successful bridge responses.
pub const STATUS_SUCCESS: &str = "success";

/// `status` discriminator on failed bridge responses.
pub const STATUS_ERROR: &str = "error";

/// Bridge route paths.
pub const PATH_HEALTH: &str = "/health";
pub const PATH_DATA: &str = "/data";
pub const PATH_SIMULATE: &str = "/simulate";

// ---------------------------------------------------------------------------
// Bridge (query service)
// ---------------------------------------------------------------------------

/// `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub source_attached: bool,
    /// Device path of the attached source, or `simulated`.
    #[serde(rename = "sourceIdentifier")]
    pub source: String,
    /// `live` or `simulated`.
    pub mode: String,
    pub version: String,
}

/// `GET /data`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse {
    pub status: String,
    pub data: SensorSnapshot,
    pub timestamp: Timestamp,
}

/// `GET /data/{name}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorDataResponse {
    pub status: String,
    pub sensor_type: SensorKind,
    pub data: SensorReading,
}

/// `POST /simulate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulateResponse {
    pub status: String,
    pub message: String,
    pub data: SensorSnapshot,
}

/// Body of every bridge error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
}

// ---------------------------------------------------------------------------
// System-of-record
// ---------------------------------------------------------------------------

/// Response of the sync-interval endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct IntervalResponse {
    pub success: bool,
    #[serde(default, deserialize_with = "crate::lenient::optional_number_or_string")]
    pub interval_seconds: Option<i64>,
    #[serde(default)]
    pub interval_minutes: Option<f64>,
    #[serde(default)]
    pub display: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response of the active-profile endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ActiveProfileResponse {
    pub success: bool,
    #[serde(default)]
    pub active_plant: Option<ActiveProfile>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of the sync POST.
pub type SyncRequest = SensorValues;

/// A violation as judged by the system-of-record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoteViolation {
    pub sensor: String,
    pub status: String,
    #[serde(deserialize_with = "crate::lenient::number_or_string")]
    pub current: f64,
    pub range: String,
}

/// Response of the sync POST.
#[derive(Debug, Clone, Deserialize)]
pub struct SyncResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub violations: Vec<RemoteViolation>,
    #[serde(default)]
    pub notification_triggered: bool,
    #[serde(default, deserialize_with = "crate::lenient::optional_number_or_string")]
    pub warning_level: Option<i64>,
    #[serde(default, deserialize_with = "crate::lenient::optional_number_or_string")]
    pub current_violations: Option<i64>,
    #[serde(default, deserialize_with = "crate::lenient::optional_number_or_string")]
    pub consecutive_violations: Option<i64>,
    #[serde(default, deserialize_with = "crate::lenient::optional_number_or_string")]
    pub reading_id: Option<i64>,
}
