//! In-memory stand-ins for the sync loop's collaborators.
//!
//! Each fake is `Clone` over shared state so a test can keep a handle for
//! scripting and inspection after moving a copy into the loop.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use agrolink_core::protocol::SyncResponse;
use agrolink_core::sensor::{SensorKind, SensorReading};
use agrolink_core::snapshot::{SensorSnapshot, SensorValues};
use agrolink_core::thresholds::{ActiveProfile, ThresholdRange};
use agrolink_sync::client::{ConfigProvider, IntervalSetting, SensorFeed, SyncTarget};
use agrolink_sync::error::{ClientError, SyncError};
use async_trait::async_trait;
use chrono::Utc;

pub fn range(min: f64, max: f64) -> ThresholdRange {
    ThresholdRange { min, max }
}

/// Tomato profile: 18-28 °C, 50-80 % humidity, 40-60 % soil moisture.
pub fn tomato_profile() -> ActiveProfile {
    ActiveProfile {
        id: Some(1),
        name: "Tomato".to_string(),
        local_name: "Kamatis".to_string(),
        thresholds: BTreeMap::from([
            (SensorKind::Temperature, range(18.0, 28.0)),
            (SensorKind::Humidity, range(50.0, 80.0)),
            (SensorKind::SoilMoisture, range(40.0, 60.0)),
        ]),
        warning_trigger: Some(3),
    }
}

/// A snapshot with every sensor online.
pub fn online_snapshot(temperature: f64, humidity: f64, soil_moisture: f64) -> SensorSnapshot {
    let now = Utc::now();
    let mut snapshot = SensorSnapshot::new();
    snapshot.set(SensorKind::Temperature, SensorReading::online(temperature, now));
    snapshot.set(SensorKind::Humidity, SensorReading::online(humidity, now));
    snapshot.set(SensorKind::SoilMoisture, SensorReading::online(soil_moisture, now));
    snapshot
}

// --- Sensor feed ---

#[derive(Clone, Default)]
pub struct FakeFeed {
    snapshot: Arc<Mutex<Option<SensorSnapshot>>>,
}

impl FakeFeed {
    pub fn serving(snapshot: SensorSnapshot) -> Self {
        let feed = Self::default();
        feed.set(snapshot);
        feed
    }

    pub fn set(&self, snapshot: SensorSnapshot) {
        *self.snapshot.lock().unwrap() = Some(snapshot);
    }

    /// Make every following call fail as if the bridge were down.
    pub fn go_down(&self) {
        *self.snapshot.lock().unwrap() = None;
    }
}

#[async_trait]
impl SensorFeed for FakeFeed {
    async fn snapshot(&self) -> Result<SensorSnapshot, SyncError> {
        self.snapshot
            .lock()
            .unwrap()
            .clone()
            .ok_or(SyncError::BridgeUnavailable(ClientError::HttpStatus(503)))
    }
}

// --- Config provider ---

#[derive(Clone, Default)]
pub struct FakeConfig {
    interval: Arc<Mutex<Option<Duration>>>,
    profile: Arc<Mutex<Option<ActiveProfile>>>,
    interval_calls: Arc<AtomicUsize>,
    profile_calls: Arc<AtomicUsize>,
}

impl FakeConfig {
    pub fn new(interval: Option<Duration>, profile: Option<ActiveProfile>) -> Self {
        let config = Self::default();
        config.set_interval(interval);
        config.set_profile(profile);
        config
    }

    /// `None` makes the interval endpoint fail.
    pub fn set_interval(&self, interval: Option<Duration>) {
        *self.interval.lock().unwrap() = interval;
    }

    /// `None` makes the profile endpoint fail.
    pub fn set_profile(&self, profile: Option<ActiveProfile>) {
        *self.profile.lock().unwrap() = profile;
    }

    pub fn interval_calls(&self) -> usize {
        self.interval_calls.load(Ordering::SeqCst)
    }

    pub fn profile_calls(&self) -> usize {
        self.profile_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConfigProvider for FakeConfig {
    async fn fetch_sync_interval(&self) -> Result<IntervalSetting, SyncError> {
        self.interval_calls.fetch_add(1, Ordering::SeqCst);
        match *self.interval.lock().unwrap() {
            Some(interval) => Ok(IntervalSetting {
                interval,
                display: None,
            }),
            None => Err(SyncError::ConfigUnavailable(ClientError::HttpStatus(500))),
        }
    }

    async fn fetch_active_profile(&self) -> Result<ActiveProfile, SyncError> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        self.profile.lock().unwrap().clone().ok_or_else(|| {
            SyncError::ConfigUnavailable(ClientError::Rejected("No active plant".to_string()))
        })
    }
}

// --- Sync target ---

#[derive(Clone, Default)]
pub struct FakeTarget {
    pushed: Arc<Mutex<Vec<SensorValues>>>,
    failing: Arc<AtomicBool>,
}

impl FakeTarget {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Every payload received, including those answered with a failure.
    pub fn pushed(&self) -> Vec<SensorValues> {
        self.pushed.lock().unwrap().clone()
    }
}

#[async_trait]
impl SyncTarget for FakeTarget {
    async fn push(&self, values: SensorValues) -> Result<SyncResponse, SyncError> {
        self.pushed.lock().unwrap().push(values);
        if self.failing.load(Ordering::SeqCst) {
            return Err(SyncError::SyncTargetUnavailable(ClientError::HttpStatus(502)));
        }
        Ok(SyncResponse {
            success: true,
            message: Some("Reading saved".to_string()),
            violations: Vec::new(),
            notification_triggered: false,
            warning_level: Some(0),
            current_violations: Some(0),
            consecutive_violations: Some(0),
            reading_id: Some(self.pushed.lock().unwrap().len() as i64),
        })
    }
}
