//! Synthetic readings for running without a physical source.

use std::ops::RangeInclusive;

use agrolink_core::sensor::{SensorKind, SensorReading};
use agrolink_core::snapshot::SensorSnapshot;
use chrono::Utc;
use rand::Rng;

use crate::cache::SensorCache;

/// Draws one value per sensor, uniformly within a realistic range, rounded
/// to one decimal place.
#[derive(Debug, Clone)]
pub struct Simulator {
    pub temperature: RangeInclusive<f64>,
    pub humidity: RangeInclusive<f64>,
    pub soil_moisture: RangeInclusive<f64>,
}

impl Default for Simulator {
    fn default() -> Self {
        Self {
            temperature: 20.0..=30.0,
            humidity: 60.0..=80.0,
            soil_moisture: 40.0..=60.0,
        }
    }
}

impl Simulator {
    pub fn range(&self, kind: SensorKind) -> &RangeInclusive<f64> {
        match kind {
            SensorKind::Temperature => &self.temperature,
            SensorKind::Humidity => &self.humidity,
            SensorKind::SoilMoisture => &self.soil_moisture,
        }
    }

    /// Draw one value for every sensor.
    pub fn generate(&self) -> [(SensorKind, f64); 3] {
        let mut rng = rand::rng();
        SensorKind::ALL.map(|kind| {
            let value = rng.random_range(self.range(kind).clone());
            (kind, round_tenths(value))
        })
    }

    /// Write one simulated reading per sensor and return the resulting
    /// snapshot.
    pub fn apply(&self, cache: &SensorCache) -> SensorSnapshot {
        let now = Utc::now();
        let values = self.generate();
        let mut result = SensorSnapshot::new();
        cache.update(|snapshot| {
            for (kind, value) in values {
                snapshot.set(kind, SensorReading::simulated(value, now));
            }
            result = snapshot.clone();
        });
        result
    }
}

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
