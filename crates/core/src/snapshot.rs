//! Point-in-time view of every sensor.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::CoreError;
use crate::sensor::{SensorKind, SensorReading};

/// One reading per [`SensorKind`], always exactly three entries.
///
/// Serializes as a JSON object keyed by sensor wire name. When
/// deserializing, unknown keys are dropped and missing sensors are filled
/// in as offline so the three-key shape holds on both sides of the wire.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "BTreeMap<String, SensorReading>")]
pub struct SensorSnapshot {
    readings: BTreeMap<SensorKind, SensorReading>,
}

/// The three values of a complete snapshot.
///
/// This is also the body of the sync POST to the system-of-record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorValues {
    pub temperature: f64,
    pub humidity: f64,
    pub soil_moisture: f64,
}

impl SensorSnapshot {
    /// All sensors offline.
    pub fn new() -> Self {
        Self {
            readings: SensorKind::ALL
                .into_iter()
                .map(|kind| (kind, SensorReading::offline()))
                .collect(),
        }
    }

    pub fn get(&self, kind: SensorKind) -> &SensorReading {
        // Every kind is inserted at construction and never removed.
        &self.readings[&kind]
    }

    pub fn set(&mut self, kind: SensorKind, reading: SensorReading) {
        self.readings.insert(kind, reading);
    }

    pub fn iter(&self) -> impl Iterator<Item = (SensorKind, &SensorReading)> {
        self.readings.iter().map(|(kind, reading)| (*kind, reading))
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Sensors whose value is currently absent.
    pub fn missing(&self) -> Vec<SensorKind> {
        self.iter()
            .filter(|(_, reading)| reading.value.is_none())
            .map(|(kind, _)| kind)
            .collect()
    }

    /// Extract all three values, or fail if any is absent.
    pub fn values(&self) -> Result<SensorValues, CoreError> {
        let value = |kind| self.get(kind).value;
        match (
            value(SensorKind::Temperature),
            value(SensorKind::Humidity),
            value(SensorKind::SoilMoisture),
        ) {
            (Some(temperature), Some(humidity), Some(soil_moisture)) => Ok(SensorValues {
                temperature,
                humidity,
                soil_moisture,
            }),
            _ => Err(CoreError::IncompleteSnapshot {
                missing: self.missing(),
            }),
        }
    }
}

impl Default for SensorSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

impl From<BTreeMap<String, SensorReading>> for SensorSnapshot {
    fn from(raw: BTreeMap<String, SensorReading>) -> Self {
        let mut snapshot = Self::new();
        for (name, reading) in raw {
            if let Ok(kind) = name.parse::<SensorKind>() {
                snapshot.set(kind, reading);
            }
        }
        snapshot
    }
}

impl Serialize for SensorSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.readings.serialize(serializer)
    }
}
