//! Sensor identities, liveness states, and the cached reading type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// The fixed set of physical quantities the bridge knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    Temperature,
    Humidity,
    SoilMoisture,
}

impl SensorKind {
    /// Every sensor, in reporting order.
    pub const ALL: [SensorKind; 3] = [
        SensorKind::Temperature,
        SensorKind::Humidity,
        SensorKind::SoilMoisture,
    ];

    /// Wire name, as used in JSON keys and URL paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            SensorKind::Temperature => "temperature",
            SensorKind::Humidity => "humidity",
            SensorKind::SoilMoisture => "soil_moisture",
        }
    }

    /// Human-readable label for log lines.
    pub fn label(&self) -> &'static str {
        match self {
            SensorKind::Temperature => "Temperature",
            SensorKind::Humidity => "Humidity",
            SensorKind::SoilMoisture => "Soil Moisture",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            SensorKind::Temperature => "°C",
            SensorKind::Humidity | SensorKind::SoilMoisture => "%",
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SensorKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SensorKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CoreError::UnknownSensor(s.to_string()))
    }
}

/// Liveness of a cached reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorStatus {
    /// Read from an attached source.
    Online,
    /// Nothing has been read yet.
    Offline,
    /// Generated because no source is attached.
    Simulated,
    /// The source failed on the most recent read.
    Error,
}

/// The latest known state of one sensor.
///
/// Readings are built through the constructors below so that an `offline`
/// reading never carries a value. An `error` reading keeps whatever value
/// and timestamp the sensor had before the fault, which may be none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub value: Option<f64>,
    pub timestamp: Option<Timestamp>,
    pub status: SensorStatus,
}

impl SensorReading {
    /// The state every sensor starts in.
    pub fn offline() -> Self {
        Self {
            value: None,
            timestamp: None,
            status: SensorStatus::Offline,
        }
    }

    pub fn online(value: f64, at: Timestamp) -> Self {
        Self {
            value: Some(value),
            timestamp: Some(at),
            status: SensorStatus::Online,
        }
    }

    pub fn simulated(value: f64, at: Timestamp) -> Self {
        Self {
            value: Some(value),
            timestamp: Some(at),
            status: SensorStatus::Simulated,
        }
    }

    /// Same value and timestamp, status flipped to `error`.
    pub fn into_error(self) -> Self {
        Self {
            status: SensorStatus::Error,
            ..self
        }
    }
}

impl Default for SensorReading {
    fn default() -> Self {
        Self::offline()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Utc;

    use super::*;

    #[test]
    fn parses_wire_names() {
        assert_eq!("temperature".parse::<SensorKind>(), Ok(SensorKind::Temperature));
        assert_eq!("humidity".parse::<SensorKind>(), Ok(SensorKind::Humidity));
        assert_eq!(
            "soil_moisture".parse::<SensorKind>(),
            Ok(SensorKind::SoilMoisture)
        );
    }

    #[test]
    fn rejects_unknown_names() {
        assert_matches!(
            "pressure".parse::<SensorKind>(),
            Err(CoreError::UnknownSensor(name)) if name == "pressure"
        );
        // Wire names are case sensitive.
        assert!("Temperature".parse::<SensorKind>().is_err());
    }

    #[test]
    fn serde_names_match_as_str() {
        for kind in SensorKind::ALL {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, kind.as_str());
        }
    }

    #[test]
    fn offline_reading_has_no_value() {
        let reading = SensorReading::offline();
        assert_eq!(reading.value, None);
        assert_eq!(reading.timestamp, None);
        assert_eq!(reading.status, SensorStatus::Offline);
    }

    #[test]
    fn into_error_keeps_value_and_timestamp() {
        let at = Utc::now();
        let reading = SensorReading::online(21.5, at).into_error();
        assert_eq!(reading.value, Some(21.5));
        assert_eq!(reading.timestamp, Some(at));
        assert_eq!(reading.status, SensorStatus::Error);
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_value(SensorReading::offline()).unwrap();
        assert_eq!(json["status"], "offline");
        assert!(json["value"].is_null());
    }
}
