//! Line parser for the sensor board's serial output.
//!
//! The board prints one human-readable line per measurement, e.g.
//!
//! ```text
//! Temp: 24.5 °C | Humidity: 65.2 % | Soil Moisture: 45 % [SIMULATED]
//! ```
//!
//! interleaved with banner and diagnostic chatter. [`parse_line`] never
//! fails: anything it cannot use simply does not appear in the result.

use std::collections::BTreeMap;

use crate::sensor::SensorKind;

/// Substrings that mark a line as diagnostic or banner output.
const DIAGNOSTIC_MARKERS: &[&str] = &[
    "DHT read error",
    "WARNING:",
    "DEBUG",
    "Arduino Farm Monitor",
    "DHT22 + Soil",
    "====",
    "Initializing",
    "detected",
    "ready",
    "starting",
];

/// Set by the board when it is emitting synthetic values itself.
const SIMULATED_MARKER: &str = "[SIMULATED]";

/// Label and unit delimiter for each field.
const FIELDS: [(SensorKind, &str, &str); 3] = [
    (SensorKind::Temperature, "Temp:", "°C"),
    (SensorKind::Humidity, "Humidity:", "%"),
    (SensorKind::SoilMoisture, "Soil Moisture:", "%"),
];

/// Result of parsing one line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedLine {
    /// Every field whose numeric text parsed.
    pub values: BTreeMap<SensorKind, f64>,
    /// The board tagged the line as simulated. Informational only.
    pub simulated: bool,
}

impl ParsedLine {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Returns `true` for banner, warning and debug lines.
pub fn is_diagnostic(line: &str) -> bool {
    DIAGNOSTIC_MARKERS.iter().any(|marker| line.contains(marker))
}

/// Parse one raw line into whichever sensor values it carries.
pub fn parse_line(line: &str) -> ParsedLine {
    let line = line.trim();
    if line.is_empty() || is_diagnostic(line) {
        return ParsedLine::default();
    }

    let values: BTreeMap<SensorKind, f64> = FIELDS
        .iter()
        .filter_map(|&(kind, label, unit)| extract_field(line, label, unit).map(|v| (kind, v)))
        .collect();

    let simulated = !values.is_empty() && line.contains(SIMULATED_MARKER);

    ParsedLine { values, simulated }
}

/// Find `label`, then the next `unit`, and parse the text between them.
fn extract_field(line: &str, label: &str, unit: &str) -> Option<f64> {
    let start = line.find(label)? + label.len();
    let rest = &line[start..];
    let end = rest.find(unit)?;
    let value: f64 = rest[..end].trim().parse().ok()?;
    value.is_finite().then_some(value)
}
