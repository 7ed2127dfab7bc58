//! Threshold evaluation against the active profile.
//!
//! Pure logic. The sync agent fetches the profile and a snapshot and passes
//! both in; nothing here performs I/O or keeps state between calls.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sensor::SensorKind;
use crate::snapshot::SensorSnapshot;

/// Inclusive acceptable range for one sensor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRange {
    #[serde(deserialize_with = "crate::lenient::number_or_string")]
    pub min: f64,
    #[serde(deserialize_with = "crate::lenient::number_or_string")]
    pub max: f64,
}

impl ThresholdRange {
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

impl fmt::Display for ThresholdRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// The currently selected plant profile and its per-sensor ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveProfile {
    #[serde(default, deserialize_with = "crate::lenient::optional_number_or_string")]
    pub id: Option<i64>,
    pub name: String,
    pub local_name: String,
    pub thresholds: BTreeMap<SensorKind, ThresholdRange>,
    /// Consecutive violating cycles before the system-of-record notifies.
    #[serde(default, deserialize_with = "crate::lenient::optional_number_or_string")]
    pub warning_trigger: Option<u32>,
}

/// Which side of the range a value fell out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Breach {
    BelowMinimum,
    AboveMaximum,
}

impl fmt::Display for Breach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Breach::BelowMinimum => "below minimum",
            Breach::AboveMaximum => "above maximum",
        })
    }
}

/// A reading found outside its acceptable range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    pub sensor: SensorKind,
    pub value: f64,
    pub range: ThresholdRange,
    pub breach: Breach,
}

/// Per-sensor result of one evaluation pass.
#[derive(Debug, Clone, PartialEq)]
pub enum Check {
    InRange { value: f64, range: ThresholdRange },
    Violated(Violation),
    /// No value in the snapshot; neither a pass nor a violation.
    Incomplete,
    /// The profile defines no range for this sensor.
    Unconfigured { value: f64 },
}

/// Outcome of evaluating one snapshot, one entry per sensor.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub checks: Vec<(SensorKind, Check)>,
}

impl Evaluation {
    pub fn violations(&self) -> impl Iterator<Item = &Violation> {
        self.checks.iter().filter_map(|(_, check)| match check {
            Check::Violated(violation) => Some(violation),
            _ => None,
        })
    }

    pub fn incomplete(&self) -> impl Iterator<Item = SensorKind> + '_ {
        self.checks
            .iter()
            .filter(|(_, check)| matches!(check, Check::Incomplete))
            .map(|(kind, _)| *kind)
    }

    pub fn has_violations(&self) -> bool {
        self.violations().next().is_some()
    }
}

/// Compare every sensor in `snapshot` against the profile's ranges.
pub fn evaluate(snapshot: &SensorSnapshot, profile: &ActiveProfile) -> Evaluation {
    let checks = SensorKind::ALL
        .into_iter()
        .map(|kind| {
            let check = match (snapshot.get(kind).value, profile.thresholds.get(&kind)) {
                (None, _) => Check::Incomplete,
                (Some(value), None) => Check::Unconfigured { value },
                (Some(value), Some(range)) => classify(kind, value, *range),
            };
            (kind, check)
        })
        .collect();

    Evaluation { checks }
}

fn classify(sensor: SensorKind, value: f64, range: ThresholdRange) -> Check {
    let breach = if value < range.min {
        Breach::BelowMinimum
    } else if value > range.max {
        Breach::AboveMaximum
    } else {
        return Check::InRange { value, range };
    };

    Check::Violated(Violation {
        sensor,
        value,
        range,
        breach,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
