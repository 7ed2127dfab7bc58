use crate::sensor::SensorKind;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    #[error("Unknown sensor: {0}")]
    UnknownSensor(String),

    #[error("Incomplete snapshot, missing values for: {}", format_kinds(missing))]
    IncompleteSnapshot { missing: Vec<SensorKind> },
}

fn format_kinds(kinds: &[SensorKind]) -> String {
    kinds
        .iter()
        .map(SensorKind::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
