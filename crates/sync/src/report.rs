//! Log output for evaluation and sync results.
//!
//! Alerting is the system-of-record's job; the agent only reports what it
//! saw and what the record said back.

use agrolink_core::protocol::SyncResponse;
use agrolink_core::snapshot::SensorValues;
use agrolink_core::thresholds::{ActiveProfile, Check, Evaluation};

/// One line per sensor: pass/fail against its range.
pub fn log_evaluation(profile: &ActiveProfile, evaluation: &Evaluation) {
    tracing::info!(
        plant = %profile.name,
        local_name = %profile.local_name,
        "Threshold check",
    );

    for (kind, check) in &evaluation.checks {
        let unit = kind.unit();
        match check {
            Check::InRange { value, range } => {
                tracing::info!(
                    sensor = %kind,
                    "✓ {}: {value}{unit} (range {}-{}{unit})",
                    kind.label(),
                    range.min,
                    range.max,
                );
            }
            Check::Violated(violation) => {
                tracing::warn!(
                    sensor = %kind,
                    breach = %violation.breach,
                    "✗ {}: {}{unit} (range {}-{}{unit})",
                    kind.label(),
                    violation.value,
                    violation.range.min,
                    violation.range.max,
                );
            }
            Check::Incomplete => {
                tracing::warn!(sensor = %kind, "{} reading incomplete, not evaluated", kind.label());
            }
            Check::Unconfigured { value } => {
                tracing::info!(
                    sensor = %kind,
                    "{}: {value}{unit} (no range configured)",
                    kind.label(),
                );
            }
        }
    }
}

/// Summarise the record's answer to a sync POST.
pub fn log_sync_response(values: &SensorValues, response: &SyncResponse) {
    tracing::info!(
        temperature = values.temperature,
        humidity = values.humidity,
        soil_moisture = values.soil_moisture,
        reading_id = ?response.reading_id,
        "Readings synced",
    );

    if !response.violations.is_empty() {
        tracing::warn!(
            count = response.violations.len(),
            "System-of-record reported threshold violations",
        );
        for violation in &response.violations {
            tracing::warn!(
                sensor = %violation.sensor,
                status = %violation.status,
                current = violation.current,
                range = %violation.range,
                "Remote violation",
            );
        }
    }

    if response.notification_triggered {
        tracing::warn!(
            warning_level = ?response.warning_level,
            consecutive_violations = ?response.consecutive_violations,
            "Notification triggered",
        );
    }
}
