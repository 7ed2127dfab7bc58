//! Periodic sync orchestrator.
//!
//! Each cycle refreshes remote configuration when due, pulls a snapshot
//! from the bridge, evaluates it against the active profile, and forwards
//! the three values to the system-of-record. No failure inside a cycle ends
//! the loop; the only fatal path is [`SyncLoop::start`] failing to obtain
//! an active profile.

use std::time::Duration;

use agrolink_core::protocol::SyncResponse;
use agrolink_core::sensor::SensorKind;
use agrolink_core::thresholds::{evaluate, ActiveProfile, Evaluation};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::client::{ConfigProvider, SensorFeed, SyncTarget};
use crate::error::SyncError;
use crate::report;

/// Timing knobs for the loop.
#[derive(Debug, Clone)]
pub struct LoopSettings {
    /// Interval used until the config provider answers.
    pub default_interval: Duration,
    /// How often the interval is re-fetched.
    pub interval_refresh: Duration,
    /// How often the profile is re-fetched; `None` disables refresh.
    pub profile_refresh: Option<Duration>,
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            default_interval: Duration::from_secs(30),
            interval_refresh: Duration::from_secs(60),
            profile_refresh: None,
        }
    }
}

/// What a single cycle did.
#[derive(Debug)]
pub enum CycleOutcome {
    /// The bridge could not be queried; nothing was evaluated or sent.
    BridgeUnavailable,
    /// At least one reading had no value; nothing was sent.
    Incomplete {
        evaluation: Evaluation,
        missing: Vec<SensorKind>,
    },
    /// Readings were forwarded and accepted.
    Synced {
        evaluation: Evaluation,
        response: SyncResponse,
    },
    /// Forwarding failed or was rejected.
    TargetUnavailable { evaluation: Evaluation },
}

pub struct SyncLoop<F, C, T> {
    feed: F,
    config: C,
    target: T,
    settings: LoopSettings,
    interval: Duration,
    profile: ActiveProfile,
    interval_fetched_at: Instant,
    profile_fetched_at: Instant,
}

impl<F, C, T> SyncLoop<F, C, T>
where
    F: SensorFeed,
    C: ConfigProvider,
    T: SyncTarget,
{
    /// Fetch the initial interval and the active profile.
    ///
    /// An interval failure falls back to `settings.default_interval`. A
    /// profile failure is returned; the caller should treat it as fatal.
    pub async fn start(
        feed: F,
        config: C,
        target: T,
        settings: LoopSettings,
    ) -> Result<Self, SyncError> {
        let interval = match config.fetch_sync_interval().await {
            Ok(setting) => {
                tracing::info!(
                    interval_secs = setting.interval.as_secs(),
                    display = setting.display.as_deref().unwrap_or(""),
                    "Sync interval loaded",
                );
                setting.interval
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    default_secs = settings.default_interval.as_secs(),
                    "Could not fetch sync interval, using default",
                );
                settings.default_interval
            }
        };
        let interval_fetched_at = Instant::now();

        let profile = config.fetch_active_profile().await?;
        tracing::info!(
            plant = %profile.name,
            local_name = %profile.local_name,
            id = ?profile.id,
            "Active plant profile loaded",
        );
        let profile_fetched_at = Instant::now();

        Ok(Self {
            feed,
            config,
            target,
            settings,
            interval,
            profile,
            interval_fetched_at,
            profile_fetched_at,
        })
    }

    /// Current sync interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn profile(&self) -> &ActiveProfile {
        &self.profile
    }

    /// Run cycles until `cancel` fires.
    ///
    /// The sleep between cycles is the only cancellation point; a cycle in
    /// progress always completes.
    pub async fn run(mut self, cancel: CancellationToken) {
        tracing::info!(interval_secs = self.interval.as_secs(), "Sync loop started");

        while !cancel.is_cancelled() {
            self.cycle().await;

            tokio::select! {
                () = cancel.cancelled() => break,
                () = tokio::time::sleep(self.interval) => {}
            }
        }

        tracing::info!("Sync loop stopped");
    }

    /// Perform one cycle.
    pub async fn cycle(&mut self) -> CycleOutcome {
        self.refresh_interval_if_due().await;
        self.refresh_profile_if_due().await;

        let snapshot = match self.feed.snapshot().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(error = %e, "Skipping cycle, no snapshot");
                return CycleOutcome::BridgeUnavailable;
            }
        };

        let evaluation = evaluate(&snapshot, &self.profile);
        report::log_evaluation(&self.profile, &evaluation);

        let values = match snapshot.values() {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!(error = %e, "Incomplete snapshot, not forwarding");
                return CycleOutcome::Incomplete {
                    evaluation,
                    missing: snapshot.missing(),
                };
            }
        };

        match self.target.push(values).await {
            Ok(response) => {
                report::log_sync_response(&values, &response);
                CycleOutcome::Synced {
                    evaluation,
                    response,
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Sync failed, retrying next cycle");
                CycleOutcome::TargetUnavailable { evaluation }
            }
        }
    }

    async fn refresh_interval_if_due(&mut self) {
        if self.interval_fetched_at.elapsed() < self.settings.interval_refresh {
            return;
        }
        self.interval_fetched_at = Instant::now();

        match self.config.fetch_sync_interval().await {
            Ok(setting) if setting.interval != self.interval => {
                tracing::info!(
                    old_secs = self.interval.as_secs(),
                    new_secs = setting.interval.as_secs(),
                    display = setting.display.as_deref().unwrap_or(""),
                    "Sync interval changed",
                );
                self.interval = setting.interval;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    interval_secs = self.interval.as_secs(),
                    "Interval refresh failed, keeping current interval",
                );
            }
        }
    }

    async fn refresh_profile_if_due(&mut self) {
        let Some(cadence) = self.settings.profile_refresh else {
            return;
        };
        if self.profile_fetched_at.elapsed() < cadence {
            return;
        }
        self.profile_fetched_at = Instant::now();

        match self.config.fetch_active_profile().await {
            Ok(profile) if profile != self.profile => {
                tracing::info!(
                    old = %self.profile.name,
                    new = %profile.name,
                    "Active plant profile changed",
                );
                self.profile = profile;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    plant = %self.profile.name,
                    "Profile refresh failed, keeping current profile",
                );
            }
        }
    }
}
