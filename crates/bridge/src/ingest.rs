//! Background ingestion loop.
//!
//! Runs on a dedicated blocking thread for the life of the process. In
//! live mode each tick reads at most one line from the attached source,
//! parses it, and writes whatever values it carried into the cache. In
//! simulated mode each tick writes a fresh synthetic value per sensor.
//! The mode is fixed at startup.

use std::sync::Arc;
use std::time::Duration;

use agrolink_core::parser::parse_line;
use agrolink_core::sensor::{SensorKind, SensorReading};
use chrono::Utc;
use tokio_util::sync::CancellationToken;

use crate::cache::SensorCache;
use crate::simulate::Simulator;
use crate::source::{LineSource, SourceError};

/// Where readings come from.
pub enum Mode {
    Live(Box<dyn LineSource>),
    Simulated,
}

impl Mode {
    pub fn is_live(&self) -> bool {
        matches!(self, Mode::Live(_))
    }

    /// Identity reported by the health endpoint.
    pub fn identifier(&self) -> String {
        match self {
            Mode::Live(source) => source.identifier().to_string(),
            Mode::Simulated => "simulated".to_string(),
        }
    }
}

/// What a single tick did.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// No input was waiting.
    Idle,
    /// A line was read but carried no sensor values.
    Skipped,
    /// These sensors were updated from the source.
    Updated(Vec<SensorKind>),
    /// The source failed; every sensor was marked `error`.
    Fault,
    /// Synthetic values were written for every sensor.
    Simulated,
}

pub struct IngestionLoop {
    cache: SensorCache,
    mode: Mode,
    simulator: Arc<Simulator>,
    tick: Duration,
}

impl IngestionLoop {
    pub fn new(cache: SensorCache, mode: Mode, simulator: Arc<Simulator>, tick: Duration) -> Self {
        Self {
            cache,
            mode,
            simulator,
            tick,
        }
    }

    /// Run until `cancel` fires.
    ///
    /// Blocking: spawn with `tokio::task::spawn_blocking` or a plain thread.
    /// Cancellation is observed between ticks, so shutdown waits at most
    /// one tick plus the source's read timeout.
    pub fn run(mut self, cancel: CancellationToken) {
        tracing::info!(
            mode = if self.mode.is_live() { "live" } else { "simulated" },
            source = %self.mode.identifier(),
            tick_ms = self.tick.as_millis() as u64,
            "Ingestion loop started",
        );

        while !cancel.is_cancelled() {
            self.tick();
            std::thread::sleep(self.tick);
        }

        tracing::info!("Ingestion loop stopped");
    }

    /// Perform one iteration.
    pub fn tick(&mut self) -> TickOutcome {
        match &mut self.mode {
            Mode::Live(source) => read_source(source.as_mut(), &self.cache),
            Mode::Simulated => {
                self.simulator.apply(&self.cache);
                TickOutcome::Simulated
            }
        }
    }
}

fn read_source(source: &mut dyn LineSource, cache: &SensorCache) -> TickOutcome {
    let line = match next_line(source) {
        Ok(Some(line)) => line,
        Ok(None) => return TickOutcome::Idle,
        Err(e) => {
            tracing::error!(source = %source.identifier(), error = %e, "Error reading source");
            cache.mark_all_error();
            return TickOutcome::Fault;
        }
    };

    if line.trim().is_empty() {
        return TickOutcome::Idle;
    }

    tracing::debug!(raw = %line, "Raw source line");

    let parsed = parse_line(&line);
    if parsed.is_empty() {
        return TickOutcome::Skipped;
    }
    if parsed.simulated {
        tracing::info!("Source reports simulated values (sensor not connected)");
    }

    let now = Utc::now();
    cache.update(|snapshot| {
        for (&kind, &value) in &parsed.values {
            snapshot.set(kind, SensorReading::online(value, now));
        }
    });

    for (kind, value) in &parsed.values {
        tracing::info!(sensor = %kind, value, unit = kind.unit(), "Reading updated");
    }

    TickOutcome::Updated(parsed.values.keys().copied().collect())
}

fn next_line(source: &mut dyn LineSource) -> Result<Option<String>, SourceError> {
    if source.has_input()? {
        source.read_line()
    } else {
        Ok(None)
    }
}
