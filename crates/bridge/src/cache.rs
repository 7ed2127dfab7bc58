//! The latest reading per sensor, shared between the ingestion loop and
//! the HTTP handlers.

use std::sync::{Arc, PoisonError, RwLock};

use agrolink_core::error::CoreError;
use agrolink_core::sensor::{SensorKind, SensorReading};
use agrolink_core::snapshot::SensorSnapshot;

/// Concurrency-safe sensor cache.
///
/// Cheaply cloneable; every clone refers to the same slots. Writers replace
/// whole readings under the write lock, so readers see either the previous
/// or the new reading, never a mix. The lock is never held across an
/// `.await` or any I/O.
#[derive(Debug, Clone, Default)]
pub struct SensorCache {
    inner: Arc<RwLock<SensorSnapshot>>,
}

impl SensorCache {
    /// A cache with all sensors offline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look a sensor up by wire name.
    pub fn get(&self, name: &str) -> Result<SensorReading, CoreError> {
        let kind: SensorKind = name.parse()?;
        Ok(self.reading(kind))
    }

    pub fn reading(&self, kind: SensorKind) -> SensorReading {
        self.read_with(|snapshot| snapshot.get(kind).clone())
    }

    /// Consistent copy of every sensor.
    pub fn snapshot(&self) -> SensorSnapshot {
        self.read_with(SensorSnapshot::clone)
    }

    pub fn set(&self, kind: SensorKind, reading: SensorReading) {
        self.update(|snapshot| snapshot.set(kind, reading));
    }

    /// Apply several writes as one atomic update.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut SensorSnapshot),
    {
        // Slots are replaced wholesale, so a panicked writer cannot leave a
        // torn reading behind and the poison flag can be ignored.
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard);
    }

    /// Flip every sensor to `error`, keeping values and timestamps.
    pub fn mark_all_error(&self) {
        self.update(|snapshot| {
            for kind in SensorKind::ALL {
                let reading = snapshot.get(kind).clone().into_error();
                snapshot.set(kind, reading);
            }
        });
    }

    fn read_with<T>(&self, f: impl FnOnce(&SensorSnapshot) -> T) -> T {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }
}
