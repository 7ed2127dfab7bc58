use std::sync::Arc;

use crate::cache::SensorCache;
use crate::ingest::Mode;
use crate::simulate::Simulator;

/// How the bridge is fed, as reported by `/health`.
#[derive(Debug, Clone)]
pub struct SourceInfo {
    pub attached: bool,
    pub identifier: String,
}

impl SourceInfo {
    pub fn simulated() -> Self {
        Self::from(&Mode::Simulated)
    }
}

impl From<&Mode> for SourceInfo {
    fn from(mode: &Mode) -> Self {
        Self {
            attached: mode.is_live(),
            identifier: mode.identifier(),
        }
    }
}

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the cache is a shared handle and the rest is behind
/// `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Latest reading per sensor, written by the ingestion loop.
    pub cache: SensorCache,
    /// Used by `POST /simulate`.
    pub simulator: Arc<Simulator>,
    pub source: Arc<SourceInfo>,
}
