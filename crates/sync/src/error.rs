/// A failed call to the bridge or the system-of-record.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote returned a non-2xx status code.
    #[error("Remote returned HTTP {0}")]
    HttpStatus(u16),

    /// The remote answered with `success: false`.
    #[error("Remote rejected the request: {0}")]
    Rejected(String),

    /// The body parsed but is missing or has invalid required fields.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Sync agent failures, classified by which collaborator failed.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The bridge's query service could not be reached or answered badly.
    #[error("Bridge unavailable: {0}")]
    BridgeUnavailable(#[source] ClientError),

    /// Interval or profile fetch from the system-of-record failed.
    #[error("Config unavailable: {0}")]
    ConfigUnavailable(#[source] ClientError),

    /// The sync POST failed or was rejected.
    #[error("Sync target unavailable: {0}")]
    SyncTargetUnavailable(#[source] ClientError),
}
