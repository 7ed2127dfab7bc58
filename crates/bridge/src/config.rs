use std::str::FromStr;
use std::time::Duration;

use crate::source::SerialSettings;

/// Bridge configuration loaded from environment variables.
///
/// All fields have defaults suitable for a board plugged into the same
/// machine. Leaving `SERIAL_PORT` unset selects simulated mode.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Bind address (default: `127.0.0.1`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Serial device settings, if a device is configured.
    pub serial: Option<SerialSettings>,
    /// Ingestion loop tick (default: 1000 ms).
    pub tick: Duration,
    /// HTTP request timeout in seconds (default: `10`).
    pub request_timeout_secs: u64,
}

impl BridgeConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default     |
    /// |--------------------------|-------------|
    /// | `HOST`                   | `127.0.0.1` |
    /// | `PORT`                   | `5000`      |
    /// | `SERIAL_PORT`            | unset       |
    /// | `BAUD_RATE`              | `9600`      |
    /// | `SERIAL_READ_TIMEOUT_MS` | `1000`      |
    /// | `SERIAL_SETTLE_MS`       | `2000`      |
    /// | `TICK_MS`                | `1000`      |
    /// | `REQUEST_TIMEOUT_SECS`   | `10`        |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into());

        let serial = std::env::var("SERIAL_PORT")
            .ok()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .map(|path| SerialSettings {
                path,
                baud_rate: env_or("BAUD_RATE", 9600),
                read_timeout: Duration::from_millis(env_or("SERIAL_READ_TIMEOUT_MS", 1000)),
                settle: Duration::from_millis(env_or("SERIAL_SETTLE_MS", 2000)),
            });

        Self {
            host,
            port: env_or("PORT", 5000),
            serial,
            tick: Duration::from_millis(env_or("TICK_MS", 1000).max(1)),
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 10),
        }
    }
}

/// Parse an environment variable, falling back to `default` when it is
/// unset or malformed.
fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, %default, "Invalid value, using default");
            default
        }),
        Err(_) => default,
    }
}
