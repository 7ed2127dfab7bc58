use std::str::FromStr;
use std::time::Duration;

/// Sync agent configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Bridge query service base URL.
    pub bridge_url: String,
    /// Plant endpoint: active profile on GET, readings on POST.
    pub plant_api_url: String,
    /// Sync interval endpoint.
    pub interval_api_url: String,
    /// Used until the config provider answers.
    pub default_interval: Duration,
    /// How often to re-fetch the sync interval.
    pub interval_refresh: Duration,
    /// How often to re-fetch the active profile; `None` keeps the startup
    /// profile for the life of the process.
    pub profile_refresh: Option<Duration>,
    /// Timeout applied to every remote call.
    pub http_timeout: Duration,
}

impl SyncConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                                        |
    /// |------------------------------|------------------------------------------------|
    /// | `BRIDGE_URL`                 | `http://127.0.0.1:5000`                        |
    /// | `PLANT_API_URL`              | `http://localhost/api/plant_sensor_sync.php`   |
    /// | `SENSOR_INTERVAL_API`        | `http://localhost/api/get_sensor_interval.php` |
    /// | `DEFAULT_SYNC_INTERVAL_SECS` | `30`                                           |
    /// | `INTERVAL_REFRESH_SECS`      | `60`                                           |
    /// | `PROFILE_REFRESH_SECS`       | unset                                          |
    /// | `HTTP_TIMEOUT_SECS`          | `5`                                            |
    pub fn from_env() -> Self {
        let profile_refresh = std::env::var("PROFILE_REFRESH_SECS")
            .ok()
            .and_then(|raw| match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => {
                    tracing::warn!(value = %raw, "Invalid PROFILE_REFRESH_SECS, profile refresh disabled");
                    None
                }
            });

        Self {
            bridge_url: env_string("BRIDGE_URL", "http://127.0.0.1:5000"),
            plant_api_url: env_string(
                "PLANT_API_URL",
                "http://localhost/api/plant_sensor_sync.php",
            ),
            interval_api_url: env_string(
                "SENSOR_INTERVAL_API",
                "http://localhost/api/get_sensor_interval.php",
            ),
            default_interval: Duration::from_secs(env_or("DEFAULT_SYNC_INTERVAL_SECS", 30u64).max(1)),
            interval_refresh: Duration::from_secs(env_or("INTERVAL_REFRESH_SECS", 60u64).max(1)),
            profile_refresh,
            http_timeout: Duration::from_secs(env_or("HTTP_TIMEOUT_SECS", 5u64).max(1)),
        }
    }
}

fn env_string(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
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
