use core::str::FromStr;
use core::time::Duration;
use sqlx::postgres::PgPoolOptions;

pub const ENV_MAX_CONNECTIONS: &str = "SLIPWAY_POOL_MAX_CONNECTIONS";
pub const ENV_MIN_CONNECTIONS: &str = "SLIPWAY_POOL_MIN_CONNECTIONS";
pub const ENV_MAX_LIFETIME_SECS: &str = "SLIPWAY_POOL_MAX_LIFETIME_SECS";
pub const ENV_IDLE_TIMEOUT_SECS: &str = "SLIPWAY_POOL_IDLE_TIMEOUT_SECS";
pub const ENV_ACQUIRE_TIMEOUT_SECS: &str = "SLIPWAY_POOL_ACQUIRE_TIMEOUT_SECS";
pub const ENV_CONNECT_ATTEMPTS: &str = "SLIPWAY_CONNECT_ATTEMPTS";
pub const ENV_CONNECT_RETRY_DELAY_MS: &str = "SLIPWAY_CONNECT_RETRY_DELAY_MS";

/// Limits for the pool a [`ConnectionManager`](crate::ConnectionManager) opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    /// Connections older than this are retired instead of reused.
    pub max_lifetime: Duration,
    pub idle_timeout: Duration,
    pub acquire_timeout: Duration,
    /// Number of `SELECT 1` connectivity checks before giving up. Never below 1.
    pub connect_attempts: u32,
    pub retry_delay: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: 5,
            min_connections: 0,
            max_lifetime: Duration::from_secs(180),
            idle_timeout: Duration::from_secs(60),
            acquire_timeout: Duration::from_secs(10),
            connect_attempts: 3,
            retry_delay: Duration::from_millis(2000),
        }
    }
}

impl PoolConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key/value source; unset or unparseable keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let secs = |key: &str, default: Duration| {
            Duration::from_secs(parse_or(&lookup, key, default.as_secs()))
        };

        Self {
            max_connections: parse_or(&lookup, ENV_MAX_CONNECTIONS, defaults.max_connections),
            min_connections: parse_or(&lookup, ENV_MIN_CONNECTIONS, defaults.min_connections),
            max_lifetime: secs(ENV_MAX_LIFETIME_SECS, defaults.max_lifetime),
            idle_timeout: secs(ENV_IDLE_TIMEOUT_SECS, defaults.idle_timeout),
            acquire_timeout: secs(ENV_ACQUIRE_TIMEOUT_SECS, defaults.acquire_timeout),
            connect_attempts: parse_or(&lookup, ENV_CONNECT_ATTEMPTS, defaults.connect_attempts)
                .max(1),
            retry_delay: Duration::from_millis(parse_or(
                &lookup,
                ENV_CONNECT_RETRY_DELAY_MS,
                u64::try_from(defaults.retry_delay.as_millis()).unwrap_or(u64::MAX),
            )),
        }
    }

    pub(crate) fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections.max(1))
            .min_connections(self.min_connections.min(self.max_connections))
            .max_lifetime(self.max_lifetime)
            .idle_timeout(self.idle_timeout)
            .acquire_timeout(self.acquire_timeout)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
