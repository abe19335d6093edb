use crate::config::PoolConfig;
use crate::error::ConnectionError;
use crate::target::DatabaseTarget;
use sqlx::PgPool;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// A bounded pool for one target database, verified reachable at construction.
///
/// Callers release it with [`close`](Self::close); closing twice is a no-op and
/// every later use fails with [`ConnectionError::Closed`].
#[derive(Debug)]
pub struct ConnectionManager {
    pool: PgPool,
    name: String,
}

impl ConnectionManager {
    pub async fn connect(
        target: &DatabaseTarget,
        config: &PoolConfig,
    ) -> Result<Self, ConnectionError> {
        let options = target.connect_options()?;
        let name = target.display_name();
        let pool = config.pool_options().connect_lazy_with(options);

        let attempts = config.connect_attempts.max(1);
        let mut last_error = String::new();

        for attempt in 1..=attempts {
            match check_reachable(&pool).await {
                Ok(()) => {
                    info!(db = %name, attempt, "database reachable");
                    return Ok(Self { pool, name });
                }
                Err(e) => {
                    warn!(db = %name, attempt, attempts, error = %e, "connectivity check failed");
                    last_error = e.to_string();
                }
            }

            if attempt < attempts {
                sleep(config.retry_delay).await;
            }
        }

        pool.close().await;
        Err(ConnectionError::Unreachable {
            attempts,
            message: last_error,
        })
    }

    /// Wraps an already configured pool without probing it.
    pub fn from_pool(pool: PgPool, name: impl Into<String>) -> Self {
        Self {
            pool,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }

    pub async fn ping(&self) -> Result<(), ConnectionError> {
        check_reachable(self.pool()?).await
    }

    pub async fn close(&self) {
        if self.pool.is_closed() {
            return;
        }
        self.pool.close().await;
        debug!(db = %self.name, "connection pool closed");
    }

    pub(crate) fn pool(&self) -> Result<&PgPool, ConnectionError> {
        if self.pool.is_closed() {
            return Err(ConnectionError::Closed);
        }
        Ok(&self.pool)
    }
}

async fn check_reachable(pool: &PgPool) -> Result<(), ConnectionError> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await
        .map(|_| ())
        .map_err(|e| ConnectionError::query("connectivity check", &e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::time::Duration;

    fn fast_config(attempts: u32) -> PoolConfig {
        PoolConfig {
            connect_attempts: attempts,
            retry_delay: Duration::from_millis(10),
            acquire_timeout: Duration::from_secs(2),
            ..PoolConfig::default()
        }
    }

    #[tokio::test]
    async fn unreachable_target_fails_after_bounded_attempts() {
        let target = DatabaseTarget::url("postgres://nobody:pw@127.0.0.1:1/none");

        let err = ConnectionManager::connect(&target, &fast_config(2))
            .await
            .unwrap_err();

        match err {
            ConnectionError::Unreachable { attempts, message } => {
                assert_eq!(attempts, 2);
                assert!(!message.is_empty());
                assert!(!message.contains("pw@"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn no_retry_delay_after_the_last_attempt() {
        let target = DatabaseTarget::url("postgres://nobody:pw@127.0.0.1:1/none");
        let config = PoolConfig {
            connect_attempts: 1,
            retry_delay: Duration::from_secs(30),
            acquire_timeout: Duration::from_secs(1),
            ..PoolConfig::default()
        };

        let started = std::time::Instant::now();
        let err = ConnectionManager::connect(&target, &config)
            .await
            .unwrap_err();

        assert!(matches!(err, ConnectionError::Unreachable { attempts: 1, .. }));
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[tokio::test]
    async fn invalid_target_fails_before_connecting() {
        let target = DatabaseTarget::url("");
        let err = ConnectionManager::connect(&target, &fast_config(3))
            .await
            .unwrap_err();
        assert!(matches!(err, ConnectionError::InvalidTarget { .. }));
    }

    #[tokio::test]
    async fn closed_manager_rejects_use_and_close_is_idempotent() {
        let options = DatabaseTarget::url("postgres://nobody:pw@127.0.0.1:1/none")
            .connect_options()
            .unwrap();
        let pool = fast_config(1).pool_options().connect_lazy_with(options);
        let manager = ConnectionManager::from_pool(pool, "test");

        manager.close().await;
        manager.close().await;

        assert!(manager.is_closed());
        assert_eq!(manager.ping().await, Err(ConnectionError::Closed));
    }
}
