pub use slipway_contracts::{Error, MigrationTarget, MigrationTransaction};
pub use slipway_db::{mask_url, ConnectionError, ConnectionManager, DatabaseTarget, PoolConfig};
pub use slipway_executor::{
    ExecutionMode, ExecutorError, MigrationFailure, MigrationResult, MigrationRunner,
};
pub use slipway_migration::{script_checksum, ValidationError};
pub use slipway_sql::{excerpt, SqlStatement, EXCERPT_MAX_CHARS};

pub mod error {
    use slipway_db::ConnectionError;
    use slipway_executor::MigrationFailure;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum RuntimeError {
        #[error(transparent)]
        Connection(#[from] ConnectionError),
        #[error(transparent)]
        Migration(#[from] MigrationFailure),
    }
}

pub use error::RuntimeError;

/// Operations that need no live database, or take one from the caller.
pub mod commands {
    use slipway_contracts::MigrationTarget;
    use slipway_executor::{ExecutionMode, MigrationFailure, MigrationResult, MigrationRunner};
    use slipway_migration::{validate_script, ValidationError};
    use slipway_sql::{split_statements, SqlStatement};

    pub fn split(script: &str) -> Vec<SqlStatement> {
        split_statements(script)
    }

    /// Runs the safety checks and returns how many statements would execute.
    pub fn validate(script: &str) -> Result<usize, ValidationError> {
        validate_script(script)?;
        Ok(split_statements(script).len())
    }

    pub async fn apply<T>(
        target: T,
        script: &str,
        mode: ExecutionMode,
    ) -> Result<MigrationResult, MigrationFailure>
    where
        T: MigrationTarget,
    {
        MigrationRunner::new(target)
            .with_mode(mode)
            .apply_migration(script)
            .await
    }
}

/// One-shot lifecycles: every call opens its own pool and always closes it.
pub mod runtime {
    use crate::commands;
    use crate::error::RuntimeError;
    use slipway_db::{ConnectionError, ConnectionManager, DatabaseTarget, PoolConfig};
    use slipway_executor::{ExecutionMode, MigrationResult};
    use tracing::info;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct TableInfo {
        pub name: String,
        pub row_count: Option<i64>,
    }

    pub async fn apply_script(
        target: &DatabaseTarget,
        config: &PoolConfig,
        script: &str,
        mode: ExecutionMode,
    ) -> Result<MigrationResult, RuntimeError> {
        let manager = ConnectionManager::connect(target, config).await?;
        let outcome = commands::apply(&manager, script, mode).await;
        manager.close().await;
        Ok(outcome?)
    }

    pub async fn list_tables(
        target: &DatabaseTarget,
        config: &PoolConfig,
        with_counts: bool,
    ) -> Result<Vec<TableInfo>, ConnectionError> {
        let manager = ConnectionManager::connect(target, config).await?;
        let tables = collect_tables(&manager, with_counts).await;
        manager.close().await;

        let tables = tables?;
        info!(tables = tables.len(), "listed public tables");
        Ok(tables)
    }

    async fn collect_tables(
        manager: &ConnectionManager,
        with_counts: bool,
    ) -> Result<Vec<TableInfo>, ConnectionError> {
        let names = manager.list_tables().await?;
        let mut out = Vec::with_capacity(names.len());

        for name in names {
            let row_count = if with_counts {
                Some(manager.row_count(&name).await?)
            } else {
                None
            };
            out.push(TableInfo { name, row_count });
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::commands;
    use super::runtime;
    use super::{ConnectionError, DatabaseTarget, ExecutionMode, PoolConfig, RuntimeError};
    use super::ValidationError;
    use core::time::Duration;

    #[test]
    fn validate_counts_executable_statements() {
        let script = "-- header\nCREATE TABLE a (id int);\nINSERT INTO a VALUES (1);";
        assert_eq!(commands::validate(script), Ok(2));
    }

    #[test]
    fn validate_reports_the_matched_pattern() {
        assert_eq!(
            commands::validate("truncate   database x"),
            Err(ValidationError::DangerousOperation {
                pattern: "TRUNCATE DATABASE"
            })
        );
    }

    #[test]
    fn split_keeps_source_order() {
        let statements = commands::split("SELECT 1; SELECT 2; SELECT 3");
        let ordinals: Vec<usize> = statements.iter().map(|s| s.ordinal).collect();
        assert_eq!(ordinals, [1, 2, 3]);
    }

    #[tokio::test]
    async fn apply_script_surfaces_unreachable_database() {
        let target = DatabaseTarget::url("postgres://nobody:pw@127.0.0.1:1/none");
        let config = PoolConfig {
            connect_attempts: 1,
            acquire_timeout: Duration::from_secs(1),
            ..PoolConfig::default()
        };

        let err = runtime::apply_script(&target, &config, "SELECT 1", ExecutionMode::Apply)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RuntimeError::Connection(ConnectionError::Unreachable { attempts: 1, .. })
        ));
    }
}
