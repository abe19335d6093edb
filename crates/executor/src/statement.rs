use crate::error::ExecutorError;
use core::time::Duration;
use slipway_contracts::MigrationTransaction;
use slipway_migration::StatementOutcome;
use slipway_sql::{excerpt, SqlStatement, EXCERPT_MAX_CHARS};
use tracing::debug;

pub fn statement_kind(sql: &str) -> String {
    let token = sql
        .split_whitespace()
        .next()
        .unwrap_or("")
        .trim_matches(|c: char| !c.is_ascii_alphabetic());

    if token.is_empty() {
        return "UNKNOWN".to_string();
    }

    token.to_ascii_uppercase()
}

/// Statements that would end or restart the migration's own transaction.
fn is_forbidden_transaction_control(kind: &str) -> bool {
    matches!(
        kind,
        "BEGIN" | "START" | "COMMIT" | "END" | "ROLLBACK" | "ABORT"
    )
}

pub fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

pub async fn execute_statement<X>(
    tx: &mut X,
    stmt: &SqlStatement,
) -> Result<StatementOutcome, ExecutorError>
where
    X: MigrationTransaction,
{
    let kind = statement_kind(&stmt.sql);
    if is_forbidden_transaction_control(&kind) {
        return Err(ExecutorError::StatementExecutionFailed {
            statement_ordinal: stmt.ordinal,
            execution_time_ms: 0,
            statement: excerpt(&stmt.sql, EXCERPT_MAX_CHARS),
            message: format!(
                "transaction control statements ({kind}) are not allowed inside a migration script"
            ),
        });
    }

    let started = std::time::Instant::now();
    let result = tx.execute(&stmt.sql).await;
    let elapsed = duration_ms(started.elapsed());

    match result {
        Ok(rows) => {
            debug!(
                ordinal = stmt.ordinal,
                kind = %kind,
                rows,
                elapsed_ms = elapsed,
                "statement executed"
            );
            Ok(StatementOutcome::succeeded(stmt.ordinal, rows, elapsed))
        }
        Err(e) => Err(ExecutorError::StatementExecutionFailed {
            statement_ordinal: stmt.ordinal,
            execution_time_ms: elapsed,
            statement: excerpt(&stmt.sql, EXCERPT_MAX_CHARS),
            message: e.to_string(),
        }),
    }
}
