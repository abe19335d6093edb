use crate::error::ExecutorError;
use slipway_contracts::{MigrationTarget, MigrationTransaction};

pub async fn begin<T>(target: &T) -> Result<T::Transaction, ExecutorError>
where
    T: MigrationTarget,
{
    target
        .begin()
        .await
        .map_err(|e| ExecutorError::TransactionBeginFailed {
            message: e.to_string(),
        })
}

pub async fn commit<X>(tx: X) -> Result<(), ExecutorError>
where
    X: MigrationTransaction,
{
    tx.commit()
        .await
        .map_err(|e| ExecutorError::TransactionCommitFailed {
            message: e.to_string(),
        })
}

pub async fn rollback<X>(tx: X, original_error: Option<&ExecutorError>) -> Result<(), ExecutorError>
where
    X: MigrationTransaction,
{
    tx.rollback()
        .await
        .map_err(|e| ExecutorError::TransactionRollbackFailed {
            message: e.to_string(),
            original_error: original_error.map(ExecutorError::result_message),
            statement_ordinal: original_error.and_then(ExecutorError::statement_ordinal),
        })
}
