use slipway_migration::{MigrationResult, ValidationError};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExecutorError {
    #[error("SQL validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
    #[error("failed to begin transaction: {message}")]
    TransactionBeginFailed { message: String },
    #[error("statement {statement_ordinal} failed: {message}")]
    StatementExecutionFailed {
        statement_ordinal: usize,
        execution_time_ms: u64,
        /// Single-line excerpt of the statement, at most 100 characters.
        statement: String,
        message: String,
    },
    #[error("failed to commit transaction: {message}")]
    TransactionCommitFailed { message: String },
    #[error("{}", rollback_message(.message, .original_error))]
    TransactionRollbackFailed {
        message: String,
        /// Result message of the failure that triggered the rollback.
        original_error: Option<String>,
        /// Carried over when that failure was a statement.
        statement_ordinal: Option<usize>,
    },
}

impl ExecutorError {
    /// Text stored in `MigrationResult::error`.
    pub fn result_message(&self) -> String {
        match self {
            ExecutorError::StatementExecutionFailed { statement, .. } => {
                format!("{self}\nStatement: {statement}")
            }
            _ => self.to_string(),
        }
    }

    /// 1-based index of the statement that failed, if a statement failed.
    pub fn statement_ordinal(&self) -> Option<usize> {
        match self {
            ExecutorError::StatementExecutionFailed {
                statement_ordinal, ..
            } => Some(*statement_ordinal),
            ExecutorError::TransactionRollbackFailed {
                statement_ordinal, ..
            } => *statement_ordinal,
            _ => None,
        }
    }
}

fn rollback_message(message: &str, original_error: &Option<String>) -> String {
    match original_error {
        Some(original_error) => {
            format!("transaction rollback failed: {message}; original_error={original_error}")
        }
        None => format!("transaction rollback failed: {message}"),
    }
}

/// A failed `apply_migration`: the structured result plus the error behind it.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct MigrationFailure {
    pub result: Box<MigrationResult>,
    pub error: ExecutorError,
}

impl MigrationFailure {
    pub fn new(result: MigrationResult, error: ExecutorError) -> Self {
        Self {
            result: Box::new(result),
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ExecutorError;

    #[test]
    fn statement_failure_message_quotes_the_statement() {
        let err = ExecutorError::StatementExecutionFailed {
            statement_ordinal: 2,
            execution_time_ms: 3,
            statement: "INSERT INTO missing VALUES (1)".to_string(),
            message: "relation \"missing\" does not exist".to_string(),
        };

        assert_eq!(
            err.result_message(),
            "statement 2 failed: relation \"missing\" does not exist\nStatement: INSERT INTO missing VALUES (1)"
        );
        assert_eq!(err.statement_ordinal(), Some(2));
    }

    #[test]
    fn rollback_failure_keeps_the_original_error() {
        let err = ExecutorError::TransactionRollbackFailed {
            message: "connection reset".to_string(),
            original_error: Some("statement 1 failed: boom".to_string()),
            statement_ordinal: Some(1),
        };
        assert_eq!(
            err.to_string(),
            "transaction rollback failed: connection reset; original_error=statement 1 failed: boom"
        );
        assert_eq!(err.statement_ordinal(), Some(1));
    }
}
