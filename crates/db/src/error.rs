use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConnectionError {
    #[error("invalid database target: {message}")]
    InvalidTarget { message: String },
    #[error("database unreachable after {attempts} attempt(s): {message}")]
    Unreachable { attempts: u32, message: String },
    #[error("connection manager is closed")]
    Closed,
    #[error("{operation} failed: {message}")]
    Query {
        operation: &'static str,
        message: String,
    },
}

impl ConnectionError {
    pub(crate) fn query(operation: &'static str, err: &sqlx::Error) -> Self {
        ConnectionError::Query {
            operation,
            message: describe(err),
        }
    }
}

/// Server-side errors carry only the database's message; everything else
/// falls back to sqlx's rendering.
pub(crate) fn describe(err: &sqlx::Error) -> String {
    match err {
        sqlx::Error::Database(db) => db.message().to_string(),
        other => other.to_string(),
    }
}
