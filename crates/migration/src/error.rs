use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("SQL cannot be empty")]
    EmptyScript,
    #[error("dangerous operation detected: {pattern}")]
    DangerousOperation { pattern: &'static str },
}
