use core::fmt;
use slipway_core::{ConnectionError, DatabaseTarget};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    UserError = 1,
    MigrationFailed = 2,
    DatabaseUnreachable = 3,
}

impl ExitCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

#[derive(Debug, Clone)]
pub struct CliError {
    code: ExitCode,
    title: String,
    reason: Option<String>,
    meaning: Option<String>,
    action: Option<String>,
}

impl CliError {
    fn new(code: ExitCode, title: impl Into<String>) -> Self {
        Self {
            code,
            title: title.into(),
            reason: None,
            meaning: None,
            action: None,
        }
    }

    pub fn user_error(title: impl Into<String>) -> Self {
        Self::new(ExitCode::UserError, title)
    }

    pub fn migration_failed(title: impl Into<String>) -> Self {
        Self::new(ExitCode::MigrationFailed, title)
    }

    pub fn database_unreachable(title: impl Into<String>) -> Self {
        Self::new(ExitCode::DatabaseUnreachable, title)
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn with_meaning(mut self, meaning: impl Into<String>) -> Self {
        self.meaning = Some(meaning.into());
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn code(&self) -> ExitCode {
        self.code
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    pub fn meaning(&self) -> Option<&str> {
        self.meaning.as_deref()
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    pub fn exit_code(&self) -> i32 {
        self.code.as_i32()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

impl std::error::Error for CliError {}

pub fn map_connection_error(err: ConnectionError, target: &DatabaseTarget) -> CliError {
    match err {
        ConnectionError::InvalidTarget { message } => CliError::user_error("Invalid database target")
            .with_reason(message)
            .with_action("Check --database-url, or --project-ref, --db-password and --region."),
        ConnectionError::Unreachable { attempts, message } => {
            CliError::database_unreachable("Database unreachable")
                .with_reason(format!("{message} (after {attempts} attempt(s))"))
                .with_meaning(format!(
                    "No connection to {} could be established. Nothing was executed.",
                    target.display_name()
                ))
                .with_action(
                    "Check that the database is running and reachable, then retry the command.",
                )
        }
        ConnectionError::Closed => CliError::migration_failed("Connection closed unexpectedly"),
        ConnectionError::Query { operation, message } => {
            CliError::migration_failed(format!("Database {operation} failed")).with_reason(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_stable() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(CliError::user_error("x").exit_code(), 1);
        assert_eq!(CliError::migration_failed("x").exit_code(), 2);
        assert_eq!(CliError::database_unreachable("x").exit_code(), 3);
    }

    #[test]
    fn unreachable_maps_to_exit_code_three_without_password() {
        let target = DatabaseTarget::url("postgres://app:hunter2@db:5432/app");
        let err = map_connection_error(
            ConnectionError::Unreachable {
                attempts: 3,
                message: "connection refused".to_string(),
            },
            &target,
        );

        assert_eq!(err.code(), ExitCode::DatabaseUnreachable);
        assert_eq!(err.reason(), Some("connection refused (after 3 attempt(s))"));
        assert!(!err.meaning().unwrap_or_default().contains("hunter2"));
    }
}
