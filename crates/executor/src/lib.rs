pub mod error;
pub mod mode;
pub mod runner;
pub mod statement;
pub mod transaction;

pub use error::{ExecutorError, MigrationFailure};
pub use mode::ExecutionMode;
pub use runner::MigrationRunner;
pub use slipway_migration::{MigrationResult, StatementOutcome};
