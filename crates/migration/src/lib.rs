pub mod checksum;
pub mod error;
pub mod model;
pub mod provenance;
pub mod validator;

pub use checksum::script_checksum;
pub use error::ValidationError;
pub use model::{MigrationResult, StatementOutcome};
pub use provenance::{extract_table_name, Provenance};
pub use validator::{validate_script, DENYLIST};
