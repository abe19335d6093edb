//! PostgreSQL side of slipway: building a verified connection pool for one
//! target database and running migration transactions on it.

pub mod config;
pub mod error;
pub mod introspect;
pub mod manager;
pub mod target;
pub mod transaction;

pub use config::PoolConfig;
pub use error::ConnectionError;
pub use introspect::quote_identifier;
pub use manager::ConnectionManager;
pub use target::{mask_url, DatabaseTarget};
pub use transaction::PgMigrationTransaction;
