pub mod error {
    use thiserror::Error;

    #[derive(Clone, Debug, Error, PartialEq, Eq)]
    #[error("{message}")]
    pub struct Error {
        message: String,
    }

    impl Error {
        pub fn message(message: impl Into<String>) -> Self {
            Self {
                message: message.into(),
            }
        }

        pub fn as_str(&self) -> &str {
            &self.message
        }
    }
}

pub use error::Error;

pub mod db {
    use crate::Error;
    use async_trait::async_trait;

    /// A database that can open the single transaction a migration script runs in.
    #[async_trait]
    pub trait MigrationTarget: Send + Sync {
        type Transaction: MigrationTransaction;

        async fn begin(&self) -> Result<Self::Transaction, Error>;
    }

    /// An open transaction. Dropping it without `commit` must discard its effects.
    #[async_trait]
    pub trait MigrationTransaction: Send {
        /// Executes one statement and returns the number of rows it affected.
        async fn execute(&mut self, sql: &str) -> Result<u64, Error>;

        async fn commit(self) -> Result<(), Error>;

        async fn rollback(self) -> Result<(), Error>;
    }

    #[async_trait]
    impl<T> MigrationTarget for &T
    where
        T: MigrationTarget + ?Sized,
    {
        type Transaction = T::Transaction;

        async fn begin(&self) -> Result<Self::Transaction, Error> {
            (**self).begin().await
        }
    }
}

pub use db::{MigrationTarget, MigrationTransaction};
