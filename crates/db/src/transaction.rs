use crate::error::describe;
use crate::manager::ConnectionManager;
use async_trait::async_trait;
use slipway_contracts::{Error, MigrationTarget, MigrationTransaction};
use sqlx::{Postgres, Transaction};

/// One open PostgreSQL transaction. Dropping it unfinished rolls it back.
pub struct PgMigrationTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl MigrationTarget for ConnectionManager {
    type Transaction = PgMigrationTransaction;

    async fn begin(&self) -> Result<PgMigrationTransaction, Error> {
        let pool = self.pool().map_err(|e| Error::message(e.to_string()))?;
        let tx = pool.begin().await.map_err(|e| Error::message(describe(&e)))?;
        Ok(PgMigrationTransaction { tx })
    }
}

#[async_trait]
impl MigrationTransaction for PgMigrationTransaction {
    async fn execute(&mut self, sql: &str) -> Result<u64, Error> {
        // Extended protocol: the server accepts exactly one statement per call.
        let result = sqlx::query(sql)
            .persistent(false)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| Error::message(describe(&e)))?;
        Ok(result.rows_affected())
    }

    async fn commit(self) -> Result<(), Error> {
        self.tx
            .commit()
            .await
            .map_err(|e| Error::message(describe(&e)))
    }

    async fn rollback(self) -> Result<(), Error> {
        self.tx
            .rollback()
            .await
            .map_err(|e| Error::message(describe(&e)))
    }
}
