use crate::error::ConnectionError;
use crate::manager::ConnectionManager;

const SQL_LIST_TABLES: &str = "
SELECT table_name::text
FROM information_schema.tables
WHERE table_schema = 'public'
  AND table_type = 'BASE TABLE'
ORDER BY table_name
";

impl ConnectionManager {
    /// Base tables in the `public` schema, sorted by name.
    pub async fn list_tables(&self) -> Result<Vec<String>, ConnectionError> {
        sqlx::query_scalar::<_, String>(SQL_LIST_TABLES)
            .fetch_all(self.pool()?)
            .await
            .map_err(|e| ConnectionError::query("list tables", &e))
    }

    /// Exact row count of `public.<table>`.
    pub async fn row_count(&self, table: &str) -> Result<i64, ConnectionError> {
        let sql = format!("SELECT COUNT(*) FROM public.{}", quote_identifier(table));
        sqlx::query_scalar::<_, i64>(&sql)
            .fetch_one(self.pool()?)
            .await
            .map_err(|e| ConnectionError::query("row count", &e))
    }
}

pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
