//! DuckDB database backend implementation

use crate::error::{DbError, DbResult};
use crate::traits::Database;
use async_trait::async_trait;
use duckdb::Connection;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

/// DuckDB database backend
pub struct DuckDbBackend {
    conn: Mutex<Connection>,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path).map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    fn lock(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| DbError::MutexPoisoned(e.to_string()))
    }

    /// Execute SQL synchronously
    fn execute_sync(&self, sql: &str) -> DbResult<usize> {
        let conn = self.lock()?;
        conn.execute(sql, [])
            .map_err(|e| DbError::ExecutionError(format!("{}: {}", e, sql)))
    }

    /// Execute batch SQL synchronously
    fn execute_batch_sync(&self, sql: &str) -> DbResult<()> {
        let conn = self.lock()?;
        conn.execute_batch(sql)
            .map_err(|e| DbError::ExecutionError(e.to_string()))
    }

    /// Execute statements and a finalize statement in one transaction
    fn execute_in_transaction_sync(
        &self,
        statements: &[String],
        finalize: &(dyn Fn(u64) -> String + Send + Sync),
    ) -> DbResult<u64> {
        let mut conn = self.lock()?;
        let tx = conn
            .transaction()
            .map_err(|e| DbError::TransactionError(e.to_string()))?;

        let start = Instant::now();
        for sql in statements {
            // dropping `tx` on the error path rolls everything back
            tx.execute_batch(sql)
                .map_err(|e| DbError::ExecutionError(format!("{}: {}", e, sql)))?;
        }
        let elapsed_ms = start.elapsed().as_millis() as u64;

        let closing = finalize(elapsed_ms);
        tx.execute_batch(&closing)
            .map_err(|e| DbError::ExecutionError(format!("{}: {}", e, closing)))?;

        tx.commit()
            .map_err(|e| DbError::TransactionError(e.to_string()))?;
        Ok(elapsed_ms)
    }

    /// Query rows synchronously, rendering each column as text
    fn query_rows_sync(&self, sql: &str, columns: usize) -> DbResult<Vec<Vec<String>>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| DbError::ExecutionError(format!("{}: {}", e, sql)))?;
        let mut rows = stmt
            .query([])
            .map_err(|e| DbError::ExecutionError(e.to_string()))?;

        let mut out = Vec::new();
        while let Some(row) = rows.next().map_err(|e| DbError::ExecutionError(e.to_string()))? {
            let mut record = Vec::with_capacity(columns);
            for i in 0..columns {
                let value: Option<String> = row
                    .get(i)
                    .map_err(|e| DbError::ExecutionError(e.to_string()))?;
                record.push(value.unwrap_or_default());
            }
            out.push(record);
        }
        Ok(out)
    }

    /// Query count synchronously
    fn query_count_sync(&self, sql: &str) -> DbResult<usize> {
        let conn = self.lock()?;
        let count: i64 = conn
            .query_row(&format!("SELECT COUNT(*) FROM ({})", sql), [], |row| {
                row.get(0)
            })
            .map_err(|e| DbError::ExecutionError(e.to_string()))?;
        Ok(count as usize)
    }

    /// Check if table exists synchronously
    fn table_exists_sync(&self, name: &str) -> DbResult<bool> {
        let conn = self.lock()?;

        // Handle schema-qualified names
        let (schema, table) = if let Some(pos) = name.rfind('.') {
            (&name[..pos], &name[pos + 1..])
        } else {
            ("main", name)
        };

        let sql = format!(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = '{}' AND table_name = '{}'",
            schema, table
        );

        let count: i64 = conn
            .query_row(&sql, [], |row| row.get(0))
            .map_err(|e| DbError::ExecutionError(e.to_string()))?;

        Ok(count > 0)
    }
}

#[async_trait]
impl Database for DuckDbBackend {
    async fn execute(&self, sql: &str) -> DbResult<usize> {
        self.execute_sync(sql)
    }

    async fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.execute_batch_sync(sql)
    }

    async fn execute_in_transaction(
        &self,
        statements: &[String],
        finalize: &(dyn Fn(u64) -> String + Send + Sync),
    ) -> DbResult<u64> {
        self.execute_in_transaction_sync(statements, finalize)
    }

    async fn query_rows(&self, sql: &str, columns: usize) -> DbResult<Vec<Vec<String>>> {
        self.query_rows_sync(sql, columns)
    }

    async fn query_count(&self, sql: &str) -> DbResult<usize> {
        self.query_count_sync(sql)
    }

    async fn table_exists(&self, name: &str) -> DbResult<bool> {
        self.table_exists_sync(name)
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory() {
        let db = DuckDbBackend::in_memory().unwrap();
        assert_eq!(db.db_type(), "duckdb");
    }

    #[tokio::test]
    async fn test_execute_and_table_exists() {
        let db = DuckDbBackend::in_memory().unwrap();
        db.execute("CREATE TABLE t1 (id INTEGER)").await.unwrap();

        assert!(db.table_exists("t1").await.unwrap());
        assert!(!db.table_exists("nonexistent").await.unwrap());
    }

    #[tokio::test]
    async fn test_execute_batch() {
        let db = DuckDbBackend::in_memory().unwrap();
        db.execute_batch(
            "CREATE TABLE t1 (id INTEGER); CREATE TABLE t2 (id INTEGER); INSERT INTO t1 VALUES (1);",
        )
        .await
        .unwrap();

        assert!(db.table_exists("t1").await.unwrap());
        assert!(db.table_exists("t2").await.unwrap());
    }

    #[tokio::test]
    async fn test_query_count() {
        let db = DuckDbBackend::in_memory().unwrap();
        db.execute_batch("CREATE TABLE nums AS SELECT * FROM range(10) t(n)")
            .await
            .unwrap();

        let count = db.query_count("SELECT * FROM nums").await.unwrap();
        assert_eq!(count, 10);
    }

    #[tokio::test]
    async fn test_query_rows_renders_text() {
        let db = DuckDbBackend::in_memory().unwrap();
        db.execute_batch(
            "CREATE TABLE kv (k VARCHAR, v INTEGER); \
             INSERT INTO kv VALUES ('a', 1), ('b', NULL);",
        )
        .await
        .unwrap();

        let rows = db
            .query_rows("SELECT k, CAST(v AS VARCHAR) FROM kv ORDER BY k", 2)
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["a".to_string(), "1".to_string()]);
        assert_eq!(rows[1], vec!["b".to_string(), String::new()]);
    }

    #[tokio::test]
    async fn test_transaction_commits_with_finalize() {
        let db = DuckDbBackend::in_memory().unwrap();
        db.execute("CREATE TABLE log (note VARCHAR, ms BIGINT)")
            .await
            .unwrap();

        let statements = vec![
            "CREATE TABLE payload (id INTEGER)".to_string(),
            "INSERT INTO payload VALUES (1)".to_string(),
        ];
        db.execute_in_transaction(&statements, &|ms| {
            format!("INSERT INTO log VALUES ('done', {})", ms)
        })
        .await
        .unwrap();

        assert!(db.table_exists("payload").await.unwrap());
        assert_eq!(db.query_count("SELECT * FROM log").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_transaction_rolls_back_on_statement_failure() {
        let db = DuckDbBackend::in_memory().unwrap();

        let statements = vec![
            "CREATE TABLE half_done (id INTEGER)".to_string(),
            "INSERT INTO half_done VALUES (1)".to_string(),
            "INSERT INTO no_such_table VALUES (1)".to_string(),
        ];
        let result = db
            .execute_in_transaction(&statements, &|_| "SELECT 1".to_string())
            .await;

        assert!(result.is_err());
        assert!(!db.table_exists("half_done").await.unwrap());
    }

    #[tokio::test]
    async fn test_transaction_rolls_back_on_finalize_failure() {
        let db = DuckDbBackend::in_memory().unwrap();

        let statements = vec!["CREATE TABLE almost (id INTEGER)".to_string()];
        let result = db
            .execute_in_transaction(&statements, &|_| {
                "INSERT INTO missing_ledger VALUES (1)".to_string()
            })
            .await;

        assert!(result.is_err());
        assert!(!db.table_exists("almost").await.unwrap());
    }

    #[tokio::test]
    async fn test_from_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("test.duckdb");
        let db = DuckDbBackend::from_path(&path).unwrap();
        db.execute("CREATE TABLE t (id INTEGER)").await.unwrap();
        assert!(db.table_exists("t").await.unwrap());
    }
}
