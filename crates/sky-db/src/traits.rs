//! Database trait definition

use crate::error::DbResult;
use async_trait::async_trait;

/// Database abstraction trait for Skylark
///
/// Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute SQL that modifies data, returns affected rows
    async fn execute(&self, sql: &str) -> DbResult<usize>;

    /// Execute multiple SQL statements outside any explicit transaction
    async fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Execute `statements` plus one finalize statement in a single
    /// transaction.
    ///
    /// `finalize` receives the wall-clock milliseconds spent executing the
    /// batch and returns a closing statement that commits atomically with
    /// it, so callers can persist execution timing in the same transaction
    /// that produced it. On any failure the whole transaction rolls back.
    /// Returns the measured milliseconds.
    async fn execute_in_transaction(
        &self,
        statements: &[String],
        finalize: &(dyn Fn(u64) -> String + Send + Sync),
    ) -> DbResult<u64>;

    /// Run a query and return every row, each of `columns` rendered as text.
    ///
    /// NULL columns come back as empty strings; cast non-text columns to
    /// VARCHAR in the query itself.
    async fn query_rows(&self, sql: &str, columns: usize) -> DbResult<Vec<Vec<String>>>;

    /// Execute query returning row count
    async fn query_count(&self, sql: &str) -> DbResult<usize>;

    /// Check if a table or view exists
    async fn table_exists(&self, name: &str) -> DbResult<bool>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}
