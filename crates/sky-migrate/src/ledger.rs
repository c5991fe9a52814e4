//! Persisted version ledger.

use serde::Serialize;
use sky_core::sql_utils::escape_sql_string;
use sky_db::Database;
use std::collections::BTreeMap;

use crate::error::{MigrateError, MigrateResult};

/// Default name of the ledger table
pub const DEFAULT_LEDGER_TABLE: &str = "schema_version";

/// Row data recorded for one applied migration.
#[derive(Debug, Clone)]
pub struct LedgerEntry {
    pub version: String,
    pub description: String,
    pub script_name: String,
    pub checksum: String,
    pub execution_time_ms: u64,
}

/// An applied-migration row as read back for status reporting.
#[derive(Debug, Clone, Serialize)]
pub struct LedgerRow {
    pub version: String,
    pub description: String,
    pub script_name: String,
    pub executed_at: String,
    pub execution_time_ms: String,
}

/// The persisted table of record for applied migrations.
///
/// Rows are immutable once written: each is inserted in the same
/// transaction as the migration's own statements and never updated or
/// deleted afterwards.
pub struct VersionLedger {
    table: String,
}

impl VersionLedger {
    /// Create a ledger over the given table name
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
        }
    }

    /// Ledger table name
    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// Idempotently create the ledger table if absent. Safe to call every run.
    pub async fn ensure(&self, db: &dyn Database) -> MigrateResult<()> {
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} (\n\
             version VARCHAR(50) PRIMARY KEY,\n\
             description VARCHAR(200) NOT NULL,\n\
             script_name VARCHAR(100) NOT NULL,\n\
             checksum VARCHAR(64) NOT NULL,\n\
             executed_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,\n\
             execution_time_ms INTEGER,\n\
             success BOOLEAN DEFAULT TRUE\n\
             )",
            self.table
        );
        db.execute_batch(&sql).await?;
        log::debug!("Ledger table '{}' ready", self.table);
        Ok(())
    }

    /// Map of applied version to recorded checksum.
    ///
    /// An absent ledger table reads as an empty map, so read-only callers
    /// never create it.
    pub async fn applied(&self, db: &dyn Database) -> MigrateResult<BTreeMap<String, String>> {
        if !db.table_exists(&self.table).await? {
            return Ok(BTreeMap::new());
        }

        let sql = format!(
            "SELECT version, checksum FROM {} ORDER BY version",
            self.table
        );
        let mut map = BTreeMap::new();
        for row in db.query_rows(&sql, 2).await? {
            let [version, checksum] = row.as_slice() else {
                return Err(MigrateError::MalformedLedger {
                    table: self.table.clone(),
                });
            };
            map.insert(version.clone(), checksum.clone());
        }
        Ok(map)
    }

    /// The INSERT statement recording one applied migration.
    ///
    /// Must execute inside the same transaction as the migration's own
    /// statements, so schema changes and their ledger row commit or roll
    /// back together. A duplicate version violates the primary key and
    /// fails that transaction.
    pub fn record_sql(&self, entry: &LedgerEntry) -> String {
        format!(
            "INSERT INTO {} (version, description, script_name, checksum, execution_time_ms, success) \
             VALUES ('{}', '{}', '{}', '{}', {}, TRUE)",
            self.table,
            escape_sql_string(&entry.version),
            escape_sql_string(&entry.description),
            escape_sql_string(&entry.script_name),
            escape_sql_string(&entry.checksum),
            entry.execution_time_ms,
        )
    }

    /// Full application history, oldest version first.
    pub async fn history(&self, db: &dyn Database) -> MigrateResult<Vec<LedgerRow>> {
        if !db.table_exists(&self.table).await? {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT version, description, script_name, \
             CAST(executed_at AS VARCHAR), CAST(execution_time_ms AS VARCHAR) \
             FROM {} ORDER BY CAST(version AS BIGINT), version",
            self.table
        );
        let mut rows = Vec::new();
        for row in db.query_rows(&sql, 5).await? {
            let [version, description, script_name, executed_at, execution_time_ms] =
                row.as_slice()
            else {
                return Err(MigrateError::MalformedLedger {
                    table: self.table.clone(),
                });
            };
            rows.push(LedgerRow {
                version: version.clone(),
                description: description.clone(),
                script_name: script_name.clone(),
                executed_at: executed_at.clone(),
                execution_time_ms: execution_time_ms.clone(),
            });
        }
        Ok(rows)
    }
}

impl Default for VersionLedger {
    fn default() -> Self {
        Self::new(DEFAULT_LEDGER_TABLE)
    }
}

#[cfg(test)]
#[path = "ledger_test.rs"]
mod tests;
