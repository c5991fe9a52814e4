//! Error types for sky-migrate

use sky_core::CoreError;
use sky_db::DbError;
use sky_sql::SqlError;
use thiserror::Error;

/// Migration run errors
#[derive(Error, Debug)]
pub enum MigrateError {
    /// M001: a previously applied migration's file content changed
    #[error(
        "[M001] Migration {script} has been modified after being applied\n  \
         recorded checksum: {expected}\n  \
         current checksum:  {actual}\n\
         Never modify applied migrations"
    )]
    ChecksumMismatch {
        script: String,
        expected: String,
        actual: String,
    },

    /// M002: a statement failed; the migration's transaction was rolled back
    #[error("[M002] Migration V{version} ({script}) failed and was rolled back: {source}")]
    ExecutionFailed {
        version: String,
        script: String,
        source: DbError,
    },

    /// M003: the migration script could not be tokenized
    #[error("[M003] Migration V{version} ({script}) could not be tokenized: {source}")]
    SplitFailed {
        version: String,
        script: String,
        source: SqlError,
    },

    /// M004: a ledger row did not have the expected shape
    #[error("[M004] Malformed row in ledger table '{table}'")]
    MalformedLedger { table: String },

    /// Migration discovery error
    #[error("Migration discovery failed: {0}")]
    Core(#[from] CoreError),

    /// Database error outside a migration's own transaction
    #[error("Ledger access failed: {0}")]
    Db(#[from] DbError),
}

/// Result type alias for MigrateError
pub type MigrateResult<T> = Result<T, MigrateError>;
