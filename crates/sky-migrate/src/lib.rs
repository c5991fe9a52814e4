//! sky-migrate - Migration engine for Skylark
//!
//! This crate provides the version ledger and the migration runner that
//! brings a database to the latest known schema state.

pub mod error;
pub mod ledger;
pub mod runner;

pub use error::{MigrateError, MigrateResult};
pub use ledger::{LedgerEntry, LedgerRow, VersionLedger, DEFAULT_LEDGER_TABLE};
pub use runner::{
    AppliedMigration, MigrationRunner, PendingMigration, RunReport, ValidationReport,
};
