//! Migration run orchestration.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sky_core::migration::MigrationFile;
use sky_core::resolver::resolve_migrations;
use sky_db::Database;
use sky_sql::StatementSplitter;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use crate::error::{MigrateError, MigrateResult};
use crate::ledger::{LedgerEntry, VersionLedger};

/// One successfully applied migration in a run report.
#[derive(Debug, Clone, Serialize)]
pub struct AppliedMigration {
    pub version: String,
    pub description: String,
    pub script_name: String,
    pub execution_time_ms: u64,
}

/// Outcome of a completed migration run.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub timestamp: DateTime<Utc>,
    pub elapsed_secs: f64,
    pub up_to_date: bool,
    pub applied: Vec<AppliedMigration>,
}

/// A discovered migration not yet recorded in the ledger.
#[derive(Debug, Clone, Serialize)]
pub struct PendingMigration {
    pub version: String,
    pub description: String,
    pub script_name: String,
}

impl From<&MigrationFile> for PendingMigration {
    fn from(file: &MigrationFile) -> Self {
        Self {
            version: file.version.to_string(),
            description: file.description.clone(),
            script_name: file.filename.clone(),
        }
    }
}

/// Outcome of a validation pass. Produced without any writes.
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub applied_count: usize,
    pub pending: Vec<PendingMigration>,
}

/// Orchestrates a migration run.
///
/// Ensures the ledger exists, resolves the migration files, diffs them
/// against the ledger, then executes each pending migration inside its own
/// transaction, in ascending version order, halting on the first failure.
/// All collaborators are injected; the runner holds no global state.
pub struct MigrationRunner {
    db: Arc<dyn Database>,
    migrations_dir: PathBuf,
    splitter: StatementSplitter,
    ledger: VersionLedger,
}

impl MigrationRunner {
    /// Create a runner from its collaborators
    pub fn new(
        db: Arc<dyn Database>,
        migrations_dir: impl Into<PathBuf>,
        splitter: StatementSplitter,
        ledger: VersionLedger,
    ) -> Self {
        Self {
            db,
            migrations_dir: migrations_dir.into(),
            splitter,
            ledger,
        }
    }

    /// Bring the database to the latest known migration version.
    ///
    /// Deterministic and safely re-runnable: already applied versions are
    /// skipped by checksum match, and a failure leaves the ledger
    /// reflecting exactly the migrations that committed before it.
    pub async fn run(&self) -> MigrateResult<RunReport> {
        let run_start = Instant::now();

        self.ledger.ensure(self.db.as_ref()).await?;
        let pending = self.pending().await?;

        if pending.is_empty() {
            log::debug!("Database is up to date - no pending migrations");
            return Ok(RunReport {
                timestamp: Utc::now(),
                elapsed_secs: run_start.elapsed().as_secs_f64(),
                up_to_date: true,
                applied: Vec::new(),
            });
        }

        let mut applied = Vec::with_capacity(pending.len());
        for migration in &pending {
            applied.push(self.apply(migration).await?);
        }

        Ok(RunReport {
            timestamp: Utc::now(),
            elapsed_secs: run_start.elapsed().as_secs_f64(),
            up_to_date: false,
            applied,
        })
    }

    /// Check for drift and report pending migrations, without writing.
    pub async fn validate(&self) -> MigrateResult<ValidationReport> {
        let applied = self.ledger.applied(self.db.as_ref()).await?;
        let resolved = resolve_migrations(&self.migrations_dir)?;
        let pending = diff(resolved, &applied)?;

        Ok(ValidationReport {
            applied_count: applied.len(),
            pending: pending.iter().map(PendingMigration::from).collect(),
        })
    }

    /// The ledger this runner records into
    pub fn ledger(&self) -> &VersionLedger {
        &self.ledger
    }

    async fn pending(&self) -> MigrateResult<Vec<MigrationFile>> {
        let applied = self.ledger.applied(self.db.as_ref()).await?;
        let resolved = resolve_migrations(&self.migrations_dir)?;
        diff(resolved, &applied)
    }

    /// Execute one migration and its ledger row in a single transaction.
    ///
    /// Execution time covers splitting through the last statement and is
    /// recorded in the ledger row that commits with the migration.
    async fn apply(&self, migration: &MigrationFile) -> MigrateResult<AppliedMigration> {
        log::info!(
            "Executing migration V{}: {}",
            migration.version,
            migration.description
        );

        let split_start = Instant::now();
        let statements =
            self.splitter
                .split(&migration.content)
                .map_err(|e| MigrateError::SplitFailed {
                    version: migration.version.to_string(),
                    script: migration.filename.clone(),
                    source: e,
                })?;
        let split_ms = split_start.elapsed().as_millis() as u64;

        let ledger = &self.ledger;
        let exec_ms = self
            .db
            .execute_in_transaction(&statements, &|exec_ms| {
                ledger.record_sql(&LedgerEntry {
                    version: migration.version.to_string(),
                    description: migration.description.clone(),
                    script_name: migration.filename.clone(),
                    checksum: migration.checksum.clone(),
                    execution_time_ms: split_ms + exec_ms,
                })
            })
            .await
            .map_err(|e| MigrateError::ExecutionFailed {
                version: migration.version.to_string(),
                script: migration.filename.clone(),
                source: e,
            })?;

        let execution_time_ms = split_ms + exec_ms;
        log::info!(
            "Migration V{} completed in {}ms",
            migration.version,
            execution_time_ms
        );

        Ok(AppliedMigration {
            version: migration.version.to_string(),
            description: migration.description.clone(),
            script_name: migration.filename.clone(),
            execution_time_ms,
        })
    }
}

/// Partition resolved files into pending ones, failing fast when an applied
/// migration's checksum no longer matches its file content.
fn diff(
    resolved: Vec<MigrationFile>,
    applied: &BTreeMap<String, String>,
) -> MigrateResult<Vec<MigrationFile>> {
    let mut pending = Vec::new();
    for file in resolved {
        match applied.get(file.version.as_str()) {
            Some(recorded) if *recorded == file.checksum => {
                log::debug!("Migration V{} already applied", file.version);
            }
            Some(recorded) => {
                return Err(MigrateError::ChecksumMismatch {
                    script: file.filename,
                    expected: recorded.clone(),
                    actual: file.checksum,
                });
            }
            None => pending.push(file),
        }
    }
    Ok(pending)
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
