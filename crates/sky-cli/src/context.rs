//! Runtime context for CLI commands

use anyhow::{Context, Result};
use sky_core::{Config, Dialect};
use sky_db::{Database, DuckDbBackend};
use sky_migrate::{MigrationRunner, VersionLedger};
use sky_sql::StatementSplitter;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::GlobalArgs;

/// Runtime context containing loaded config and database connection
pub struct RuntimeContext {
    /// The loaded project configuration
    pub config: Config,

    /// Project root directory
    pub root: PathBuf,

    /// Database connection
    pub db: Arc<dyn Database>,

    /// Verbose output enabled
    pub verbose: bool,
}

impl RuntimeContext {
    /// Create a new runtime context from global arguments
    pub fn new(args: &GlobalArgs) -> Result<Self> {
        let root = PathBuf::from(&args.project_dir);

        let config = if let Some(config_path) = &args.config {
            Config::load(Path::new(config_path)).context("Failed to load configuration file")?
        } else {
            Config::load_from_dir(&root).context("Failed to load project configuration")?
        };

        let db_path = args.database.as_deref().unwrap_or(&config.database.path);
        let db: Arc<dyn Database> =
            Arc::new(DuckDbBackend::new(db_path).context("Failed to connect to database")?);

        Ok(Self {
            config,
            root,
            db,
            verbose: args.verbose,
        })
    }

    /// Build a migration runner from the loaded configuration
    pub fn runner(&self) -> MigrationRunner {
        let splitter = match self.config.dialect {
            Dialect::Duckdb => StatementSplitter::duckdb(),
            Dialect::Postgres => StatementSplitter::postgres(),
        };

        MigrationRunner::new(
            Arc::clone(&self.db),
            self.config.migrations_dir_absolute(&self.root),
            splitter,
            VersionLedger::new(self.config.ledger_table.as_str()),
        )
    }

    /// Print verbose output if enabled
    pub fn verbose(&self, msg: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", msg);
        }
    }
}
