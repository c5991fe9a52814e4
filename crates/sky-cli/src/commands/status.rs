//! Status command implementation

use anyhow::Result;
use serde::Serialize;
use sky_migrate::{LedgerRow, PendingMigration};

use crate::cli::{GlobalArgs, OutputFormat, StatusArgs};
use crate::context::RuntimeContext;

/// Combined applied/pending view of the migration state
#[derive(Debug, Serialize)]
struct StatusReport {
    applied: Vec<LedgerRow>,
    pending: Vec<PendingMigration>,
}

/// Execute the status command
pub(crate) async fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let runner = ctx.runner();

    let applied = runner.ledger().history(ctx.db.as_ref()).await?;
    let validation = runner.validate().await?;
    let report = StatusReport {
        applied,
        pending: validation.pending,
    };

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => print_status(&report),
    }

    Ok(())
}

fn print_status(report: &StatusReport) {
    if report.applied.is_empty() {
        println!("No migrations applied yet");
    } else {
        println!("Applied migrations ({}):", report.applied.len());
        for row in &report.applied {
            println!(
                "  V{}  {}  {}  [{} ms]",
                row.version, row.description, row.executed_at, row.execution_time_ms
            );
        }
    }

    if report.pending.is_empty() {
        println!("\nDatabase is up to date");
    } else {
        println!("\nPending migrations ({}):", report.pending.len());
        for pending in &report.pending {
            println!("  V{}  {}", pending.version, pending.description);
        }
    }
}
