//! Run command implementation

use anyhow::{Context, Result};
use sky_migrate::RunReport;

use crate::cli::{GlobalArgs, OutputFormat, RunArgs};
use crate::context::RuntimeContext;

/// Execute the run command
pub(crate) async fn execute(args: &RunArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let runner = ctx.runner();

    ctx.verbose(&format!(
        "Using database '{}' with ledger table '{}'",
        ctx.config.database.path, ctx.config.ledger_table
    ));

    // pre-flight: surfaces drift before anything executes
    let validation = runner.validate().await?;
    if args.output == OutputFormat::Table && !validation.pending.is_empty() {
        println!("Found {} pending migration(s):", validation.pending.len());
        for pending in &validation.pending {
            println!("  - V{}: {}", pending.version, pending.description);
        }
        println!();
    }

    let report = runner
        .run()
        .await
        .context("Migration run aborted; no further migrations were attempted")?;

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => print_summary(&report),
    }

    Ok(())
}

fn print_summary(report: &RunReport) {
    if report.up_to_date {
        println!("Database is up to date - no pending migrations");
        return;
    }

    for applied in &report.applied {
        println!(
            "  V{} {} ({} ms)",
            applied.version, applied.description, applied.execution_time_ms
        );
    }
    println!(
        "\nSuccessfully applied {} migration(s) in {:.2}s",
        report.applied.len(),
        report.elapsed_secs
    );
}
