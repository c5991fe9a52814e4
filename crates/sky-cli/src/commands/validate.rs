//! Validate command implementation

use anyhow::Result;

use crate::cli::{GlobalArgs, ValidateArgs};
use crate::context::RuntimeContext;

/// Execute the validate command
pub(crate) async fn execute(_args: &ValidateArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = RuntimeContext::new(global)?;
    let runner = ctx.runner();

    // fails with a drift error if an applied script was edited
    let validation = runner.validate().await?;

    println!(
        "Validation OK: {} applied, {} pending",
        validation.applied_count,
        validation.pending.len()
    );
    for pending in &validation.pending {
        println!("  - V{}: {}", pending.version, pending.description);
    }

    Ok(())
}
