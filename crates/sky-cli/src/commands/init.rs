//! Init command implementation - scaffolds a new Skylark project

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::cli::InitArgs;

const SAMPLE_MIGRATION: &str = "\
-- First migration: create an example table.
-- Applied scripts must never be edited; add a new V<version>__*.sql instead.
CREATE TABLE example (
    id INTEGER PRIMARY KEY,
    name VARCHAR NOT NULL
);
";

/// Execute the init command
pub(crate) async fn execute(args: &InitArgs) -> Result<()> {
    // Reject names that could cause path traversal or confusing directory names
    if args.name.contains('/')
        || args.name.contains('\\')
        || args.name.contains("..")
        || args.name.starts_with('.')
        || args.name.starts_with('-')
    {
        anyhow::bail!(
            "Invalid project name '{}': must not contain '/', '\\', '..', or start with '.' or '-'",
            args.name
        );
    }

    let project_dir = Path::new(&args.name);

    if project_dir.exists() {
        anyhow::bail!(
            "Directory '{}' already exists. Choose a different project name.",
            args.name
        );
    }

    println!("Creating new Skylark project: {}\n", args.name);

    let migrations_dir = project_dir.join("migrations");
    fs::create_dir_all(&migrations_dir)
        .with_context(|| format!("Failed to create directory: {}", migrations_dir.display()))?;

    // Escape YAML special characters in interpolated values
    let safe_name = args.name.replace('"', "\\\"");
    let safe_db_path = args.database_path.replace('"', "\\\"");
    let config_content = format!(
        r#"name: "{name}"
version: "1.0.0"

migrations_dir: migrations
dialect: duckdb
ledger_table: schema_version

database:
  path: "{db_path}"
"#,
        name = safe_name,
        db_path = safe_db_path
    );
    fs::write(project_dir.join("skylark.yml"), config_content)
        .context("Failed to write skylark.yml")?;

    fs::write(
        migrations_dir.join("V001__create_example.sql"),
        SAMPLE_MIGRATION,
    )
    .context("Failed to write sample migration")?;

    println!("Created:");
    println!("  {}/skylark.yml", args.name);
    println!("  {}/migrations/V001__create_example.sql", args.name);
    println!("\nNext steps:");
    println!("  cd {}", args.name);
    println!("  sky run");

    Ok(())
}
