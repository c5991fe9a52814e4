//! Migration directory scanning.

use std::fs;
use std::path::Path;

use crate::checksum::compute_checksum;
use crate::error::{CoreError, CoreResult};
use crate::migration::{parse_migration_filename, MigrationFile};

/// Scan a migrations directory and return every validly named migration,
/// sorted ascending by version.
///
/// A missing directory is treated as an empty migration set rather than an
/// error. `.sql` files that do not match the `V<digits>__<description>.sql`
/// pattern are skipped with a warning and never treated as pending.
pub fn resolve_migrations(dir: &Path) -> CoreResult<Vec<MigrationFile>> {
    if !dir.exists() {
        log::warn!("No migrations directory found at {}", dir.display());
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(dir).map_err(|e| CoreError::IoWithPath {
        path: dir.display().to_string(),
        source: e,
    })?;

    let mut migrations = Vec::new();
    for entry in entries {
        let path = entry.map_err(CoreError::Io)?.path();
        if !path.is_file() {
            continue;
        }
        let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !filename.ends_with(".sql") {
            continue;
        }
        let Some((version, description)) = parse_migration_filename(filename) else {
            log::warn!("Skipping invalid migration filename: {filename}");
            continue;
        };

        let content = fs::read_to_string(&path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let checksum = compute_checksum(&content);

        migrations.push(MigrationFile {
            version,
            description,
            filename: filename.to_string(),
            content,
            checksum,
        });
    }

    migrations.sort_by(|a, b| a.version.cmp(&b.version));

    // V1 and V001 would both claim the same ledger slot
    for pair in migrations.windows(2) {
        if pair[0].version.number() == pair[1].version.number() {
            return Err(CoreError::DuplicateVersion {
                version: pair[0].version.to_string(),
                first: pair[0].filename.clone(),
                second: pair[1].filename.clone(),
            });
        }
    }

    Ok(migrations)
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
