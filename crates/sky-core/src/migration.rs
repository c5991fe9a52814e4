//! Migration file model and filename parsing.

use regex::Regex;
use std::sync::OnceLock;

use crate::version::Version;

/// A versioned SQL migration discovered on disk.
///
/// Rebuilt from the filesystem on every run; content and checksum are
/// immutable for the lifetime of the run.
#[derive(Debug, Clone)]
pub struct MigrationFile {
    /// Version extracted from the filename
    pub version: Version,

    /// Human-readable description (filename separators replaced with spaces)
    pub description: String,

    /// Original file name, kept verbatim for the ledger audit trail
    pub filename: String,

    /// Full raw text of the SQL script
    pub content: String,

    /// SHA-256 hex checksum of `content`
    pub checksum: String,
}

fn filename_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^V(\d+)__(.+)\.sql$").expect("valid filename pattern"))
}

/// Parse a migration filename of the form `V<digits>__<description>.sql`.
///
/// Returns the version and the description with underscores replaced by
/// spaces, or `None` when the filename does not match the pattern.
pub fn parse_migration_filename(filename: &str) -> Option<(Version, String)> {
    let caps = filename_pattern().captures(filename)?;
    let version = Version::parse(&caps[1])?;
    let description = caps[2].replace('_', " ");
    Some((version, description))
}

#[cfg(test)]
#[path = "migration_test.rs"]
mod tests;
