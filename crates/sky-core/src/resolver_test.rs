use super::*;
use std::fs;
use tempfile::TempDir;

fn write_migration(dir: &TempDir, name: &str, content: &str) {
    fs::write(dir.path().join(name), content).unwrap();
}

#[test]
fn test_missing_directory_is_empty_set() {
    let migrations = resolve_migrations(Path::new("/nonexistent/migrations")).unwrap();
    assert!(migrations.is_empty());
}

#[test]
fn test_empty_directory() {
    let dir = TempDir::new().unwrap();
    let migrations = resolve_migrations(dir.path()).unwrap();
    assert!(migrations.is_empty());
}

#[test]
fn test_sorted_numerically_not_lexically() {
    let dir = TempDir::new().unwrap();
    write_migration(&dir, "V010__ten.sql", "SELECT 10;");
    write_migration(&dir, "V2__two.sql", "SELECT 2;");
    write_migration(&dir, "V001__one.sql", "SELECT 1;");

    let migrations = resolve_migrations(dir.path()).unwrap();
    let versions: Vec<&str> = migrations.iter().map(|m| m.version.as_str()).collect();
    assert_eq!(versions, vec!["001", "2", "010"]);
}

#[test]
fn test_skips_invalid_filenames() {
    let dir = TempDir::new().unwrap();
    write_migration(&dir, "V001__init.sql", "CREATE TABLE t (id INTEGER);");
    write_migration(&dir, "readme.sql", "-- not a migration");
    write_migration(&dir, "1_foo.sql", "SELECT 1;");
    write_migration(&dir, "notes.txt", "not sql at all");

    let migrations = resolve_migrations(dir.path()).unwrap();
    assert_eq!(migrations.len(), 1);
    assert_eq!(migrations[0].filename, "V001__init.sql");
}

#[test]
fn test_populates_content_and_checksum() {
    let dir = TempDir::new().unwrap();
    let content = "CREATE TABLE widgets (id INTEGER);\n";
    write_migration(&dir, "V001__create_widgets.sql", content);

    let migrations = resolve_migrations(dir.path()).unwrap();
    assert_eq!(migrations.len(), 1);
    let m = &migrations[0];
    assert_eq!(m.content, content);
    assert_eq!(m.checksum, crate::checksum::compute_checksum(content));
    assert_eq!(m.description, "create widgets");
}

#[test]
fn test_duplicate_numeric_version_is_error() {
    let dir = TempDir::new().unwrap();
    write_migration(&dir, "V1__first.sql", "SELECT 1;");
    write_migration(&dir, "V001__second.sql", "SELECT 2;");

    let result = resolve_migrations(dir.path());
    assert!(matches!(
        result,
        Err(CoreError::DuplicateVersion { .. })
    ));
}

#[test]
fn test_subdirectories_are_ignored() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("V001__not_a_file.sql")).unwrap();
    write_migration(&dir, "V002__real.sql", "SELECT 2;");

    let migrations = resolve_migrations(dir.path()).unwrap();
    assert_eq!(migrations.len(), 1);
    assert_eq!(migrations[0].version.as_str(), "002");
}
