use super::*;

#[test]
fn test_parse_minimal_config() {
    let yaml = r#"
name: test_project
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.name, "test_project");
    assert_eq!(config.migrations_dir, "migrations");
    assert_eq!(config.ledger_table, "schema_version");
    assert_eq!(config.dialect, Dialect::Duckdb);
    assert_eq!(config.database.path, "skylark.duckdb");
}

#[test]
fn test_parse_full_config() {
    let yaml = r#"
name: voice_collector
version: "2.1.0"
migrations_dir: db/migrations
dialect: postgres
ledger_table: schema_history
database:
  path: ":memory:"
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.name, "voice_collector");
    assert_eq!(config.migrations_dir, "db/migrations");
    assert_eq!(config.dialect, Dialect::Postgres);
    assert_eq!(config.ledger_table, "schema_history");
    assert_eq!(config.database.path, ":memory:");
}

#[test]
fn test_unknown_fields_rejected() {
    let yaml = r#"
name: test
mystery_field: true
"#;
    let result: Result<Config, _> = serde_yaml::from_str(yaml);
    assert!(result.is_err());
}

#[test]
fn test_migrations_dir_absolute() {
    let config: Config = serde_yaml::from_str("name: test").unwrap();
    let root = std::path::PathBuf::from("/srv/app");
    assert_eq!(
        config.migrations_dir_absolute(&root),
        root.join("migrations")
    );
}

#[test]
fn test_load_missing_file() {
    let result = Config::load(Path::new("/nonexistent/skylark.yml"));
    assert!(matches!(result, Err(CoreError::ConfigNotFound { .. })));
}

#[test]
fn test_load_from_dir() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("skylark.yml"),
        "name: from_dir\nmigrations_dir: sql\n",
    )
    .unwrap();

    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.name, "from_dir");
    assert_eq!(config.migrations_dir, "sql");
}

#[test]
fn test_validate_rejects_bad_ledger_table() {
    let yaml = r#"
name: test
ledger_table: "schema version; drop table users"
"#;
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("skylark.yml"), yaml).unwrap();

    let result = Config::load_from_dir(dir.path());
    assert!(matches!(result, Err(CoreError::ConfigInvalid { .. })));
}
