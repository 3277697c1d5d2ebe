use super::*;
use std::fs;
use tempfile::TempDir;

fn global(project_dir: &Path) -> GlobalArgs {
    GlobalArgs {
        verbose: false,
        project_dir: project_dir.display().to_string(),
        config: None,
        database: None,
    }
}

#[test]
fn test_load_project_without_config_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let project = load_project(&global(dir.path())).unwrap();
    assert_eq!(project.config.migrations_path, "db/menu");
    assert_eq!(project.migrations_dir(), dir.path().join("db/menu"));
}

#[test]
fn test_load_project_reads_config() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("menu_migrations.yml"),
        "migrations_path: menus\nwebapp: Nspack\n",
    )
    .unwrap();

    let project = load_project(&global(dir.path())).unwrap();
    assert_eq!(project.config.webapp.as_deref(), Some("Nspack"));
    assert_eq!(project.migrations_dir(), dir.path().join("menus"));
}

#[test]
fn test_explicit_config_must_exist() {
    let dir = TempDir::new().unwrap();
    let mut args = global(dir.path());
    args.config = Some(dir.path().join("missing.yml").display().to_string());
    assert!(load_project(&args).is_err());
}

#[test]
fn test_open_database_from_cli_flag() {
    let dir = TempDir::new().unwrap();
    let project = load_project(&global(dir.path())).unwrap();
    let mut args = global(dir.path());
    args.database = Some(":memory:".to_string());
    assert!(open_database(&project, &args).is_ok());
}

#[test]
fn test_open_database_for_reading_does_not_create_file() {
    let dir = TempDir::new().unwrap();
    let project = load_project(&global(dir.path())).unwrap();
    let mut args = global(dir.path());
    let path = dir.path().join("menu.duckdb");
    args.database = Some(path.display().to_string());

    assert!(open_database_for_reading(&project, &args).is_ok());
    assert!(!path.exists());

    open_database(&project, &args).unwrap();
    assert!(path.exists());
    assert!(open_database_for_reading(&project, &args).is_ok());
}

#[test]
fn test_calculate_column_widths() {
    let rows = vec![vec!["202301010800".to_string(), "yes".to_string()]];
    assert_eq!(calculate_column_widths(&["SEQUENCE", "APPLIED"], &rows), vec![12, 7]);
}

#[test]
fn test_format_table() {
    let rows = vec![
        vec!["a.yml".to_string(), "applied".to_string()],
        vec!["longer.yml".to_string(), "pending".to_string()],
    ];
    let table = format_table(&["FILE", "STATUS"], &rows);
    assert_eq!(
        table,
        "FILE        STATUS\n----------  -------\na.yml       applied\nlonger.yml  pending"
    );
}
