use super::*;
use mm_core::OperationKind;
use mm_db::DuckDbBackend;

const MENU_SCHEMA: &str = include_str!("../tests/fixtures/menu_schema.sql");

fn menu_db() -> DuckDbBackend {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch(MENU_SCHEMA).unwrap();
    ledger::ensure_table(&db).unwrap();
    db
}

fn script_up(mut body: Vec<&str>) -> Vec<String> {
    body.insert(0, "BEGIN;");
    body.push("INSERT INTO menu_migrations (filename) VALUES('a_file');");
    body.push("COMMIT;");
    body.into_iter().map(String::from).collect()
}

fn script_down(mut body: Vec<&str>) -> Vec<String> {
    body.insert(0, "BEGIN;");
    body.push("DELETE FROM menu_migrations WHERE filename = 'a_file';");
    body.push("COMMIT;");
    body.into_iter().map(String::from).collect()
}

fn count(db: &DuckDbBackend, table: &str) -> String {
    db.query_strings(&format!("SELECT CAST(COUNT(*) AS VARCHAR) FROM {table}"))
        .unwrap()
        .remove(0)
}

#[test]
fn test_add_drop_functional_area_dry_run() {
    let migration = MigrationDefinition::new("Appname")
        .unwrap()
        .with_dry_run(true)
        .with_up(vec![Operation::new(OperationKind::AddFunctionalArea, "Func")])
        .with_down(vec![Operation::new(OperationKind::DropFunctionalArea, "Func")]);
    let db = DuckDbBackend::in_memory().unwrap();

    let up = migration.apply(&db, Direction::Up, "a_file").unwrap();
    assert_eq!(
        up.statements(),
        script_up(vec![
            "INSERT INTO functional_areas (functional_area_name, rmd_menu) VALUES('Func', false);"
        ])
        .as_slice()
    );

    let down = migration.apply(&db, Direction::Down, "a_file").unwrap();
    assert_eq!(down.len(), 9);
    assert_eq!(
        down.statements()[6],
        "DELETE FROM functional_areas WHERE functional_area_name ='Func';"
    );
    assert_eq!(
        down.statements()[7],
        "DELETE FROM menu_migrations WHERE filename = 'a_file';"
    );
    // Nothing was executed: the ledger table was never even created
    assert!(!db.table_exists(ledger::LEDGER_TABLE).unwrap());
}

#[test]
fn test_undefined_procedure_is_empty_body() {
    let migration = MigrationDefinition::new("Appname").unwrap();
    assert_eq!(
        migration
            .build_script(Direction::Up, "a_file")
            .unwrap()
            .statements(),
        script_up(vec![]).as_slice()
    );
    assert_eq!(
        migration
            .build_script(Direction::Down, "a_file")
            .unwrap()
            .statements(),
        script_down(vec![]).as_slice()
    );
}

#[test]
fn test_up_and_down_differ_only_in_ledger_statement() {
    let migration = MigrationDefinition::new("Appname").unwrap();
    let up = migration.build_script(Direction::Up, "f").unwrap();
    let down = migration.build_script(Direction::Down, "f").unwrap();
    assert_eq!(up.statements()[0], "BEGIN;");
    assert_eq!(
        up.statements()[1],
        "INSERT INTO menu_migrations (filename) VALUES('f');"
    );
    assert_eq!(
        down.statements()[1],
        "DELETE FROM menu_migrations WHERE filename = 'f';"
    );
    assert_eq!(up.statements()[2], "COMMIT;");
    assert_eq!(down.statements()[2], "COMMIT;");
}

#[test]
fn test_validation_error_names_the_file() {
    let migration = MigrationDefinition::new("Appname")
        .unwrap()
        .with_up(vec![Operation::new(OperationKind::ChangeFunctionalArea, "Func")]);
    let err = migration
        .build_script(Direction::Up, "202301010101_bad.yml")
        .unwrap_err();
    assert!(err.is_validation_error());
    assert!(err.to_string().contains("202301010101_bad.yml"));
}

#[test]
fn test_padded_webapp_rejected() {
    let err = MigrationDefinition::new("Appname ").unwrap_err();
    assert!(err.is_validation_error());
}

#[test]
fn test_apply_up_then_down_restores_ledger() {
    let db = menu_db();
    let migration = MigrationDefinition::new("Appname")
        .unwrap()
        .with_up(vec![
            Operation::new(OperationKind::AddFunctionalArea, "Func"),
            Operation::new(OperationKind::AddProgram, "Prog").option("functional_area", "Func"),
        ])
        .with_down(vec![Operation::new(OperationKind::DropFunctionalArea, "Func")]);

    migration.apply(&db, Direction::Up, "a_file").unwrap();
    assert_eq!(ledger::read_applied(&db).unwrap(), vec!["a_file"]);
    assert_eq!(count(&db, "programs"), "1");
    assert_eq!(
        db.query_strings("SELECT webapp FROM programs_webapps").unwrap(),
        vec!["Appname"]
    );

    migration.apply(&db, Direction::Down, "a_file").unwrap();
    assert!(ledger::read_applied(&db).unwrap().is_empty());
    assert_eq!(count(&db, "functional_areas"), "0");
    assert_eq!(count(&db, "programs"), "0");
    assert_eq!(count(&db, "programs_webapps"), "0");
}

#[test]
fn test_failed_apply_leaves_ledger_untouched() {
    let db = menu_db();
    // Program in a functional area that does not exist: functional_area_id is NULL
    let migration = MigrationDefinition::new("Appname").unwrap().with_up(vec![
        Operation::new(OperationKind::AddFunctionalArea, "Func"),
        Operation::new(OperationKind::AddProgram, "Prog").option("functional_area", "Nope"),
    ]);

    let err = migration.apply(&db, Direction::Up, "a_file").unwrap_err();
    assert!(matches!(err, MigrateError::Execution { .. }));
    assert!(ledger::read_applied(&db).unwrap().is_empty());
    assert_eq!(count(&db, "functional_areas"), "0");
}

#[test]
fn test_move_program_function_picks_the_grouped_namesake() {
    let db = menu_db();
    let cult = |group: Option<&str>| {
        let op = Operation::new(OperationKind::AddProgramFunction, "Cult")
            .option("functional_area", "Func")
            .option("program", "Prog")
            .option("url", "/list/cultivars");
        match group {
            Some(group) => op.option("group", group),
            None => op,
        }
    };
    let setup = MigrationDefinition::new("Appname").unwrap().with_up(vec![
        Operation::new(OperationKind::AddFunctionalArea, "Func"),
        Operation::new(OperationKind::AddProgram, "Prog").option("functional_area", "Func"),
        Operation::new(OperationKind::AddProgram, "Other").option("functional_area", "Func"),
        cult(None),
        cult(Some("G")),
    ]);
    setup.apply(&db, Direction::Up, "setup").unwrap();

    let move_cult = |group: Option<&str>| {
        let op = Operation::new(OperationKind::MoveProgramFunction, "Cult")
            .option("functional_area", "Func")
            .option("program", "Prog")
            .option("to_program", "Other");
        match group {
            Some(group) => op.option("match_group", group),
            None => op,
        }
    };
    let placement = || {
        db.query_strings(
            "SELECT COALESCE(f.group_name, '-') || ':' || p.program_name \
             FROM program_functions f JOIN programs p ON p.id = f.program_id \
             ORDER BY f.id",
        )
        .unwrap()
    };

    MigrationDefinition::new("Appname")
        .unwrap()
        .with_up(vec![move_cult(None)])
        .apply(&db, Direction::Up, "move_ungrouped")
        .unwrap();
    assert_eq!(placement(), vec!["-:Other", "G:Prog"]);

    MigrationDefinition::new("Appname")
        .unwrap()
        .with_up(vec![move_cult(Some("G"))])
        .apply(&db, Direction::Up, "move_grouped")
        .unwrap();
    assert_eq!(placement(), vec!["-:Other", "G:Other"]);
}
