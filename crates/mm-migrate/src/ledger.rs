//! The `menu_migrations` ledger: one row per applied migration filename.

use mm_core::sql_utils::quote_literal;
use mm_core::Direction;
use mm_db::{ColumnDef, Database, DbResult};

/// Ledger table name
pub const LEDGER_TABLE: &str = "menu_migrations";

/// Create the ledger table unless it already exists.
pub fn ensure_table(db: &dyn Database) -> DbResult<()> {
    if db.table_exists(LEDGER_TABLE)? {
        return Ok(());
    }
    log::debug!("Creating ledger table {}", LEDGER_TABLE);
    db.create_table(LEDGER_TABLE, &[ColumnDef::text_primary_key("filename")])
}

/// All applied filenames, ordered.
pub fn read_applied(db: &dyn Database) -> DbResult<Vec<String>> {
    db.query_strings(&format!(
        "SELECT filename FROM {LEDGER_TABLE} ORDER BY filename"
    ))
}

/// Statement recording `filename` as applied
pub fn insert_statement(filename: &str) -> String {
    format!(
        "INSERT INTO {LEDGER_TABLE} (filename) VALUES({});",
        quote_literal(filename)
    )
}

/// Statement removing `filename` from the ledger
pub fn delete_statement(filename: &str) -> String {
    format!(
        "DELETE FROM {LEDGER_TABLE} WHERE filename = {};",
        quote_literal(filename)
    )
}

/// Ledger mutation closing a migration step in `direction`
pub fn record_statement(direction: Direction, filename: &str) -> String {
    match direction {
        Direction::Up => insert_statement(filename),
        Direction::Down => delete_statement(filename),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mm_db::DuckDbBackend;

    #[test]
    fn test_statements() {
        assert_eq!(
            insert_statement("a_file"),
            "INSERT INTO menu_migrations (filename) VALUES('a_file');"
        );
        assert_eq!(
            delete_statement("a_file"),
            "DELETE FROM menu_migrations WHERE filename = 'a_file';"
        );
        assert_eq!(record_statement(Direction::Up, "f"), insert_statement("f"));
        assert_eq!(record_statement(Direction::Down, "f"), delete_statement("f"));
    }

    #[test]
    fn test_ensure_table_is_idempotent() {
        let db = DuckDbBackend::in_memory().unwrap();
        ensure_table(&db).unwrap();
        ensure_table(&db).unwrap();
        assert!(db.table_exists(LEDGER_TABLE).unwrap());
        assert!(read_applied(&db).unwrap().is_empty());
    }

    #[test]
    fn test_read_applied_is_ordered() {
        let db = DuckDbBackend::in_memory().unwrap();
        ensure_table(&db).unwrap();
        db.execute_batch(&format!(
            "{}\n{}",
            insert_statement("202302010000_b.yml"),
            insert_statement("202301010000_a.yml")
        ))
        .unwrap();

        assert_eq!(
            read_applied(&db).unwrap(),
            vec!["202301010000_a.yml", "202302010000_b.yml"]
        );
    }
}
