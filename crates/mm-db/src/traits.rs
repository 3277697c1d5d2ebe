//! Database trait definition

use crate::error::DbResult;

/// Column in a table created through [`Database::create_table`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    pub data_type: String,
    pub primary_key: bool,
}

impl ColumnDef {
    /// Text primary-key column
    pub fn text_primary_key(name: &str) -> Self {
        Self {
            name: name.to_string(),
            data_type: "VARCHAR".to_string(),
            primary_key: true,
        }
    }
}

/// Executor the migrator runs against.
///
/// Calls block until the database answers. `execute_batch` must run the
/// statements in order on one connection so that `BEGIN;`/`COMMIT;` markers in
/// the batch delimit a single transaction; when a statement fails the
/// implementation rolls the open transaction back before returning the error.
pub trait Database: Send + Sync {
    /// Check if a table exists
    fn table_exists(&self, name: &str) -> DbResult<bool>;

    /// Create a table with the given columns
    fn create_table(&self, name: &str, columns: &[ColumnDef]) -> DbResult<()>;

    /// Execute multiple SQL statements
    fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Run a single-column query, returning the values as strings in row order
    fn query_strings(&self, sql: &str) -> DbResult<Vec<String>>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}
