//! Accumulated SQL for a single migration step

use serde::Serialize;

/// Transaction start marker
pub const BEGIN: &str = "BEGIN;";

/// Transaction commit marker
pub const COMMIT: &str = "COMMIT;";

/// Ordered SQL statements built during one `apply`.
///
/// A statement entry may itself contain more than one SQL statement when an
/// operation emits them as a unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Script {
    statements: Vec<String>,
}

impl Script {
    /// Create an empty script
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a statement
    pub fn push(&mut self, statement: impl Into<String>) {
        self.statements.push(statement.into());
    }

    /// Statements in order
    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    /// Number of statement entries
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// True when nothing has been appended
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Join the statements into a single batch.
    pub fn to_sql(&self) -> String {
        self.statements.join("\n")
    }
}
