//! Migration definitions and how they are applied

use crate::error::{MigrateError, MigrateResult};
use crate::ledger;
use mm_core::script::{BEGIN, COMMIT};
use mm_core::{append_operation, validate, Direction, Operation, Script};
use mm_db::Database;

/// The executable content of one migration file.
///
/// `up` and `down` are `None` when the file never defined that procedure;
/// applying such a direction only moves the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationDefinition {
    /// Webapp that programs added by this migration are linked to
    pub webapp: String,
    /// Produce scripts without executing them
    pub dry_run: bool,
    pub up: Option<Vec<Operation>>,
    pub down: Option<Vec<Operation>>,
}

impl MigrationDefinition {
    /// Create a definition bound to `webapp` with no procedures.
    pub fn new(webapp: impl Into<String>) -> MigrateResult<Self> {
        let webapp = webapp.into();
        validate(&[Some(webapp.as_str())])?;
        Ok(Self {
            webapp,
            dry_run: false,
            up: None,
            down: None,
        })
    }

    /// Set dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Set the `up` procedure
    pub fn with_up(mut self, operations: Vec<Operation>) -> Self {
        self.up = Some(operations);
        self
    }

    /// Set the `down` procedure
    pub fn with_down(mut self, operations: Vec<Operation>) -> Self {
        self.down = Some(operations);
        self
    }

    /// Operations for `direction` (empty when the procedure is undefined)
    pub fn operations(&self, direction: Direction) -> &[Operation] {
        let procedure = match direction {
            Direction::Up => self.up.as_deref(),
            Direction::Down => self.down.as_deref(),
        };
        procedure.unwrap_or_default()
    }

    /// Build the full transaction for one step.
    ///
    /// The ledger mutation for `filename` is always the last statement before
    /// `COMMIT;`, so it only lands if everything before it succeeded.
    pub fn build_script(&self, direction: Direction, filename: &str) -> MigrateResult<Script> {
        let mut script = Script::new();
        script.push(BEGIN);
        for op in self.operations(direction) {
            append_operation(&mut script, op, &self.webapp).map_err(|source| {
                MigrateError::Operation {
                    filename: filename.to_string(),
                    direction,
                    source,
                }
            })?;
        }
        script.push(ledger::record_statement(direction, filename));
        script.push(COMMIT);
        Ok(script)
    }

    /// Build the script for `direction` and, unless in dry-run mode, submit it
    /// to `db` as one batch. The script is returned either way.
    pub fn apply(
        &self,
        db: &dyn Database,
        direction: Direction,
        filename: &str,
    ) -> MigrateResult<Script> {
        let script = self.build_script(direction, filename)?;

        if self.dry_run {
            log::warn!("Dry run: {} ({}) not executed", filename, direction);
            return Ok(script);
        }

        db.execute_batch(&script.to_sql())
            .map_err(|source| MigrateError::Execution {
                filename: filename.to_string(),
                direction,
                source,
            })?;
        log::info!("Applied {} ({})", filename, direction);
        Ok(script)
    }
}

#[cfg(test)]
#[path = "definition_test.rs"]
mod tests;
