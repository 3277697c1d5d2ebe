//! The migrator: discovery, ledger checks, planning and execution.

use crate::definition::MigrationDefinition;
use crate::error::MigrateResult;
use crate::ledger;
use crate::loader;
use crate::resolver::{check_consistency, resolve, PlannedMigration};
use mm_core::{discover, Direction, MigrationFile, Script};
use mm_db::Database;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Outcome of one executed (or dry-run) migration step
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub filename: String,
    pub direction: Direction,
    pub dry_run: bool,
    pub script: Script,
}

/// Everything a run did, in execution order
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub steps: Vec<StepReport>,
}

impl RunReport {
    /// True when nothing needed to run
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps that were executed against the database
    pub fn executed(&self) -> impl Iterator<Item = &StepReport> {
        self.steps.iter().filter(|s| !s.dry_run)
    }
}

/// Applied state of a discovered migration file
#[derive(Debug, Clone, Serialize)]
pub struct MigrationStatus {
    pub sequence_number: i64,
    pub filename: String,
    pub applied: bool,
}

/// Brings a database's menu to a target version.
///
/// Construction validates the migrations directory and the ledger; nothing is
/// executed until [`run`](Self::run).
pub struct Migrator<'a> {
    db: &'a dyn Database,
    directory: PathBuf,
    target: Option<i64>,
    files: Vec<MigrationFile>,
    applied: BTreeSet<String>,
    ledger_ready: bool,
    force_dry_run: bool,
}

impl<'a> Migrator<'a> {
    /// Discover migrations in `directory`, make sure the ledger exists, and
    /// check that every ledger entry still has a file.
    pub fn new(
        db: &'a dyn Database,
        directory: impl Into<PathBuf>,
        target: Option<i64>,
    ) -> MigrateResult<Self> {
        Self::open(db, directory.into(), target, true)
    }

    /// Like [`new`](Self::new) but leaves the database untouched: a missing
    /// ledger table reads as an empty ledger. The table is created by
    /// [`run`](Self::run) only when a step actually executes.
    pub fn inspect(
        db: &'a dyn Database,
        directory: impl Into<PathBuf>,
        target: Option<i64>,
    ) -> MigrateResult<Self> {
        Self::open(db, directory.into(), target, false)
    }

    fn open(
        db: &'a dyn Database,
        directory: PathBuf,
        target: Option<i64>,
        create_ledger: bool,
    ) -> MigrateResult<Self> {
        let files = discover(&directory)?;
        log::debug!(
            "Found {} migration file(s) in {}",
            files.len(),
            directory.display()
        );

        log::debug!("Reading ledger from {} database", db.db_type());
        if create_ledger {
            ledger::ensure_table(db)?;
        }
        let ledger_ready = db.table_exists(ledger::LEDGER_TABLE)?;
        let applied: BTreeSet<String> = if ledger_ready {
            ledger::read_applied(db)?.into_iter().collect()
        } else {
            log::debug!("No {} table yet, treating ledger as empty", ledger::LEDGER_TABLE);
            BTreeSet::new()
        };
        check_consistency(&files, &applied, &directory)?;

        Ok(Self {
            db,
            directory,
            target,
            files,
            applied,
            ledger_ready,
            force_dry_run: false,
        })
    }

    /// Treat every migration as a dry run, whatever its file says.
    pub fn force_dry_run(mut self, dry_run: bool) -> Self {
        self.force_dry_run = dry_run;
        self
    }

    /// Migrations directory
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Discovered files, ordered by sequence number
    pub fn files(&self) -> &[MigrationFile] {
        &self.files
    }

    /// Ledger contents at construction time
    pub fn applied(&self) -> &BTreeSet<String> {
        &self.applied
    }

    /// Applied state of every discovered file
    pub fn status(&self) -> Vec<MigrationStatus> {
        self.files
            .iter()
            .map(|f| MigrationStatus {
                sequence_number: f.sequence_number,
                filename: f.filename.clone(),
                applied: self.applied.contains(&f.filename),
            })
            .collect()
    }

    /// Steps needed to reach the target
    pub fn plan(&self) -> Vec<PlannedMigration> {
        resolve(&self.files, &self.applied, self.target)
    }

    /// Apply the plan.
    ///
    /// Every planned file is loaded before anything executes. Each step
    /// commits on its own: if one fails, earlier steps stay applied and the
    /// run stops there.
    pub fn run(self) -> MigrateResult<RunReport> {
        let plan = self.plan();
        if plan.is_empty() {
            log::info!("Menu is up to date");
            return Ok(RunReport::default());
        }

        let loaded = plan
            .into_iter()
            .map(|step| Ok((loader::load(&step.file)?, step)))
            .collect::<MigrateResult<Vec<(MigrationDefinition, PlannedMigration)>>>()?;

        let mut ledger_ready = self.ledger_ready;
        let mut report = RunReport::default();
        for (definition, step) in loaded {
            let definition = if self.force_dry_run {
                definition.with_dry_run(true)
            } else {
                definition
            };
            if !definition.dry_run && !ledger_ready {
                ledger::ensure_table(self.db)?;
                ledger_ready = true;
            }
            let filename = step.file.filename;
            let script = definition.apply(self.db, step.direction, &filename)?;
            report.steps.push(StepReport {
                filename,
                direction: step.direction,
                dry_run: definition.dry_run,
                script,
            });
        }
        Ok(report)
    }
}

/// Run every pending migration in `directory` up to `target` (latest when `None`).
pub fn run(db: &dyn Database, directory: &Path, target: Option<i64>) -> MigrateResult<RunReport> {
    Migrator::new(db, directory, target)?.run()
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
