//! Working out which migrations to run, and in which direction.

use crate::error::{MigrateError, MigrateResult};
use mm_core::{Direction, MigrationFile};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;

/// A migration scheduled to run in one direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedMigration {
    pub file: MigrationFile,
    pub direction: Direction,
}

/// Fail if the ledger names a migration that is not in `files`.
pub fn check_consistency(
    files: &[MigrationFile],
    applied: &BTreeSet<String>,
    directory: &Path,
) -> MigrateResult<()> {
    let known: BTreeSet<&str> = files.iter().map(|f| f.filename.as_str()).collect();
    match applied.iter().find(|name| !known.contains(name.as_str())) {
        Some(filename) => Err(MigrateError::MissingMigrationFile {
            filename: filename.clone(),
            directory: directory.display().to_string(),
        }),
        None => Ok(()),
    }
}

/// Compute the ordered steps that bring the ledger to `target`.
///
/// With no target every unapplied migration goes up. With a target, applied
/// migrations newer than it go down and unapplied ones at or below it go up;
/// unapplied migrations newer than the target are left alone. Ups run oldest
/// first, then downs newest first.
pub fn resolve(
    files: &[MigrationFile],
    applied: &BTreeSet<String>,
    target: Option<i64>,
) -> Vec<PlannedMigration> {
    let mut ordered: Vec<&MigrationFile> = files.iter().collect();
    ordered.sort_by(|a, b| {
        a.sequence_number
            .cmp(&b.sequence_number)
            .then_with(|| a.filename.cmp(&b.filename))
    });

    let mut ups = Vec::new();
    let mut downs = Vec::new();

    for file in ordered {
        let is_applied = applied.contains(&file.filename);
        match target {
            Some(target) if file.sequence_number > target => {
                if is_applied {
                    downs.push(file);
                }
            }
            _ if !is_applied => ups.push(file),
            _ => {}
        }
    }

    let plan_step = |file: &MigrationFile, direction| PlannedMigration {
        file: file.clone(),
        direction,
    };

    ups.into_iter()
        .map(|file| plan_step(file, Direction::Up))
        .chain(
            downs
                .into_iter()
                .rev()
                .map(|file| plan_step(file, Direction::Down)),
        )
        .collect()
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
