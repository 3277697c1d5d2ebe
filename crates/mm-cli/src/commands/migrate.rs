//! Migrate command implementation

use anyhow::{Context, Result};
use mm_migrate::{Migrator, RunReport};

use crate::cli::{GlobalArgs, MigrateArgs};
use crate::commands::common::{load_project, open_database, open_database_for_reading};

/// Execute the migrate command
pub(crate) fn execute(args: &MigrateArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let dry_run = args.dry_run || project.config.dry_run;

    let db = if dry_run {
        open_database_for_reading(&project, global)?
    } else {
        open_database(&project, global)?
    };
    let migrator = if dry_run {
        Migrator::inspect(&db, project.migrations_dir(), args.to)
    } else {
        Migrator::new(&db, project.migrations_dir(), args.to)
    }
    .context("Failed to prepare migrations")?
    .force_dry_run(dry_run);
    let report = migrator.run().context("Migration failed")?;

    println!("{}", summarize(&report));
    Ok(())
}

/// One line per step, dry-run scripts in full, then totals.
fn summarize(report: &RunReport) -> String {
    if report.is_empty() {
        return "Menu is up to date".to_string();
    }

    let mut out = Vec::new();
    for step in &report.steps {
        let marker = if step.dry_run { " (dry run)" } else { "" };
        out.push(format!(
            "{:<4} {}{}",
            step.direction.to_string(),
            step.filename,
            marker
        ));
        if step.dry_run {
            out.push(step.script.to_sql());
        }
    }

    let executed = report.executed().count();
    out.push(String::new());
    out.push(format!(
        "{} migration(s) applied, {} dry run",
        executed,
        report.steps.len() - executed
    ));
    out.join("\n")
}

#[cfg(test)]
#[path = "migrate_test.rs"]
mod tests;
