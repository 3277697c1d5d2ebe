//! Status command implementation

use anyhow::{Context, Result};
use mm_migrate::{MigrationStatus, Migrator};

use crate::cli::{GlobalArgs, StatusArgs, StatusOutput};
use crate::commands::common::{format_table, load_project, open_database_for_reading};

/// Execute the status command
pub(crate) fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let db = open_database_for_reading(&project, global)?;
    let migrator = Migrator::inspect(&db, project.migrations_dir(), None)
        .context("Failed to read migration state")?;
    let status = migrator.status();

    match args.output {
        StatusOutput::Json => {
            let json =
                serde_json::to_string_pretty(&status).context("Failed to serialize status")?;
            println!("{}", json);
        }
        StatusOutput::Table => {
            if status.is_empty() {
                println!(
                    "No migrations found in {}",
                    migrator.directory().display()
                );
            } else {
                println!("{}", render_table(&status));
                let pending = status.iter().filter(|s| !s.applied).count();
                println!("\n{} migration(s), {} pending", status.len(), pending);
            }
        }
    }

    Ok(())
}

fn render_table(status: &[MigrationStatus]) -> String {
    let rows: Vec<Vec<String>> = status
        .iter()
        .map(|s| {
            vec![
                s.sequence_number.to_string(),
                s.filename.clone(),
                if s.applied { "applied" } else { "pending" }.to_string(),
            ]
        })
        .collect();
    format_table(&["VERSION", "FILE", "STATUS"], &rows)
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
