//! New command implementation - scaffolds a migration file

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use crate::cli::{GlobalArgs, NewArgs};
use crate::commands::common::load_project;

/// Execute the new command
pub(crate) fn execute(args: &NewArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;
    let webapp = args
        .webapp
        .clone()
        .or_else(|| project.config.webapp.clone())
        .context("No webapp given: pass --webapp or set `webapp` in menu_migrations.yml")?;
    mm_core::validate(&[Some(webapp.as_str())]).context("Invalid webapp")?;

    let now = Utc::now();
    let filename = migration_filename(now, &args.description)?;
    let dir = project.migrations_dir();
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let path = dir.join(&filename);
    write_new_file(&path, &template(&args.description, &webapp, now))?;

    log::info!("Created migration {}", path.display());
    println!("{}", path.display());
    Ok(())
}

/// Create `path` with `contents`, refusing to overwrite an existing file.
pub(crate) fn write_new_file(path: &Path, contents: &str) -> Result<()> {
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            anyhow::bail!("Migration '{}' already exists", path.display())
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to create {}", path.display()))
        }
    };
    file.write_all(contents.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Lowercase, whitespace runs become `_`, anything else non-alphanumeric is dropped.
pub(crate) fn slugify(description: &str) -> String {
    description
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
                .collect::<String>()
                .to_ascii_lowercase()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// `<YYYYMMDDHHMM>_<slug>.yml`
pub(crate) fn migration_filename(now: DateTime<Utc>, description: &str) -> Result<String> {
    let slug = slugify(description);
    if slug.is_empty() {
        anyhow::bail!(
            "Description '{}' has no usable characters for a file name",
            description
        );
    }
    Ok(format!("{}_{}.yml", now.format("%Y%m%d%H%M"), slug))
}

fn template(description: &str, webapp: &str, now: DateTime<Utc>) -> String {
    format!(
        "# {description}\n\
         # Created: {created}\n\
         webapp: {webapp}\n\
         # dry_run: true\n\
         \n\
         up:\n\
         # - add_functional_area: Masterfiles\n\
         # - add_program: Fruit\n\
         #   functional_area: Masterfiles\n\
         # - add_program_function: Cultivars\n\
         #   functional_area: Masterfiles\n\
         #   program: Fruit\n\
         #   url: /list/cultivars\n\
         \n\
         down:\n\
         # - drop_functional_area: Masterfiles\n",
        description = description.replace('\n', " "),
        created = now.format("%Y-%m-%d %H:%M:%S UTC"),
        webapp = format!("'{}'", webapp.replace('\'', "''")),
    )
}

#[cfg(test)]
#[path = "new_test.rs"]
mod tests;
