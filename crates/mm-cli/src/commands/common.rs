//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use mm_core::Config;
use mm_db::DuckDbBackend;
use std::path::{Path, PathBuf};

use crate::cli::GlobalArgs;

/// A project directory together with its loaded configuration
#[derive(Debug)]
pub(crate) struct Project {
    pub(crate) root: PathBuf,
    pub(crate) config: Config,
}

impl Project {
    /// Absolute path of the migrations directory
    pub(crate) fn migrations_dir(&self) -> PathBuf {
        self.config.migrations_path_absolute(&self.root)
    }
}

/// Load the project config.
///
/// An explicit `--config` must exist; otherwise the project directory is
/// searched and defaults are used when it has no config file.
pub(crate) fn load_project(global: &GlobalArgs) -> Result<Project> {
    let root = PathBuf::from(&global.project_dir);
    let config = match &global.config {
        Some(path) => Config::load(Path::new(path)),
        None => Config::load_or_default(&root),
    }
    .context("Failed to load configuration")?;

    Ok(Project { root, config })
}

/// Open the DuckDB database named by `--database`, the environment, or the config.
pub(crate) fn open_database(project: &Project, global: &GlobalArgs) -> Result<DuckDbBackend> {
    let path = project.config.resolve_database(global.database.as_deref());
    log::debug!("Opening database {}", path);
    DuckDbBackend::new(&path).with_context(|| format!("Failed to open database: {}", path))
}

/// Like [`open_database`], but a database file that does not exist yet is
/// stood in for by an empty in-memory one instead of being created.
pub(crate) fn open_database_for_reading(
    project: &Project,
    global: &GlobalArgs,
) -> Result<DuckDbBackend> {
    let path = project.config.resolve_database(global.database.as_deref());
    if path != ":memory:" && !Path::new(&path).exists() {
        log::debug!("Database {} does not exist, reading as empty", path);
        return DuckDbBackend::in_memory().context("Failed to open in-memory database");
    }
    open_database(project, global)
}

// ---------------------------------------------------------------------------
// Table-printing utilities
// ---------------------------------------------------------------------------

/// Widest cell per column, headers included.
pub(crate) fn calculate_column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.len());
        }
    }
    widths
}

/// Render a left-aligned table: header, dashed separator, then rows.
/// Columns are separated by two spaces.
pub(crate) fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let widths = calculate_column_widths(headers, rows);
    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{:<width$}", cell, width = w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(headers.to_vec())];
    let separator: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    out.push(separator.join("  "));
    for row in rows {
        out.push(line(row.iter().map(String::as_str).collect()));
    }
    out.join("\n")
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
