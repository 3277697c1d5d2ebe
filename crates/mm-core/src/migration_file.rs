//! Migration file discovery
//!
//! Migration files are named `<YYYYMMDDHHMM>_<description>.<ext>` and must be
//! entirely lowercase. The 12-digit prefix is both a timestamp and the
//! sequence number that orders the migrations.

use crate::error::{CoreError, CoreResult};
use chrono::NaiveDateTime;
use regex::Regex;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Required length of the sequence prefix
pub const SEQUENCE_PREFIX_LEN: usize = 12;

static MIGRATION_NAME_RE: OnceLock<Regex> = OnceLock::new();

/// Directory entries that look like migrations: digits, underscore, rest, extension.
///
/// Case-insensitive so that wrongly-cased files are reported instead of skipped.
fn migration_name_regex() -> &'static Regex {
    MIGRATION_NAME_RE
        .get_or_init(|| Regex::new(r"(?i)^(\d+)_.+\.\w+$").expect("valid regex"))
}

/// One migration script on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationFile {
    /// Parsed from the 12-character timestamp prefix
    pub sequence_number: i64,
    /// Bare filename; also the ledger key
    pub filename: String,
    /// Location on disk
    pub path: PathBuf,
}

impl MigrationFile {
    /// Build a migration file from its filename, checking the naming convention.
    pub fn from_path(path: &Path) -> CoreResult<Self> {
        let filename = path
            .file_name()
            .and_then(|s| s.to_str())
            .ok_or_else(|| CoreError::InvalidSequencePrefix {
                filename: path.display().to_string(),
                reason: "filename is not valid UTF-8".to_string(),
            })?
            .to_string();
        let sequence_number = parse_sequence_number(&filename)?;
        Ok(Self {
            sequence_number,
            filename,
            path: path.to_path_buf(),
        })
    }
}

/// True when `filename` matches the migration naming pattern at all.
pub fn looks_like_migration(filename: &str) -> bool {
    migration_name_regex().is_match(filename)
}

/// Parse and check the sequence number of a migration filename.
///
/// The prefix before the first underscore must be exactly 12 digits forming a
/// valid `YYYYMMDDHHMM` timestamp, and the whole name must be lowercase.
pub fn parse_sequence_number(filename: &str) -> CoreResult<i64> {
    let prefix = filename.split('_').next().unwrap_or_default();

    if prefix.len() != SEQUENCE_PREFIX_LEN || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::InvalidSequencePrefix {
            filename: filename.to_string(),
            reason: format!(
                "expected a {SEQUENCE_PREFIX_LEN}-digit YYYYMMDDHHMM prefix, found '{prefix}'"
            ),
        });
    }

    NaiveDateTime::parse_from_str(&format!("{prefix}00"), "%Y%m%d%H%M%S").map_err(|e| {
        CoreError::InvalidSequencePrefix {
            filename: filename.to_string(),
            reason: format!("prefix '{prefix}' is not a valid date/time: {e}"),
        }
    })?;

    if filename.to_lowercase() != filename {
        return Err(CoreError::NotLowercase {
            filename: filename.to_string(),
        });
    }

    prefix
        .parse::<i64>()
        .map_err(|e| CoreError::InvalidSequencePrefix {
            filename: filename.to_string(),
            reason: e.to_string(),
        })
}

/// List the migrations in `dir`, ordered by sequence number.
///
/// Non-recursive. Entries that do not look like migrations are ignored; an
/// entry that does but breaks the naming convention fails the whole scan.
pub fn discover(dir: &Path) -> CoreResult<Vec<MigrationFile>> {
    let entries = std::fs::read_dir(dir).map_err(|e| CoreError::IoWithPath {
        path: dir.display().to_string(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| CoreError::IoWithPath {
            path: dir.display().to_string(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
            continue;
        };
        if !looks_like_migration(name) {
            log::debug!("Skipping non-migration entry {}", name);
            continue;
        }
        files.push(MigrationFile::from_path(&path)?);
    }

    files.sort_by(|a, b| {
        a.sequence_number
            .cmp(&b.sequence_number)
            .then_with(|| a.filename.cmp(&b.filename))
    });

    for pair in files.windows(2) {
        if pair[0].sequence_number == pair[1].sequence_number {
            log::warn!(
                "Migrations {} and {} share sequence number {}",
                pair[0].filename,
                pair[1].filename,
                pair[0].sequence_number
            );
        }
    }

    Ok(files)
}

#[cfg(test)]
#[path = "migration_file_test.rs"]
mod tests;
