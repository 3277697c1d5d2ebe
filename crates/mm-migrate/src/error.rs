//! Error types for mm-migrate

use mm_core::{CoreError, Direction};
use mm_db::DbError;
use thiserror::Error;

/// Migration engine errors
#[derive(Error, Debug)]
pub enum MigrateError {
    /// Config, naming or validation error from mm-core
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Database error outside of a migration step (ledger setup and reads)
    #[error(transparent)]
    Db(#[from] DbError),

    /// L001: Migration file could not be read
    #[error("[L001] Failed to read migration {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// L002: Migration file defines nothing
    #[error("[L002] No migration defined in {filename}")]
    NoDefinition { filename: String },

    /// L003: Migration file defines more than one migration
    #[error("[L003] More than one migration defined in {filename} (found {count})")]
    MultipleDefinitions { filename: String, count: usize },

    /// L004: Migration file is structurally invalid
    #[error("[L004] Invalid migration {filename}: {message}")]
    InvalidDefinition { filename: String, message: String },

    /// C001: Ledger refers to a migration with no file on disk
    #[error("[C001] Applied migration {filename} has no file in {directory}")]
    MissingMigrationFile { filename: String, directory: String },

    /// M001: An operation in a migration was rejected
    #[error("[M001] Migration {filename} ({direction}): {source}")]
    Operation {
        filename: String,
        direction: Direction,
        #[source]
        source: CoreError,
    },

    /// M002: The database rejected a migration's script
    #[error("[M002] Migration {filename} ({direction}) failed: {source}")]
    Execution {
        filename: String,
        direction: Direction,
        #[source]
        source: DbError,
    },
}

impl MigrateError {
    /// Operation arguments were rejected before any SQL ran
    pub fn is_validation_error(&self) -> bool {
        match self {
            MigrateError::Core(e) | MigrateError::Operation { source: e, .. } => {
                e.is_validation_error()
            }
            _ => false,
        }
    }

    /// A migration filename broke the naming convention
    pub fn is_naming_error(&self) -> bool {
        matches!(self, MigrateError::Core(e) if e.is_naming_error())
    }

    /// A migration file could not be turned into exactly one definition
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            MigrateError::ReadFailed { .. }
                | MigrateError::NoDefinition { .. }
                | MigrateError::MultipleDefinitions { .. }
                | MigrateError::InvalidDefinition { .. }
        )
    }

    /// The ledger and the migrations directory disagree
    pub fn is_consistency_error(&self) -> bool {
        matches!(self, MigrateError::MissingMigrationFile { .. })
    }
}

/// Result type alias for MigrateError
pub type MigrateResult<T> = Result<T, MigrateError>;
