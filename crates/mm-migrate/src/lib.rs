//! mm-migrate - Menu migration engine
//!
//! Loads migration files, works out which must run (and in which direction)
//! to reach a target version, and applies each one as a single transaction
//! that also records it in the `menu_migrations` ledger.

pub mod definition;
pub mod error;
pub mod ledger;
pub mod loader;
pub mod resolver;
pub mod runner;

pub use definition::MigrationDefinition;
pub use error::{MigrateError, MigrateResult};
pub use loader::load;
pub use resolver::{resolve, PlannedMigration};
pub use runner::{run, MigrationStatus, Migrator, RunReport, StepReport};
