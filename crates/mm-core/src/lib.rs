//! mm-core - Core library for menu migrations
//!
//! This crate provides configuration parsing, the menu operation model, SQL
//! generation for menu operations, and migration file discovery. It has no
//! database dependency; executing scripts is left to `mm-db`.

pub mod config;
pub mod direction;
pub mod error;
pub mod migration_file;
pub mod operation;
pub mod script;
pub mod sql_utils;
pub mod statements;
pub mod validate;

pub use config::Config;
pub use direction::Direction;
pub use error::{CoreError, CoreResult};
pub use migration_file::{discover, MigrationFile};
pub use operation::{Operation, OperationKind, OptionValue, Options};
pub use script::Script;
pub use statements::append_operation;
pub use validate::validate;
