//! mm-db - Database abstraction layer for menu migrations
//!
//! This crate provides the `Database` trait consumed by the migrator and a
//! DuckDB implementation.

pub mod duckdb;
pub mod error;
pub mod traits;

pub use crate::duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use traits::{ColumnDef, Database};
