//! sky-db - Database abstraction layer for Skylark
//!
//! This crate provides the `Database` trait and the DuckDB implementation
//! used to execute migration statements and ledger queries.

pub mod duckdb;
pub mod error;
pub mod traits;

pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use traits::Database;
