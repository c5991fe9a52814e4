//! sky-sql - SQL lexical layer for Skylark
//!
//! This crate tokenizes raw migration scripts using sqlparser-rs with
//! dialect support and splits them into individually executable statements.

pub mod dialect;
pub mod error;
pub mod splitter;

pub use dialect::{DuckDbDialect, PostgresDialect, SqlDialect};
pub use error::{SqlError, SqlResult};
pub use splitter::StatementSplitter;
