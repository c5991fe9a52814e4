//! Token-aware SQL statement splitting.

use sqlparser::tokenizer::{Location, Token, Tokenizer};

use crate::dialect::{DuckDbDialect, PostgresDialect, SqlDialect};
use crate::error::{SqlError, SqlResult};

/// Splits a raw SQL script into individually executable statements.
///
/// Splitting is token-aware: a semicolon inside a string literal, a quoted
/// identifier, or a comment never terminates a statement. Each returned
/// statement is a trimmed slice of the original script text, so quoting
/// and escape sequences reach the database exactly as written. Units that
/// contain only whitespace or comments are dropped; a unit that begins with
/// a comment but contains real SQL is kept whole, comment included, since
/// the database tolerates leading comments in an executed statement.
pub struct StatementSplitter {
    dialect: Box<dyn SqlDialect>,
}

impl StatementSplitter {
    /// Create a splitter with a custom dialect
    pub fn new(dialect: Box<dyn SqlDialect>) -> Self {
        Self { dialect }
    }

    /// Create a splitter with DuckDB lexical rules
    pub fn duckdb() -> Self {
        Self::new(Box::new(DuckDbDialect::new()))
    }

    /// Create a splitter with PostgreSQL lexical rules
    pub fn postgres() -> Self {
        Self::new(Box::new(PostgresDialect::new()))
    }

    /// Create a splitter from a dialect name
    pub fn from_dialect_name(name: &str) -> SqlResult<Self> {
        match name.to_lowercase().as_str() {
            "duckdb" => Ok(Self::duckdb()),
            "postgres" => Ok(Self::postgres()),
            _ => Err(SqlError::UnknownDialect(name.to_string())),
        }
    }

    /// Get the dialect name
    pub fn dialect_name(&self) -> &'static str {
        self.dialect.name()
    }

    /// Split a script into an ordered sequence of executable statements.
    ///
    /// An unterminated quote or comment is a fatal [`SqlError::ParseError`];
    /// the caller fails the migration rather than guessing at intent.
    pub fn split(&self, sql: &str) -> SqlResult<Vec<String>> {
        let tokens = Tokenizer::new(self.dialect.tokenizer_dialect(), sql)
            .tokenize_with_location()
            .map_err(|e| SqlError::ParseError {
                message: e.message,
                line: e.location.line as usize,
                column: e.location.column as usize,
            })?;

        let line_starts = line_starts(sql);
        let mut statements = Vec::new();
        let mut segment_start = 0;
        let mut has_sql = false;

        for token in &tokens {
            match &token.token {
                Token::SemiColon => {
                    let end = byte_offset(sql, &line_starts, &token.span.start).ok_or_else(
                        || SqlError::ParseError {
                            message: "statement separator location outside script".to_string(),
                            line: token.span.start.line as usize,
                            column: token.span.start.column as usize,
                        },
                    )?;
                    if has_sql {
                        statements.push(sql[segment_start..end].trim().to_string());
                    }
                    segment_start = end + 1;
                    has_sql = false;
                }
                Token::Whitespace(_) | Token::EOF => {}
                _ => has_sql = true,
            }
        }

        // final statement may have no terminating semicolon
        if has_sql {
            statements.push(sql[segment_start..].trim().to_string());
        }

        Ok(statements)
    }
}

impl Default for StatementSplitter {
    fn default() -> Self {
        Self::duckdb()
    }
}

/// Byte offset of the first character of each line.
fn line_starts(sql: &str) -> Vec<usize> {
    let mut starts = vec![0];
    for (i, b) in sql.bytes().enumerate() {
        if b == b'\n' {
            starts.push(i + 1);
        }
    }
    starts
}

/// Convert a 1-based tokenizer location (line and character column) to a
/// byte offset into the script.
fn byte_offset(sql: &str, line_starts: &[usize], location: &Location) -> Option<usize> {
    let line_index = location.line.checked_sub(1)? as usize;
    let line_start = *line_starts.get(line_index)?;
    let line = &sql[line_start..];
    let mut column: u64 = 1;
    for (i, _) in line.char_indices() {
        if column == location.column {
            return Some(line_start + i);
        }
        column += 1;
    }
    None
}

#[cfg(test)]
#[path = "splitter_test.rs"]
mod tests;
