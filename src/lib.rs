//! sqlcanon - a canonicalizing SQL pretty-printer for SELECT statements
//!
//! Parses a SELECT statement (and its expression sub-language) into an
//! immutable AST and deterministically re-emits canonical, consistently
//! indented SQL. Layout is decided per construct, never by line width.
//! Formatted text leaves the core only through the [`formatter::printer::Sink`]
//! trait, so classification-aware output sinks are drop-in replacements
//! for the plain-text printer.

pub mod ast;
pub mod cli;
pub mod error;
pub mod formatter;
pub mod parser;

pub use error::{Error, Result};
pub use formatter::{format_ast, format_sql, render};

/// Format SQL string and return the formatted result
pub fn format(input: &str) -> Result<String> {
    format_sql(input)
}

/// Check if SQL string is already formatted
pub fn check(input: &str) -> Result<bool> {
    let formatted = format_sql(input)?;
    Ok(formatted == input)
}
