//! SQL lexer and recursive-descent parser
//!
//! The collaborator in front of the rendering core: turns raw SQL text
//! into the AST. Failure reporting stops at `Error::ParseError`; the
//! renderer itself never sees malformed input.

pub mod expr;
pub mod lexer;
pub mod stmt;

use crate::ast::SelectStmt;
use crate::error::{Error, Result};
use expr::Parser;
use lexer::{tokenize, Token};

/// Parse SQL string into a single statement
pub fn parse(input: &str) -> Result<SelectStmt> {
    let tokens = tokenize(input)?;

    if matches!(tokens.as_slice(), [Token::Eof]) {
        return Err(Error::parse("Empty input"));
    }

    let mut parser = Parser::new(&tokens);
    let stmt = stmt::parse_statement(&mut parser)?;

    // Nothing but stray semicolons may follow
    while parser.consume(&Token::Semicolon) {}
    if !parser.is_eof() {
        return Err(Error::parse(format!(
            "Unexpected token after statement: {:?}",
            parser.current()
        )));
    }

    Ok(stmt)
}

/// Parse multiple SQL statements
pub fn parse_statements(input: &str) -> Result<Vec<SelectStmt>> {
    let tokens = tokenize(input)?;

    let mut parser = Parser::new(&tokens);
    let mut statements = Vec::new();

    loop {
        while parser.consume(&Token::Semicolon) {}
        if parser.is_eof() {
            break;
        }
        statements.push(stmt::parse_statement(&mut parser)?);
    }

    Ok(statements)
}
