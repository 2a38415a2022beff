//! Error types for sqlcanon

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias for sqlcanon operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for sqlcanon
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error("{message}")]
    #[diagnostic(code(sqlcanon::parse_error))]
    ParseError {
        message: String,
        #[label("here")]
        span: Option<(usize, usize)>,
    },

    #[error("IO error: {0}")]
    #[diagnostic(code(sqlcanon::io_error))]
    IoError(#[from] std::io::Error),

    #[error("Format error: {message}")]
    #[diagnostic(code(sqlcanon::format_error))]
    FormatError { message: String },
}

impl Error {
    /// Build a parse error with no span information
    pub fn parse(message: impl Into<String>) -> Self {
        Error::ParseError {
            message: message.into(),
            span: None,
        }
    }

    /// Build a parse error anchored at a byte offset
    pub fn parse_at(message: impl Into<String>, offset: usize, len: usize) -> Self {
        Error::ParseError {
            message: message.into(),
            span: Some((offset, len)),
        }
    }
}

/// Calculate line and column number from byte offset
pub fn offset_to_line_col(input: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;
    for (i, c) in input.char_indices() {
        if i >= offset {
            break;
        }
        if c == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}
