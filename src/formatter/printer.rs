//! Token sink and the plain-text reference printer
//!
//! Rendering talks to the outside world through the five-operation
//! [`Sink`] trait: emit a classified token, request a space, end the
//! line, push or pop an indent level. The [`Printer`] here is the
//! reference text sink; classification-aware sinks (highlighters) are
//! drop-in replacements implementing the same trait.

/// Default indentation unit (2 spaces)
pub const DEFAULT_INDENT: &str = "  ";

/// Semantic classification attached to every emitted token
///
/// Metadata for downstream consumers such as highlighters; it never
/// affects the emitted text. Consumers may ignore it entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Keyword,
    Identifier,
    Operator,
    StringLiteral,
    IntegerLiteral,
    FloatLiteral,
    BoolLiteral,
    NullLiteral,
    BitLiteral,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    Comma,
    Period,
    Colon,
    Semicolon,
    Typecast,
    Star,
}

/// Output capability used by every rendering function
///
/// Layout directives are deferred: a requested space is dropped when a
/// newline intervenes or the line is still empty, consecutive newline
/// requests collapse, and a line's indent prefix is fixed only when its
/// first token is emitted. Indent changes made between `newline` and the
/// next `emit` therefore apply to the upcoming line.
pub trait Sink {
    /// Append literal token text tagged with its classification
    fn emit(&mut self, text: &str, kind: TokenKind);

    /// Request a single space before the next token
    fn space(&mut self);

    /// Terminate the current line
    fn newline(&mut self);

    /// Push one indent level; affects lines started after the call
    fn indent(&mut self);

    /// Pop one indent level
    fn dedent(&mut self);
}

/// Plain-text sink: concatenates tokens into a single string
///
/// Holds no cross-render state; create a fresh printer per render call.
pub struct Printer {
    out: String,
    indent_unit: String,
    depth: usize,
    pending_newline: bool,
    pending_space: bool,
    line_dirty: bool,
}

impl Printer {
    pub fn new() -> Self {
        Self::with_indent(DEFAULT_INDENT)
    }

    /// Printer using the given indentation unit for every level
    pub fn with_indent(unit: impl Into<String>) -> Self {
        Self {
            out: String::new(),
            indent_unit: unit.into(),
            depth: 0,
            pending_newline: false,
            pending_space: false,
            line_dirty: false,
        }
    }

    /// Consume the printer, flushing any pending line terminator
    pub fn finish(mut self) -> String {
        if self.pending_newline && self.line_dirty {
            self.out.push('\n');
        }
        self.out
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for Printer {
    fn emit(&mut self, text: &str, _kind: TokenKind) {
        if self.pending_newline {
            self.out.push('\n');
            for _ in 0..self.depth {
                self.out.push_str(&self.indent_unit);
            }
            self.pending_newline = false;
            self.line_dirty = false;
        } else if self.pending_space && self.line_dirty {
            self.out.push(' ');
        }
        self.pending_space = false;
        self.out.push_str(text);
        self.line_dirty = true;
    }

    fn space(&mut self) {
        self.pending_space = true;
    }

    fn newline(&mut self) {
        self.pending_newline = true;
        self.pending_space = false;
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
