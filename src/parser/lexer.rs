//! SQL tokenization
//!
//! Breaks SQL input into tokens. Keywords are matched case-insensitively;
//! identifier and literal lexemes are kept verbatim (including quotes)
//! because the renderer re-emits them unchanged. Words that are only
//! keywords in context (interval units, lock strengths, `name`, ...) are
//! lexed as identifiers and matched by the parser.

/// Token types for the SQL lexer
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Keywords
    Select,
    From,
    Where,
    Group,
    By,
    Having,
    Order,
    Limit,
    Offset,
    And,
    Or,
    Not,
    In,
    Is,
    Null,
    Like,
    ILike,
    Similar,
    Escape,
    Between,
    Symmetric,
    Case,
    When,
    Then,
    Else,
    End,
    As,
    On,
    Join,
    Inner,
    Left,
    Right,
    Full,
    Cross,
    Outer,
    Using,
    Distinct,
    All,
    Any,
    Some,
    Union,
    Intersect,
    Except,
    Into,
    Table,
    Only,
    Values,
    Exists,
    Array,
    Row,
    Rows,
    Range,
    Cast,
    Treat,
    Extract,
    Overlay,
    Position,
    Substring,
    Trim,
    Both,
    Leading,
    Trailing,
    True,
    False,
    Unknown,
    Document,
    Interval,
    Setof,
    Collate,
    With,
    For,
    To,
    Of,
    Operator,
    Variadic,
    Within,
    Filter,
    Over,
    Partition,
    Window,
    Unbounded,
    Preceding,
    Following,
    Current,
    Nulls,
    Asc,
    Desc,
    Default,
    XmlElement,
    XmlExists,
    XmlForest,
    XmlParse,
    XmlPi,
    XmlRoot,
    XmlSerialize,
    XmlAttributes,

    // Identifiers and literals (lexemes verbatim)
    Identifier(String),
    QuotedIdentifier(String),
    StringLiteral(String),
    IntegerLiteral(String),
    FloatLiteral(String),
    BitLiteral(String),

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Concat,
    ColonEquals,
    FatArrow,

    // Punctuation
    Comma,
    Dot,
    Semicolon,
    Colon,
    DoubleColon,
    LParen,
    RParen,
    LBracket,
    RBracket,

    Eof,
}

impl Token {
    /// Identifier text, quoted or not
    pub fn identifier_text(&self) -> Option<&str> {
        match self {
            Token::Identifier(name) | Token::QuotedIdentifier(name) => Some(name),
            _ => None,
        }
    }
}

fn keyword_token(word: &str) -> Option<Token> {
    let token = match word {
        "select" => Token::Select,
        "from" => Token::From,
        "where" => Token::Where,
        "group" => Token::Group,
        "by" => Token::By,
        "having" => Token::Having,
        "order" => Token::Order,
        "limit" => Token::Limit,
        "offset" => Token::Offset,
        "and" => Token::And,
        "or" => Token::Or,
        "not" => Token::Not,
        "in" => Token::In,
        "is" => Token::Is,
        "null" => Token::Null,
        "like" => Token::Like,
        "ilike" => Token::ILike,
        "similar" => Token::Similar,
        "escape" => Token::Escape,
        "between" => Token::Between,
        "symmetric" => Token::Symmetric,
        "case" => Token::Case,
        "when" => Token::When,
        "then" => Token::Then,
        "else" => Token::Else,
        "end" => Token::End,
        "as" => Token::As,
        "on" => Token::On,
        "join" => Token::Join,
        "inner" => Token::Inner,
        "left" => Token::Left,
        "right" => Token::Right,
        "full" => Token::Full,
        "cross" => Token::Cross,
        "outer" => Token::Outer,
        "using" => Token::Using,
        "distinct" => Token::Distinct,
        "all" => Token::All,
        "any" => Token::Any,
        "some" => Token::Some,
        "union" => Token::Union,
        "intersect" => Token::Intersect,
        "except" => Token::Except,
        "into" => Token::Into,
        "table" => Token::Table,
        "only" => Token::Only,
        "values" => Token::Values,
        "exists" => Token::Exists,
        "array" => Token::Array,
        "row" => Token::Row,
        "rows" => Token::Rows,
        "range" => Token::Range,
        "cast" => Token::Cast,
        "treat" => Token::Treat,
        "extract" => Token::Extract,
        "overlay" => Token::Overlay,
        "position" => Token::Position,
        "substring" => Token::Substring,
        "trim" => Token::Trim,
        "both" => Token::Both,
        "leading" => Token::Leading,
        "trailing" => Token::Trailing,
        "true" => Token::True,
        "false" => Token::False,
        "unknown" => Token::Unknown,
        "document" => Token::Document,
        "interval" => Token::Interval,
        "setof" => Token::Setof,
        "collate" => Token::Collate,
        "with" => Token::With,
        "for" => Token::For,
        "to" => Token::To,
        "of" => Token::Of,
        "operator" => Token::Operator,
        "variadic" => Token::Variadic,
        "within" => Token::Within,
        "filter" => Token::Filter,
        "over" => Token::Over,
        "partition" => Token::Partition,
        "window" => Token::Window,
        "unbounded" => Token::Unbounded,
        "preceding" => Token::Preceding,
        "following" => Token::Following,
        "current" => Token::Current,
        "nulls" => Token::Nulls,
        "asc" => Token::Asc,
        "desc" => Token::Desc,
        "default" => Token::Default,
        "xmlelement" => Token::XmlElement,
        "xmlexists" => Token::XmlExists,
        "xmlforest" => Token::XmlForest,
        "xmlparse" => Token::XmlParse,
        "xmlpi" => Token::XmlPi,
        "xmlroot" => Token::XmlRoot,
        "xmlserialize" => Token::XmlSerialize,
        "xmlattributes" => Token::XmlAttributes,
        _ => return None,
    };
    Some(token)
}

/// Tokenize SQL input
pub fn tokenize(input: &str) -> crate::Result<Vec<Token>> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let c = match input[i..].chars().next() {
            Some(c) => c,
            None => break,
        };

        // Whitespace
        if c.is_ascii_whitespace() {
            i += 1;
            continue;
        }

        // Single-line comment
        if c == '-' && bytes.get(i + 1) == Some(&b'-') {
            while i < bytes.len() && bytes[i] != b'\n' {
                i += 1;
            }
            continue;
        }

        // Block comment, nesting allowed
        if c == '/' && bytes.get(i + 1) == Some(&b'*') {
            let start = i;
            let mut depth = 1;
            i += 2;
            while i < bytes.len() && depth > 0 {
                if bytes[i] == b'/' && bytes.get(i + 1) == Some(&b'*') {
                    depth += 1;
                    i += 2;
                } else if bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/') {
                    depth -= 1;
                    i += 2;
                } else {
                    i += 1;
                }
            }
            if depth > 0 {
                return Err(crate::Error::parse_at("Unterminated block comment", start, 2));
            }
            continue;
        }

        // String constant, lexeme kept with quotes; '' is an escaped quote
        if c == '\'' {
            let (lexeme, next) = scan_quoted(input, i, '\'')?;
            tokens.push(Token::StringLiteral(lexeme));
            i = next;
            continue;
        }

        // Bit/hex string constant: b'...' or x'...'
        if (c == 'b' || c == 'B' || c == 'x' || c == 'X') && bytes.get(i + 1) == Some(&b'\'') {
            let (lexeme, next) = scan_quoted(input, i + 1, '\'')?;
            let mut full = input[i..i + 1].to_string();
            full.push_str(&lexeme);
            tokens.push(Token::BitLiteral(full));
            i = next;
            continue;
        }

        // Quoted identifier, lexeme kept with quotes
        if c == '"' {
            let (lexeme, next) = scan_quoted(input, i, '"')?;
            tokens.push(Token::QuotedIdentifier(lexeme));
            i = next;
            continue;
        }

        // Number: integer or float, lexeme verbatim
        if c.is_ascii_digit() || (c == '.' && matches!(bytes.get(i + 1), Some(d) if d.is_ascii_digit())) {
            let start = i;
            let mut is_float = false;
            while i < bytes.len() && (bytes[i] as char).is_ascii_digit() {
                i += 1;
            }
            if i < bytes.len() && bytes[i] == b'.' && bytes.get(i + 1) != Some(&b'.') {
                is_float = true;
                i += 1;
                while i < bytes.len() && (bytes[i] as char).is_ascii_digit() {
                    i += 1;
                }
            }
            if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
                let mut j = i + 1;
                if matches!(bytes.get(j), Some(b'+') | Some(b'-')) {
                    j += 1;
                }
                if matches!(bytes.get(j), Some(d) if d.is_ascii_digit()) {
                    is_float = true;
                    i = j;
                    while i < bytes.len() && (bytes[i] as char).is_ascii_digit() {
                        i += 1;
                    }
                }
            }
            let lexeme = input[start..i].to_string();
            if is_float {
                tokens.push(Token::FloatLiteral(lexeme));
            } else {
                tokens.push(Token::IntegerLiteral(lexeme));
            }
            continue;
        }

        // Identifier or keyword
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            while i < bytes.len() {
                let ch = bytes[i] as char;
                if ch.is_ascii_alphanumeric() || ch == '_' || ch == '$' {
                    i += 1;
                } else {
                    break;
                }
            }
            let lexeme = &input[start..i];
            match keyword_token(&lexeme.to_ascii_lowercase()) {
                Some(token) => tokens.push(token),
                None => tokens.push(Token::Identifier(lexeme.to_string())),
            }
            continue;
        }

        // Operators and punctuation; all multi-char operators are ASCII
        let two = if i + 1 < bytes.len() && bytes[i].is_ascii() && bytes[i + 1].is_ascii() {
            &input[i..i + 2]
        } else {
            ""
        };
        let token = match two {
            "::" => Some((Token::DoubleColon, 2)),
            ":=" => Some((Token::ColonEquals, 2)),
            "=>" => Some((Token::FatArrow, 2)),
            "<=" => Some((Token::LtEq, 2)),
            ">=" => Some((Token::GtEq, 2)),
            "<>" | "!=" => Some((Token::NotEq, 2)),
            "||" => Some((Token::Concat, 2)),
            _ => None,
        };
        if let Some((token, len)) = token {
            tokens.push(token);
            i += len;
            continue;
        }

        let token = match c {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '%' => Token::Percent,
            '^' => Token::Caret,
            '=' => Token::Eq,
            '<' => Token::Lt,
            '>' => Token::Gt,
            ',' => Token::Comma,
            '.' => Token::Dot,
            ';' => Token::Semicolon,
            ':' => Token::Colon,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '[' => Token::LBracket,
            ']' => Token::RBracket,
            _ => {
                return Err(crate::Error::parse_at(
                    format!("Unexpected character: {:?}", c),
                    i,
                    c.len_utf8(),
                ))
            }
        };
        tokens.push(token);
        i += 1;
    }

    tokens.push(Token::Eof);
    Ok(tokens)
}

/// Scan a quoted region starting at `start`, returning the lexeme
/// (quotes included) and the index past the closing quote. A doubled
/// quote inside the region is an escape.
fn scan_quoted(input: &str, start: usize, quote: char) -> crate::Result<(String, usize)> {
    let bytes = input.as_bytes();
    let q = quote as u8;
    debug_assert_eq!(bytes[start], q);
    let mut i = start + 1;
    while i < bytes.len() {
        if bytes[i] == q {
            if bytes.get(i + 1) == Some(&q) {
                i += 2;
                continue;
            }
            return Ok((input[start..i + 1].to_string(), i + 1));
        }
        i += 1;
    }
    Err(crate::Error::parse_at(
        format!("Unterminated {} string", if quote == '\'' { "quoted" } else { "identifier" }),
        start,
        1,
    ))
}
