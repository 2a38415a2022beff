//! Expression parsing
//!
//! Precedence-climbing parser over the token stream. From loosest to
//! tightest: OR, AND, NOT, predicates (IS, IN, BETWEEN, LIKE, comparison,
//! subquery comparison), AT TIME ZONE, additive, multiplicative,
//! exponent, unary sign, postfix (`::` cast, COLLATE), primary.

use crate::ast::*;
use crate::parser::lexer::Token;
use crate::parser::stmt::{parse_select_stmt, parse_subquery};
use crate::{Error, Result};

/// Nesting budget shared by expressions and subqueries, so renderer
/// recursion is bounded by construction
pub const MAX_DEPTH: usize = 200;

/// Token cursor with single-token lookahead helpers
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Parser {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    pub fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&Token::Eof)
    }

    pub fn peek(&self, n: usize) -> &Token {
        self.tokens.get(self.pos + n).unwrap_or(&Token::Eof)
    }

    pub fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// Compare by variant only, so `check(&Token::Identifier(...))`
    /// matches any identifier
    pub fn check(&self, token: &Token) -> bool {
        std::mem::discriminant(self.current()) == std::mem::discriminant(token)
    }

    pub fn consume(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn expect(&mut self, token: &Token) -> Result<()> {
        if self.consume(token) {
            Ok(())
        } else {
            Err(Error::parse(format!(
                "Expected {:?}, found {:?}",
                token,
                self.current()
            )))
        }
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.current(), Token::Eof)
    }

    /// Contextual keyword test: an unquoted identifier equal to `word`
    pub fn word(&self, word: &str) -> bool {
        matches!(self.current(), Token::Identifier(name) if name.eq_ignore_ascii_case(word))
    }

    pub fn peek_word(&self, n: usize, word: &str) -> bool {
        matches!(self.peek(n), Token::Identifier(name) if name.eq_ignore_ascii_case(word))
    }

    pub fn consume_word(&mut self, word: &str) -> bool {
        if self.word(word) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn expect_word(&mut self, word: &str) -> Result<()> {
        if self.consume_word(word) {
            Ok(())
        } else {
            Err(Error::parse(format!(
                "Expected {}, found {:?}",
                word,
                self.current()
            )))
        }
    }

    /// Take the current identifier lexeme, quoted or not, verbatim
    pub fn take_identifier(&mut self) -> Result<String> {
        match self.current() {
            Token::Identifier(name) | Token::QuotedIdentifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            other => Err(Error::parse(format!(
                "Expected identifier, found {:?}",
                other
            ))),
        }
    }

    /// True when the upcoming parenthesized group opens a subquery
    pub fn lookahead_subquery(&self) -> bool {
        let mut i = self.pos;
        while matches!(self.tokens.get(i), Some(Token::LParen)) {
            i += 1;
        }
        matches!(
            self.tokens.get(i),
            Some(Token::Select | Token::Values | Token::Table)
        )
    }

    pub fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            Err(Error::parse("Expression nesting too deep"))
        } else {
            Ok(())
        }
    }

    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

/// Parse a full expression
pub fn parse_expression(parser: &mut Parser) -> Result<Expr> {
    parser.enter()?;
    let expr = parse_or(parser);
    parser.leave();
    expr
}

fn bool_expr(left: Expr, op: BoolOp, right: Expr) -> Expr {
    Expr::Boolean(BooleanExpr {
        left: Box::new(left),
        op,
        right: Box::new(right),
    })
}

fn binary_expr(left: Expr, op: &str, right: Expr) -> Expr {
    Expr::Binary(BinaryExpr {
        left: Box::new(left),
        op: QualifiedName::single(op),
        right: Box::new(right),
    })
}

fn parse_or(parser: &mut Parser) -> Result<Expr> {
    let mut left = parse_and(parser)?;
    while parser.consume(&Token::Or) {
        let right = parse_and(parser)?;
        left = bool_expr(left, BoolOp::Or, right);
    }
    Ok(left)
}

fn parse_and(parser: &mut Parser) -> Result<Expr> {
    let mut left = parse_not(parser)?;
    while parser.consume(&Token::And) {
        let right = parse_not(parser)?;
        left = bool_expr(left, BoolOp::And, right);
    }
    Ok(left)
}

fn parse_not(parser: &mut Parser) -> Result<Expr> {
    if parser.check(&Token::Not)
        && !matches!(
            parser.peek(1),
            Token::In | Token::Between | Token::Like | Token::ILike | Token::Similar
        )
    {
        parser.advance();
        let expr = parse_not(parser)?;
        return Ok(Expr::Not(NotExpr(Box::new(expr))));
    }
    parse_predicate(parser)
}

fn comparison_op(token: &Token) -> Option<&'static str> {
    match token {
        Token::Eq => Some("="),
        Token::NotEq => Some("<>"),
        Token::Lt => Some("<"),
        Token::LtEq => Some("<="),
        Token::Gt => Some(">"),
        Token::GtEq => Some(">="),
        _ => None,
    }
}

fn parse_predicate(parser: &mut Parser) -> Result<Expr> {
    let mut expr = parse_comparand(parser)?;

    loop {
        if parser.consume(&Token::Is) {
            expr = parse_is_tail(parser, expr)?;
            continue;
        }

        let negated = if parser.check(&Token::Not)
            && matches!(
                parser.peek(1),
                Token::In | Token::Between | Token::Like | Token::ILike | Token::Similar
            ) {
            parser.advance();
            true
        } else {
            false
        };

        if parser.consume(&Token::In) {
            let set = parse_in_set(parser)?;
            expr = Expr::In(InExpr {
                value: Box::new(expr),
                not: negated,
                set: Box::new(set),
            });
            continue;
        }

        if parser.consume(&Token::Between) {
            let symmetric = parser.consume(&Token::Symmetric);
            let low = parse_comparand(parser)?;
            parser.expect(&Token::And)?;
            let high = parse_comparand(parser)?;
            expr = Expr::Between(BetweenExpr {
                expr: Box::new(expr),
                not: negated,
                symmetric,
                low: Box::new(low),
                high: Box::new(high),
            });
            continue;
        }

        let text_op = match parser.current() {
            Token::Like => Some(TextOp::Like),
            Token::ILike => Some(TextOp::ILike),
            Token::Similar => Some(TextOp::SimilarTo),
            _ => None,
        };
        if let Some(op) = text_op {
            parser.advance();
            if op == TextOp::SimilarTo {
                parser.expect(&Token::To)?;
            }
            let right = parse_comparand(parser)?;
            let escape = if parser.consume(&Token::Escape) {
                Some(Box::new(parse_comparand(parser)?))
            } else {
                None
            };
            expr = Expr::TextMatch(TextMatchExpr {
                left: Box::new(expr),
                not: negated,
                op,
                right: Box::new(right),
                escape,
            });
            continue;
        }

        if negated {
            return Err(Error::parse(format!(
                "Expected IN, BETWEEN, LIKE, ILIKE, or SIMILAR after NOT, found {:?}",
                parser.current()
            )));
        }

        // operator(name) spelling, with or without a quantifier
        if parser.check(&Token::Operator) && matches!(parser.peek(1), Token::LParen) {
            parser.advance();
            parser.advance();
            let name = parse_operator_name(parser)?;
            parser.expect(&Token::RParen)?;
            expr = parse_op_tail(parser, expr, name, true)?;
            continue;
        }

        if let Some(op) = comparison_op(parser.current()) {
            parser.advance();
            expr = parse_op_tail(parser, expr, QualifiedName::single(op), false)?;
            continue;
        }

        break;
    }

    Ok(expr)
}

/// After IS: [NOT] NULL/TRUE/FALSE/UNKNOWN/DOCUMENT, or OF (types)
fn parse_is_tail(parser: &mut Parser, expr: Expr) -> Result<Expr> {
    let not = parser.consume(&Token::Not);
    let test = match parser.current() {
        Token::Null => Some(IsTest::Null),
        Token::True => Some(IsTest::True),
        Token::False => Some(IsTest::False),
        Token::Unknown => Some(IsTest::Unknown),
        Token::Document => Some(IsTest::Document),
        _ => None,
    };
    if let Some(test) = test {
        parser.advance();
        return Ok(Expr::Is(IsExpr {
            expr: Box::new(expr),
            not,
            test,
        }));
    }
    if parser.consume(&Token::Of) {
        parser.expect(&Token::LParen)?;
        let mut types = vec![parse_type_name(parser)?];
        while parser.consume(&Token::Comma) {
            types.push(parse_type_name(parser)?);
        }
        parser.expect(&Token::RParen)?;
        return Ok(Expr::IsOf(IsOfExpr {
            expr: Box::new(expr),
            not,
            types,
        }));
    }
    Err(Error::parse(format!(
        "Expected NULL, TRUE, FALSE, UNKNOWN, DOCUMENT, or OF after IS, found {:?}",
        parser.current()
    )))
}

/// Right side of a comparison: quantified subquery or plain operand
fn parse_op_tail(
    parser: &mut Parser,
    left: Expr,
    name: QualifiedName,
    operator_syntax: bool,
) -> Result<Expr> {
    let quantifier = match parser.current() {
        Token::Any => Some(SubqueryQuantifier::Any),
        Token::All => Some(SubqueryQuantifier::All),
        Token::Some => Some(SubqueryQuantifier::Some),
        _ => None,
    };
    if let Some(quantifier) = quantifier {
        parser.advance();
        parser.expect(&Token::LParen)?;
        let mut query = parse_select_stmt(parser)?;
        parser.expect(&Token::RParen)?;
        query.paren_wrapped = true;
        return Ok(Expr::SubqueryOp(SubqueryOpExpr {
            value: Box::new(left),
            op: SubqueryOp {
                operator_syntax,
                name,
            },
            quantifier,
            query: Box::new(Expr::Select(Box::new(query))),
        }));
    }
    let right = parse_comparand(parser)?;
    Ok(Expr::Binary(BinaryExpr {
        left: Box::new(left),
        op: name,
        right: Box::new(right),
    }))
}

/// IN set: subquery or parenthesized expression list
fn parse_in_set(parser: &mut Parser) -> Result<Expr> {
    if parser.check(&Token::LParen) && parser.lookahead_subquery() {
        let stmt = parse_subquery(parser)?;
        return Ok(Expr::Select(Box::new(stmt)));
    }
    parser.expect(&Token::LParen)?;
    let mut exprs = vec![parse_expression(parser)?];
    while parser.consume(&Token::Comma) {
        exprs.push(parse_expression(parser)?);
    }
    parser.expect(&Token::RParen)?;
    Ok(Expr::Row(Row {
        row_word: false,
        exprs,
    }))
}

/// Additive chain plus AT TIME ZONE
fn parse_comparand(parser: &mut Parser) -> Result<Expr> {
    let mut expr = parse_additive(parser)?;
    while parser.word("at") && parser.peek_word(1, "time") {
        parser.advance();
        parser.expect_word("time")?;
        parser.expect_word("zone")?;
        let time_zone = parse_additive(parser)?;
        expr = Expr::AtTimeZone(AtTimeZoneExpr {
            expr: Box::new(expr),
            time_zone: Box::new(time_zone),
        });
    }
    Ok(expr)
}

fn parse_additive(parser: &mut Parser) -> Result<Expr> {
    let mut left = parse_multiplicative(parser)?;
    loop {
        let op = match parser.current() {
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Concat => "||",
            _ => break,
        };
        parser.advance();
        let right = parse_multiplicative(parser)?;
        left = binary_expr(left, op, right);
    }
    Ok(left)
}

fn parse_multiplicative(parser: &mut Parser) -> Result<Expr> {
    let mut left = parse_power(parser)?;
    loop {
        let op = match parser.current() {
            Token::Star => "*",
            Token::Slash => "/",
            Token::Percent => "%",
            _ => break,
        };
        parser.advance();
        let right = parse_power(parser)?;
        left = binary_expr(left, op, right);
    }
    Ok(left)
}

fn parse_power(parser: &mut Parser) -> Result<Expr> {
    let mut left = parse_unary(parser)?;
    while parser.consume(&Token::Caret) {
        let right = parse_unary(parser)?;
        left = binary_expr(left, "^", right);
    }
    Ok(left)
}

fn parse_unary(parser: &mut Parser) -> Result<Expr> {
    let op = match parser.current() {
        Token::Minus => Some("-"),
        Token::Plus => Some("+"),
        _ => None,
    };
    if let Some(op) = op {
        parser.advance();
        let expr = parse_unary(parser)?;
        return Ok(Expr::Unary(UnaryExpr {
            op: QualifiedName::single(op),
            expr: Box::new(expr),
        }));
    }
    parse_postfix(parser)
}

fn parse_postfix(parser: &mut Parser) -> Result<Expr> {
    let mut expr = parse_primary(parser)?;
    loop {
        if parser.consume(&Token::DoubleColon) {
            let type_name = parse_type_name(parser)?;
            expr = Expr::Typecast(TypecastExpr {
                expr: Box::new(expr),
                type_name,
            });
            continue;
        }
        if parser.consume(&Token::Collate) {
            let collation = parse_qualified_name(parser)?;
            expr = Expr::Collate(CollateExpr {
                expr: Box::new(expr),
                collation,
            });
            continue;
        }
        break;
    }
    Ok(expr)
}

/// Functions spelled as keywords with no parentheses
fn bare_function(name: &str) -> Option<&'static str> {
    const NAMES: &[&str] = &[
        "current_date",
        "current_time",
        "current_timestamp",
        "localtime",
        "localtimestamp",
        "current_catalog",
        "current_role",
        "current_schema",
        "current_user",
        "session_user",
        "user",
    ];
    NAMES
        .iter()
        .find(|candidate| candidate.eq_ignore_ascii_case(name))
        .copied()
}

fn parse_primary(parser: &mut Parser) -> Result<Expr> {
    match parser.current().clone() {
        Token::StringLiteral(lexeme) => {
            parser.advance();
            Ok(Expr::StringLiteral(lexeme))
        }
        Token::IntegerLiteral(lexeme) => {
            parser.advance();
            Ok(Expr::IntegerLiteral(lexeme))
        }
        Token::FloatLiteral(lexeme) => {
            parser.advance();
            Ok(Expr::FloatLiteral(lexeme))
        }
        Token::BitLiteral(lexeme) => {
            parser.advance();
            Ok(Expr::BitLiteral(lexeme))
        }
        Token::True => {
            parser.advance();
            Ok(Expr::BooleanLiteral(true))
        }
        Token::False => {
            parser.advance();
            Ok(Expr::BooleanLiteral(false))
        }
        Token::Null => {
            parser.advance();
            Ok(Expr::NullLiteral)
        }
        Token::Default => {
            parser.advance();
            Ok(Expr::Default)
        }
        Token::Star => {
            parser.advance();
            Ok(Expr::ColumnRef(ColumnRef {
                name: "*".to_string(),
                indirection: None,
            }))
        }
        Token::Case => parse_case_expr(parser),
        Token::Cast => parse_named_cast(parser, CastName::Cast),
        Token::Treat => parse_named_cast(parser, CastName::Treat),
        Token::Interval => parse_interval_literal(parser),
        Token::Extract => parse_extract(parser),
        Token::Overlay => parse_overlay(parser),
        Token::Position => parse_position(parser),
        Token::Substring => parse_substring(parser),
        Token::Trim => parse_trim(parser),
        Token::XmlElement => parse_xml_element(parser),
        Token::XmlExists => parse_xml_exists(parser),
        Token::XmlForest => parse_xml_forest(parser),
        Token::XmlParse => parse_xml_parse(parser),
        Token::XmlPi => parse_xml_pi(parser),
        Token::XmlRoot => parse_xml_root(parser),
        Token::XmlSerialize => parse_xml_serialize(parser),
        Token::Exists => {
            parser.advance();
            let stmt = parse_subquery(parser)?;
            Ok(Expr::Exists(Box::new(stmt)))
        }
        Token::Array => {
            parser.advance();
            if parser.check(&Token::LParen) {
                let stmt = parse_subquery(parser)?;
                Ok(Expr::ArraySubselect(Box::new(stmt)))
            } else {
                parser.expect(&Token::LBracket)?;
                let exprs = parse_bracket_list(parser)?;
                Ok(Expr::ArrayConstructor(ArrayExpr(exprs)))
            }
        }
        Token::LBracket => {
            parser.advance();
            let exprs = parse_bracket_list(parser)?;
            Ok(Expr::Array(ArrayExpr(exprs)))
        }
        Token::Row => {
            parser.advance();
            parser.expect(&Token::LParen)?;
            let mut exprs = Vec::new();
            if !parser.check(&Token::RParen) {
                exprs.push(parse_expression(parser)?);
                while parser.consume(&Token::Comma) {
                    exprs.push(parse_expression(parser)?);
                }
            }
            parser.expect(&Token::RParen)?;
            Ok(Expr::Row(Row {
                row_word: true,
                exprs,
            }))
        }
        Token::LParen => {
            if parser.lookahead_subquery() {
                let stmt = parse_subquery(parser)?;
                return Ok(Expr::Select(Box::new(stmt)));
            }
            parser.enter()?;
            parser.advance();
            let expr = parse_expression(parser)?;
            if parser.consume(&Token::Comma) {
                let mut exprs = vec![expr];
                exprs.push(parse_expression(parser)?);
                while parser.consume(&Token::Comma) {
                    exprs.push(parse_expression(parser)?);
                }
                parser.expect(&Token::RParen)?;
                parser.leave();
                return Ok(Expr::Row(Row {
                    row_word: false,
                    exprs,
                }));
            }
            parser.expect(&Token::RParen)?;
            parser.leave();
            let indirection = parse_indirection(parser)?;
            Ok(Expr::Paren(ParenExpr {
                expr: Box::new(expr),
                indirection,
            }))
        }
        Token::Identifier(_) | Token::QuotedIdentifier(_) => parse_name_or_call(parser),
        other => Err(Error::parse(format!(
            "Unexpected token in expression: {:?}",
            other
        ))),
    }
}

/// Column reference, qualified function call, or typed literal
fn parse_name_or_call(parser: &mut Parser) -> Result<Expr> {
    // Keyword-spelled niladic functions keep their canonical spelling
    if let Token::Identifier(name) = parser.current() {
        if let Some(canonical) = bare_function(name) {
            if !matches!(parser.peek(1), Token::LParen) {
                parser.advance();
                return Ok(Expr::BareFunction(canonical.to_string()));
            }
        }
    }

    let base = parser.take_identifier()?;
    let mut fields = Vec::new();
    let mut star_field = false;
    while parser.check(&Token::Dot) {
        if matches!(parser.peek(1), Token::Star) {
            parser.advance();
            parser.advance();
            star_field = true;
            break;
        }
        parser.advance();
        fields.push(parser.take_identifier()?);
    }

    if !star_field && parser.check(&Token::LParen) {
        parser.advance();
        let mut parts = vec![base];
        parts.extend(fields);
        return parse_func_call(parser, QualifiedName(parts));
    }

    // `date '2020-01-01'` constructor-style cast
    if !star_field && fields.is_empty() && parser.check(&Token::StringLiteral(String::new())) {
        let value = parse_primary(parser)?;
        return Ok(Expr::TypedLiteral(TypedLiteralExpr {
            type_name: TypeName::plain(QualifiedName::single(base)),
            value: Box::new(value),
        }));
    }

    let mut els: Vec<IndirectionEl> = fields.into_iter().map(IndirectionEl::Field).collect();
    if star_field {
        els.push(IndirectionEl::Field("*".to_string()));
    } else if let Some(Indirection(rest)) = parse_indirection(parser)? {
        els.extend(rest);
    }

    Ok(Expr::ColumnRef(ColumnRef {
        name: base,
        indirection: if els.is_empty() {
            None
        } else {
            Some(Indirection(els))
        },
    }))
}

/// Trailing indirection after a parenthesized expression
fn parse_indirection(parser: &mut Parser) -> Result<Option<Indirection>> {
    let mut els = Vec::new();
    loop {
        if parser.check(&Token::Dot) {
            parser.advance();
            if parser.consume(&Token::Star) {
                els.push(IndirectionEl::Field("*".to_string()));
            } else {
                els.push(IndirectionEl::Field(parser.take_identifier()?));
            }
            continue;
        }
        if parser.consume(&Token::LBracket) {
            let lower = parse_expression(parser)?;
            let upper = if parser.consume(&Token::Colon) {
                Some(Box::new(parse_expression(parser)?))
            } else {
                None
            };
            parser.expect(&Token::RBracket)?;
            els.push(IndirectionEl::Subscript {
                lower: Box::new(lower),
                upper,
            });
            continue;
        }
        break;
    }
    Ok(if els.is_empty() {
        None
    } else {
        Some(Indirection(els))
    })
}

fn parse_bracket_list(parser: &mut Parser) -> Result<Vec<Expr>> {
    let mut exprs = Vec::new();
    if !parser.check(&Token::RBracket) {
        exprs.push(parse_expression(parser)?);
        while parser.consume(&Token::Comma) {
            exprs.push(parse_expression(parser)?);
        }
    }
    parser.expect(&Token::RBracket)?;
    Ok(exprs)
}

fn parse_case_expr(parser: &mut Parser) -> Result<Expr> {
    parser.expect(&Token::Case)?;
    let subject = if parser.check(&Token::When) {
        None
    } else {
        Some(Box::new(parse_expression(parser)?))
    };
    let mut when_clauses = Vec::new();
    while parser.consume(&Token::When) {
        let condition = parse_expression(parser)?;
        parser.expect(&Token::Then)?;
        let result = parse_expression(parser)?;
        when_clauses.push(WhenClause { condition, result });
    }
    if when_clauses.is_empty() {
        return Err(Error::parse("CASE requires at least one WHEN clause"));
    }
    let else_clause = if parser.consume(&Token::Else) {
        Some(Box::new(parse_expression(parser)?))
    } else {
        None
    };
    parser.expect(&Token::End)?;
    Ok(Expr::Case(CaseExpr {
        subject,
        when_clauses,
        else_clause,
    }))
}

fn parse_named_cast(parser: &mut Parser, name: CastName) -> Result<Expr> {
    parser.advance();
    parser.expect(&Token::LParen)?;
    let expr = parse_expression(parser)?;
    parser.expect(&Token::As)?;
    let type_name = parse_type_name(parser)?;
    parser.expect(&Token::RParen)?;
    Ok(Expr::NamedCast(NamedCastExpr {
        name,
        expr: Box::new(expr),
        type_name,
    }))
}

fn parse_interval_literal(parser: &mut Parser) -> Result<Expr> {
    parser.expect(&Token::Interval)?;
    let precision = if parser.consume(&Token::LParen) {
        let precision = take_integer(parser)?;
        parser.expect(&Token::RParen)?;
        Some(precision)
    } else {
        None
    };
    let value = parse_primary(parser)?;
    let qualifier = parse_interval_qualifier(parser)?;
    Ok(Expr::IntervalLiteral(IntervalLiteralExpr {
        precision,
        value: Box::new(value),
        qualifier,
    }))
}

fn take_integer(parser: &mut Parser) -> Result<String> {
    match parser.current() {
        Token::IntegerLiteral(lexeme) => {
            let lexeme = lexeme.clone();
            parser.advance();
            Ok(lexeme)
        }
        other => Err(Error::parse(format!(
            "Expected integer, found {:?}",
            other
        ))),
    }
}

fn interval_unit(parser: &Parser) -> Option<IntervalUnit> {
    let unit = if parser.word("year") {
        IntervalUnit::Year
    } else if parser.word("month") {
        IntervalUnit::Month
    } else if parser.word("day") {
        IntervalUnit::Day
    } else if parser.word("hour") {
        IntervalUnit::Hour
    } else if parser.word("minute") {
        IntervalUnit::Minute
    } else {
        return None;
    };
    Some(unit)
}

fn parse_interval_second(parser: &mut Parser) -> Result<IntervalSecond> {
    parser.expect_word("second")?;
    let precision = if parser.consume(&Token::LParen) {
        let precision = take_integer(parser)?;
        parser.expect(&Token::RParen)?;
        Some(precision)
    } else {
        None
    };
    Ok(IntervalSecond { precision })
}

pub fn parse_interval_qualifier(parser: &mut Parser) -> Result<Option<IntervalQualifier>> {
    if parser.word("second") {
        let second = parse_interval_second(parser)?;
        return Ok(Some(IntervalQualifier::Second(second)));
    }
    let Some(unit) = interval_unit(parser) else {
        return Ok(None);
    };
    parser.advance();
    if parser.consume(&Token::To) {
        if parser.word("second") {
            let second = parse_interval_second(parser)?;
            return Ok(Some(IntervalQualifier::RangeToSecond(unit, second)));
        }
        let Some(to_unit) = interval_unit(parser) else {
            return Err(Error::parse(format!(
                "Expected interval unit after TO, found {:?}",
                parser.current()
            )));
        };
        parser.advance();
        return Ok(Some(IntervalQualifier::Range(unit, to_unit)));
    }
    Ok(Some(IntervalQualifier::Unit(unit)))
}

fn parse_extract(parser: &mut Parser) -> Result<Expr> {
    parser.advance();
    parser.expect(&Token::LParen)?;
    let field = parse_expression(parser)?;
    parser.expect(&Token::From)?;
    let source = parse_expression(parser)?;
    parser.expect(&Token::RParen)?;
    Ok(Expr::Extract(ExtractExpr {
        field: Box::new(field),
        source: Box::new(source),
    }))
}

fn parse_overlay(parser: &mut Parser) -> Result<Expr> {
    parser.advance();
    parser.expect(&Token::LParen)?;
    let dest = parse_expression(parser)?;
    parser.expect_word("placing")?;
    let placing = parse_expression(parser)?;
    parser.expect(&Token::From)?;
    let from = parse_expression(parser)?;
    let for_length = if parser.consume(&Token::For) {
        Some(Box::new(parse_expression(parser)?))
    } else {
        None
    };
    parser.expect(&Token::RParen)?;
    Ok(Expr::Overlay(OverlayExpr {
        dest: Box::new(dest),
        placing: Box::new(placing),
        from: Box::new(from),
        for_length,
    }))
}

fn parse_position(parser: &mut Parser) -> Result<Expr> {
    parser.advance();
    parser.expect(&Token::LParen)?;
    let needle = parse_comparand(parser)?;
    parser.expect(&Token::In)?;
    let haystack = parse_comparand(parser)?;
    parser.expect(&Token::RParen)?;
    Ok(Expr::Position(PositionExpr {
        needle: Box::new(needle),
        haystack: Box::new(haystack),
    }))
}

fn parse_substring(parser: &mut Parser) -> Result<Expr> {
    parser.advance();
    parser.expect(&Token::LParen)?;
    let source = parse_expression(parser)?;
    if parser.consume(&Token::From) {
        let from = parse_expression(parser)?;
        let for_length = if parser.consume(&Token::For) {
            Some(Box::new(parse_expression(parser)?))
        } else {
            None
        };
        parser.expect(&Token::RParen)?;
        return Ok(Expr::Substring(SubstringExpr {
            source: Box::new(source),
            from: Box::new(from),
            for_length,
        }));
    }
    // Comma form parses as a generic call
    let mut args = vec![FuncArg {
        name: None,
        expr: source,
    }];
    while parser.consume(&Token::Comma) {
        args.push(FuncArg {
            name: None,
            expr: parse_expression(parser)?,
        });
    }
    parser.expect(&Token::RParen)?;
    Ok(Expr::Func(FuncExpr {
        application: FuncApplication {
            name: QualifiedName::single("substring"),
            distinct: false,
            star: false,
            args,
            variadic_arg: None,
            order_by: None,
        },
        within_group: None,
        filter: None,
        over: None,
    }))
}

fn parse_trim(parser: &mut Parser) -> Result<Expr> {
    parser.advance();
    parser.expect(&Token::LParen)?;
    let direction = match parser.current() {
        Token::Both => Some(TrimDirection::Both),
        Token::Leading => Some(TrimDirection::Leading),
        Token::Trailing => Some(TrimDirection::Trailing),
        _ => None,
    };
    if direction.is_some() {
        parser.advance();
    }

    let mut head = None;
    let mut from = false;
    let mut tail = Vec::new();
    if parser.consume(&Token::From) {
        from = true;
        tail.push(parse_expression(parser)?);
        while parser.consume(&Token::Comma) {
            tail.push(parse_expression(parser)?);
        }
    } else {
        let first = parse_expression(parser)?;
        if parser.consume(&Token::From) {
            head = Some(Box::new(first));
            from = true;
            tail.push(parse_expression(parser)?);
        } else {
            tail.push(first);
        }
        while parser.consume(&Token::Comma) {
            tail.push(parse_expression(parser)?);
        }
    }
    parser.expect(&Token::RParen)?;
    Ok(Expr::Trim(TrimExpr {
        direction,
        head,
        from,
        tail,
    }))
}

fn parse_xml_attribute(parser: &mut Parser) -> Result<XmlAttributeEl> {
    let value = parse_expression(parser)?;
    let name = if parser.consume(&Token::As) {
        Some(parser.take_identifier()?)
    } else {
        None
    };
    Ok(XmlAttributeEl { value, name })
}

fn parse_xml_element(parser: &mut Parser) -> Result<Expr> {
    parser.advance();
    parser.expect(&Token::LParen)?;
    parser.expect_word("name")?;
    let name = parser.take_identifier()?;
    let mut attributes = None;
    let mut body = Vec::new();
    while parser.consume(&Token::Comma) {
        if attributes.is_none() && body.is_empty() && parser.check(&Token::XmlAttributes) {
            parser.advance();
            parser.expect(&Token::LParen)?;
            let mut attrs = vec![parse_xml_attribute(parser)?];
            while parser.consume(&Token::Comma) {
                attrs.push(parse_xml_attribute(parser)?);
            }
            parser.expect(&Token::RParen)?;
            attributes = Some(attrs);
        } else {
            body.push(parse_expression(parser)?);
        }
    }
    parser.expect(&Token::RParen)?;
    Ok(Expr::XmlElement(XmlElement {
        name,
        attributes,
        body,
    }))
}

fn parse_xml_exists(parser: &mut Parser) -> Result<Expr> {
    parser.advance();
    parser.expect(&Token::LParen)?;
    let path = parse_expression(parser)?;
    parser.expect_word("passing")?;
    let left_by_ref = if parser.check(&Token::By) && parser.peek_word(1, "ref") {
        parser.advance();
        parser.advance();
        true
    } else {
        false
    };
    let arg = parse_expression(parser)?;
    let right_by_ref = if parser.check(&Token::By) && parser.peek_word(1, "ref") {
        parser.advance();
        parser.advance();
        true
    } else {
        false
    };
    parser.expect(&Token::RParen)?;
    Ok(Expr::XmlExists(XmlExists {
        path: Box::new(path),
        passing: XmlExistsArgument {
            left_by_ref,
            arg: Box::new(arg),
            right_by_ref,
        },
    }))
}

fn parse_xml_forest(parser: &mut Parser) -> Result<Expr> {
    parser.advance();
    parser.expect(&Token::LParen)?;
    let mut attrs = vec![parse_xml_attribute(parser)?];
    while parser.consume(&Token::Comma) {
        attrs.push(parse_xml_attribute(parser)?);
    }
    parser.expect(&Token::RParen)?;
    Ok(Expr::XmlForest(XmlForest(attrs)))
}

fn parse_xml_content_type(parser: &mut Parser) -> Result<XmlContentType> {
    if parser.consume(&Token::Document) {
        Ok(XmlContentType::Document)
    } else if parser.consume_word("content") {
        Ok(XmlContentType::Content)
    } else {
        Err(Error::parse(format!(
            "Expected DOCUMENT or CONTENT, found {:?}",
            parser.current()
        )))
    }
}

fn parse_xml_parse(parser: &mut Parser) -> Result<Expr> {
    parser.advance();
    parser.expect(&Token::LParen)?;
    let content_type = parse_xml_content_type(parser)?;
    let content = parse_expression(parser)?;
    let whitespace = if parser.consume_word("preserve") {
        parser.expect_word("whitespace")?;
        Some(XmlWhitespace::Preserve)
    } else if parser.consume_word("strip") {
        parser.expect_word("whitespace")?;
        Some(XmlWhitespace::Strip)
    } else {
        None
    };
    parser.expect(&Token::RParen)?;
    Ok(Expr::XmlParse(XmlParse {
        content_type,
        content: Box::new(content),
        whitespace,
    }))
}

fn parse_xml_pi(parser: &mut Parser) -> Result<Expr> {
    parser.advance();
    parser.expect(&Token::LParen)?;
    parser.expect_word("name")?;
    let name = parser.take_identifier()?;
    let content = if parser.consume(&Token::Comma) {
        Some(Box::new(parse_expression(parser)?))
    } else {
        None
    };
    parser.expect(&Token::RParen)?;
    Ok(Expr::XmlPi(XmlPi { name, content }))
}

fn parse_xml_root(parser: &mut Parser) -> Result<Expr> {
    parser.advance();
    parser.expect(&Token::LParen)?;
    let xml = parse_expression(parser)?;
    parser.expect(&Token::Comma)?;
    parser.expect_word("version")?;
    let version = if parser.word("no") && parser.peek_word(1, "value") {
        parser.advance();
        parser.advance();
        XmlRootVersion { expr: None }
    } else {
        XmlRootVersion {
            expr: Some(Box::new(parse_expression(parser)?)),
        }
    };
    let standalone = if parser.consume(&Token::Comma) {
        parser.expect_word("standalone")?;
        if parser.consume_word("yes") {
            Some(XmlStandalone::Yes)
        } else if parser.consume_word("no") {
            if parser.consume_word("value") {
                Some(XmlStandalone::NoValue)
            } else {
                Some(XmlStandalone::No)
            }
        } else {
            return Err(Error::parse(format!(
                "Expected YES, NO, or NO VALUE after STANDALONE, found {:?}",
                parser.current()
            )));
        }
    } else {
        None
    };
    parser.expect(&Token::RParen)?;
    Ok(Expr::XmlRoot(XmlRoot {
        xml: Box::new(xml),
        version,
        standalone,
    }))
}

fn parse_xml_serialize(parser: &mut Parser) -> Result<Expr> {
    parser.advance();
    parser.expect(&Token::LParen)?;
    let content_type = parse_xml_content_type(parser)?;
    let content = parse_expression(parser)?;
    parser.expect(&Token::As)?;
    let type_name = parse_type_name(parser)?;
    parser.expect(&Token::RParen)?;
    Ok(Expr::XmlSerialize(XmlSerialize {
        content_type,
        content: Box::new(content),
        type_name,
    }))
}

fn parse_func_arg(parser: &mut Parser) -> Result<FuncArg> {
    let named = matches!(
        parser.current(),
        Token::Identifier(_) | Token::QuotedIdentifier(_)
    ) && matches!(parser.peek(1), Token::ColonEquals | Token::FatArrow);
    let name = if named {
        let name = parser.take_identifier()?;
        let op = if parser.consume(&Token::ColonEquals) {
            NamedArgOp::ColonEquals
        } else {
            parser.expect(&Token::FatArrow)?;
            NamedArgOp::FatArrow
        };
        Some(ArgName { name, op })
    } else {
        None
    };
    let expr = parse_expression(parser)?;
    Ok(FuncArg { name, expr })
}

/// Generic function call; the opening paren is already consumed
pub fn parse_func_call(parser: &mut Parser, name: QualifiedName) -> Result<Expr> {
    let distinct = parser.consume(&Token::Distinct);
    if !distinct {
        parser.consume(&Token::All);
    }

    let mut star = false;
    let mut args = Vec::new();
    let mut variadic_arg = None;
    if parser.check(&Token::Star) {
        parser.advance();
        star = true;
    } else if !parser.check(&Token::RParen) && !parser.check(&Token::Order) {
        loop {
            if parser.consume(&Token::Variadic) {
                variadic_arg = Some(Box::new(parse_func_arg(parser)?));
                break;
            }
            args.push(parse_func_arg(parser)?);
            if !parser.consume(&Token::Comma) {
                break;
            }
        }
    }

    let order_by = if parser.consume(&Token::Order) {
        parser.expect(&Token::By)?;
        Some(OrderClause(parse_order_items(parser)?))
    } else {
        None
    };
    parser.expect(&Token::RParen)?;

    let within_group = if parser.consume(&Token::Within) {
        parser.expect(&Token::Group)?;
        parser.expect(&Token::LParen)?;
        parser.expect(&Token::Order)?;
        parser.expect(&Token::By)?;
        let items = parse_order_items(parser)?;
        parser.expect(&Token::RParen)?;
        Some(WithinGroupClause(OrderClause(items)))
    } else {
        None
    };

    let filter = if parser.consume(&Token::Filter) {
        parser.expect(&Token::LParen)?;
        parser.expect(&Token::Where)?;
        let expr = parse_expression(parser)?;
        parser.expect(&Token::RParen)?;
        Some(FilterClause(Box::new(expr)))
    } else {
        None
    };

    let over = if parser.consume(&Token::Over) {
        if parser.consume(&Token::LParen) {
            Some(OverClause::Specification(parse_window_specification(
                parser,
            )?))
        } else {
            Some(OverClause::WindowName(parser.take_identifier()?))
        }
    } else {
        None
    };

    Ok(Expr::Func(FuncExpr {
        application: FuncApplication {
            name,
            distinct,
            star,
            args,
            variadic_arg,
            order_by,
        },
        within_group,
        filter,
        over,
    }))
}

/// Sort-key list of an ORDER BY
pub fn parse_order_items(parser: &mut Parser) -> Result<Vec<OrderExpr>> {
    let mut items = vec![parse_order_item(parser)?];
    while parser.consume(&Token::Comma) {
        items.push(parse_order_item(parser)?);
    }
    Ok(items)
}

fn parse_order_item(parser: &mut Parser) -> Result<OrderExpr> {
    let expr = parse_expression(parser)?;
    let direction = if parser.consume(&Token::Asc) {
        Some(SortDirection::Asc)
    } else if parser.consume(&Token::Desc) {
        Some(SortDirection::Desc)
    } else {
        None
    };
    let using = if parser.consume(&Token::Using) {
        Some(parse_operator_name(parser)?)
    } else {
        None
    };
    let nulls = if parser.consume(&Token::Nulls) {
        if parser.consume_word("first") {
            Some(NullsOrder::First)
        } else {
            parser.expect_word("last")?;
            Some(NullsOrder::Last)
        }
    } else {
        None
    };
    Ok(OrderExpr {
        expr,
        direction,
        using,
        nulls,
    })
}

/// Operator spelled as a symbol, optionally schema-qualified
fn parse_operator_name(parser: &mut Parser) -> Result<QualifiedName> {
    let mut parts = Vec::new();
    while matches!(
        parser.current(),
        Token::Identifier(_) | Token::QuotedIdentifier(_)
    ) && matches!(parser.peek(1), Token::Dot)
    {
        parts.push(parser.take_identifier()?);
        parser.advance();
    }
    let symbol = match parser.current() {
        Token::Plus => "+",
        Token::Minus => "-",
        Token::Star => "*",
        Token::Slash => "/",
        Token::Percent => "%",
        Token::Caret => "^",
        Token::Eq => "=",
        Token::NotEq => "<>",
        Token::Lt => "<",
        Token::LtEq => "<=",
        Token::Gt => ">",
        Token::GtEq => ">=",
        Token::Concat => "||",
        other => {
            return Err(Error::parse(format!(
                "Expected operator, found {:?}",
                other
            )))
        }
    };
    parser.advance();
    parts.push(symbol.to_string());
    Ok(QualifiedName(parts))
}

/// Window specification; the opening paren is already consumed
pub fn parse_window_specification(parser: &mut Parser) -> Result<WindowSpecification> {
    let base_name = if matches!(
        parser.current(),
        Token::Identifier(_) | Token::QuotedIdentifier(_)
    ) && !parser.word("groups")
    {
        Some(parser.take_identifier()?)
    } else {
        None
    };

    let partition = if parser.consume(&Token::Partition) {
        parser.expect(&Token::By)?;
        let mut exprs = vec![parse_expression(parser)?];
        while parser.consume(&Token::Comma) {
            exprs.push(parse_expression(parser)?);
        }
        Some(exprs)
    } else {
        None
    };

    let order_by = if parser.consume(&Token::Order) {
        parser.expect(&Token::By)?;
        Some(OrderClause(parse_order_items(parser)?))
    } else {
        None
    };

    let mode = match parser.current() {
        Token::Rows => Some(FrameMode::Rows),
        Token::Range => Some(FrameMode::Range),
        Token::Identifier(name) if name.eq_ignore_ascii_case("groups") => Some(FrameMode::Groups),
        _ => None,
    };
    let frame = if let Some(mode) = mode {
        parser.advance();
        if parser.consume(&Token::Between) {
            let start = parse_frame_bound(parser)?;
            parser.expect(&Token::And)?;
            let end = parse_frame_bound(parser)?;
            Some(FrameClause {
                mode,
                start,
                end: Some(end),
            })
        } else {
            let start = parse_frame_bound(parser)?;
            Some(FrameClause {
                mode,
                start,
                end: None,
            })
        }
    } else {
        None
    };

    parser.expect(&Token::RParen)?;
    Ok(WindowSpecification {
        base_name,
        partition,
        order_by,
        frame,
    })
}

fn parse_frame_bound(parser: &mut Parser) -> Result<FrameBound> {
    if parser.consume(&Token::Unbounded) {
        let direction = parse_bound_direction(parser)?;
        return Ok(FrameBound::Unbounded(direction));
    }
    if parser.consume(&Token::Current) {
        parser.expect(&Token::Row)?;
        return Ok(FrameBound::CurrentRow);
    }
    let expr = parse_expression(parser)?;
    let direction = parse_bound_direction(parser)?;
    Ok(FrameBound::Offset(Box::new(expr), direction))
}

fn parse_bound_direction(parser: &mut Parser) -> Result<BoundDirection> {
    if parser.consume(&Token::Preceding) {
        Ok(BoundDirection::Preceding)
    } else if parser.consume(&Token::Following) {
        Ok(BoundDirection::Following)
    } else {
        Err(Error::parse(format!(
            "Expected PRECEDING or FOLLOWING, found {:?}",
            parser.current()
        )))
    }
}

/// Dotted name with no indirection
pub fn parse_qualified_name(parser: &mut Parser) -> Result<QualifiedName> {
    let mut parts = vec![parser.take_identifier()?];
    while parser.check(&Token::Dot) {
        parser.advance();
        parts.push(parser.take_identifier()?);
    }
    Ok(QualifiedName(parts))
}

/// Type reference, as used by casts and IS OF
pub fn parse_type_name(parser: &mut Parser) -> Result<TypeName> {
    let setof = parser.consume(&Token::Setof);

    if parser.consume(&Token::Interval) {
        let mut type_name = TypeName::plain(QualifiedName::single("interval"));
        type_name.setof = setof;
        if parser.consume(&Token::LParen) {
            type_name
                .modifiers
                .push(Expr::IntegerLiteral(take_integer(parser)?));
            parser.expect(&Token::RParen)?;
        }
        type_name.interval = parse_interval_qualifier(parser)?;
        return Ok(type_name);
    }

    let mut first = parser.take_identifier()?;
    // Two-word type names keep their canonical single spelling
    if first.eq_ignore_ascii_case("double") && parser.word("precision") {
        parser.advance();
        first = format!("{} precision", first);
    } else if (first.eq_ignore_ascii_case("character") || first.eq_ignore_ascii_case("char"))
        && parser.word("varying")
    {
        parser.advance();
        first = format!("{} varying", first);
    }
    let mut parts = vec![first];
    while parser.check(&Token::Dot) {
        parser.advance();
        parts.push(parser.take_identifier()?);
    }

    let mut type_name = TypeName::plain(QualifiedName(parts));
    type_name.setof = setof;

    if parser.consume(&Token::LParen) {
        type_name.modifiers.push(parse_expression(parser)?);
        while parser.consume(&Token::Comma) {
            type_name.modifiers.push(parse_expression(parser)?);
        }
        parser.expect(&Token::RParen)?;
    }

    if parser.consume(&Token::Array) {
        type_name.array_word = true;
    }
    while parser.consume(&Token::LBracket) {
        let bound = if parser.check(&Token::IntegerLiteral(String::new())) {
            Some(take_integer(parser)?)
        } else {
            None
        };
        parser.expect(&Token::RBracket)?;
        type_name.array_bounds.push(bound);
    }

    if parser.check(&Token::With) && parser.peek_word(1, "time") {
        parser.advance();
        parser.expect_word("time")?;
        parser.expect_word("zone")?;
        type_name.with_time_zone = true;
    } else if parser.word("without") && parser.peek_word(1, "time") {
        parser.advance();
        parser.expect_word("time")?;
        parser.expect_word("zone")?;
    }

    if parser.word("character") && parser.peek_word(1, "set") {
        parser.advance();
        parser.advance();
        type_name.char_set = Some(parser.take_identifier()?);
    }

    Ok(type_name)
}
