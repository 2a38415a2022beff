//! Statement parsing
//!
//! Parses SELECT statements: the select core with its clause set, VALUES,
//! the TABLE shorthand, set operations, and the trailing ORDER BY /
//! LIMIT / locking clauses. Set-operation chains build left-deep, which
//! is what lets the renderer lay them out flat.

use crate::ast::*;
use crate::parser::expr::{
    parse_expression, parse_func_call, parse_order_items, parse_qualified_name,
    parse_window_specification, Parser,
};
use crate::parser::lexer::Token;
use crate::{Error, Result};

/// Parse one statement, consuming an optional trailing semicolon
pub fn parse_statement(parser: &mut Parser) -> Result<SelectStmt> {
    let mut stmt = parse_select_stmt(parser)?;
    if parser.consume(&Token::Semicolon) {
        stmt.semicolon = true;
    }
    Ok(stmt)
}

/// Select statement: operand chain with set operations, then trailing
/// clauses when the statement is not parenthesized
pub fn parse_select_stmt(parser: &mut Parser) -> Result<SelectStmt> {
    let mut stmt = parse_select_operand(parser)?;

    while let Some(op) = set_operation(parser.current()) {
        parser.advance();
        let all = parser.consume(&Token::All);
        parser.consume(&Token::Distinct);
        let right = parse_select_operand(parser)?;
        stmt = SelectStmt::new(SimpleSelect::SetOp {
            op,
            all,
            left: Box::new(stmt),
            right: Box::new(right),
        });
    }

    if stmt.paren_wrapped {
        return Ok(stmt);
    }

    if parser.consume(&Token::Order) {
        parser.expect(&Token::By)?;
        stmt.order_by = Some(OrderClause(parse_order_items(parser)?));
    }

    let mut limit = None;
    let mut offset = None;
    loop {
        if limit.is_none() && parser.consume(&Token::Limit) {
            limit = Some(parse_expression(parser)?);
            continue;
        }
        if offset.is_none() && parser.consume(&Token::Offset) {
            offset = Some(parse_expression(parser)?);
            continue;
        }
        break;
    }
    if limit.is_some() || offset.is_some() {
        stmt.limit = Some(LimitClause { limit, offset });
    }

    let mut locks = Vec::new();
    while parser.check(&Token::For) {
        locks.push(parse_locking_item(parser)?);
    }
    if !locks.is_empty() {
        stmt.locking = Some(LockingClause(locks));
    }

    Ok(stmt)
}

fn set_operation(token: &Token) -> Option<SetOp> {
    match token {
        Token::Union => Some(SetOp::Union),
        Token::Intersect => Some(SetOp::Intersect),
        Token::Except => Some(SetOp::Except),
        _ => None,
    }
}

fn parse_select_operand(parser: &mut Parser) -> Result<SelectStmt> {
    match parser.current() {
        Token::LParen => parse_subquery(parser),
        Token::Select => {
            let core = parse_select_core(parser)?;
            Ok(SelectStmt::new(SimpleSelect::Select(core)))
        }
        Token::Values => {
            let values = parse_values_clause(parser)?;
            Ok(SelectStmt::new(SimpleSelect::Values(values)))
        }
        Token::Table => {
            parser.advance();
            let relation = parse_relation(parser)?;
            Ok(SelectStmt::new(SimpleSelect::Table(relation)))
        }
        other => Err(Error::parse(format!(
            "Expected SELECT, VALUES, TABLE, or subquery, found {:?}",
            other
        ))),
    }
}

/// Parenthesized select; doubled parentheses collapse to one
pub fn parse_subquery(parser: &mut Parser) -> Result<SelectStmt> {
    parser.enter()?;
    parser.expect(&Token::LParen)?;
    let mut stmt = parse_select_stmt(parser)?;
    parser.expect(&Token::RParen)?;
    parser.leave();
    stmt.paren_wrapped = true;
    Ok(stmt)
}

fn parse_select_core(parser: &mut Parser) -> Result<SelectCore> {
    parser.expect(&Token::Select)?;

    let distinct = if parser.consume(&Token::Distinct) {
        if parser.consume(&Token::On) {
            parser.expect(&Token::LParen)?;
            let mut exprs = vec![parse_expression(parser)?];
            while parser.consume(&Token::Comma) {
                exprs.push(parse_expression(parser)?);
            }
            parser.expect(&Token::RParen)?;
            Some(exprs)
        } else {
            Some(Vec::new())
        }
    } else {
        parser.consume(&Token::All);
        None
    };

    let mut targets = vec![parse_target(parser)?];
    while parser.consume(&Token::Comma) {
        targets.push(parse_target(parser)?);
    }

    let into_clause = if parser.consume(&Token::Into) {
        Some(parse_into_tail(parser)?)
    } else {
        None
    };

    let from_clause = if parser.consume(&Token::From) {
        Some(FromClause(parse_from_list(parser)?))
    } else {
        None
    };

    let where_clause = if parser.consume(&Token::Where) {
        Some(WhereClause(parse_expression(parser)?))
    } else {
        None
    };

    let group_by = if parser.consume(&Token::Group) {
        parser.expect(&Token::By)?;
        let mut exprs = vec![parse_expression(parser)?];
        while parser.consume(&Token::Comma) {
            exprs.push(parse_expression(parser)?);
        }
        Some(GroupByClause(exprs))
    } else {
        None
    };

    let having = if parser.consume(&Token::Having) {
        Some(HavingClause(parse_expression(parser)?))
    } else {
        None
    };

    let window = if parser.consume(&Token::Window) {
        let mut definitions = vec![parse_window_definition(parser)?];
        while parser.consume(&Token::Comma) {
            definitions.push(parse_window_definition(parser)?);
        }
        Some(WindowClause(definitions))
    } else {
        None
    };

    Ok(SelectCore {
        distinct,
        targets,
        into_clause,
        from_clause,
        where_clause,
        group_by,
        having,
        window,
    })
}

/// A single target-list element with an optional alias
fn parse_target(parser: &mut Parser) -> Result<Expr> {
    let expr = parse_expression(parser)?;
    if parser.consume(&Token::As) {
        let alias = parser.take_identifier()?;
        return Ok(Expr::Aliased(AliasedExpr {
            expr: Box::new(expr),
            alias,
        }));
    }
    if matches!(
        parser.current(),
        Token::Identifier(_) | Token::QuotedIdentifier(_)
    ) {
        let alias = parser.take_identifier()?;
        return Ok(Expr::Aliased(AliasedExpr {
            expr: Box::new(expr),
            alias,
        }));
    }
    Ok(expr)
}

fn parse_into_tail(parser: &mut Parser) -> Result<IntoClause> {
    let options = if parser.consume_word("temporary") {
        Some(TempOption::Temporary)
    } else if parser.consume_word("temp") {
        Some(TempOption::Temp)
    } else if parser.consume_word("unlogged") {
        Some(TempOption::Unlogged)
    } else {
        None
    };
    let table_word = parser.consume(&Token::Table);
    let target = parse_qualified_name(parser)?;
    Ok(IntoClause {
        options,
        table_word,
        target,
    })
}

/// FROM list; comma-separated refs build comma-join nodes
fn parse_from_list(parser: &mut Parser) -> Result<Expr> {
    let mut expr = parse_table_ref(parser)?;
    while parser.consume(&Token::Comma) {
        let right = parse_table_ref(parser)?;
        expr = Expr::Join(Box::new(JoinExpr {
            left: Box::new(expr),
            kind: JoinKind::Comma,
            right: Box::new(right),
            using: Vec::new(),
            on: None,
        }));
    }
    Ok(expr)
}

/// Table reference with any chain of joins hanging off it
fn parse_table_ref(parser: &mut Parser) -> Result<Expr> {
    let mut expr = parse_table_atom(parser)?;
    loop {
        let kind = if parser.consume(&Token::Cross) {
            parser.expect(&Token::Join)?;
            JoinKind::Cross
        } else if parser.consume(&Token::Inner) {
            parser.expect(&Token::Join)?;
            JoinKind::Inner
        } else if parser.consume(&Token::Join) {
            JoinKind::Inner
        } else if parser.consume(&Token::Left) {
            parser.consume(&Token::Outer);
            parser.expect(&Token::Join)?;
            JoinKind::Left
        } else if parser.consume(&Token::Right) {
            parser.consume(&Token::Outer);
            parser.expect(&Token::Join)?;
            JoinKind::Right
        } else if parser.consume(&Token::Full) {
            parser.consume(&Token::Outer);
            parser.expect(&Token::Join)?;
            JoinKind::Full
        } else {
            break;
        };

        let right = parse_table_atom(parser)?;

        let mut using = Vec::new();
        let mut on = None;
        if parser.consume(&Token::Using) {
            parser.expect(&Token::LParen)?;
            using.push(parser.take_identifier()?);
            while parser.consume(&Token::Comma) {
                using.push(parser.take_identifier()?);
            }
            parser.expect(&Token::RParen)?;
        } else if parser.consume(&Token::On) {
            on = Some(Box::new(parse_expression(parser)?));
        }

        expr = Expr::Join(Box::new(JoinExpr {
            left: Box::new(expr),
            kind,
            right: Box::new(right),
            using,
            on,
        }));
    }
    Ok(expr)
}

/// Relation, table function, or parenthesized subquery, with alias
fn parse_table_atom(parser: &mut Parser) -> Result<Expr> {
    let base = if parser.check(&Token::LParen) {
        let stmt = parse_subquery(parser)?;
        Expr::Select(Box::new(stmt))
    } else {
        let only = parser.consume(&Token::Only);
        let name = parse_qualified_name(parser)?;
        if !only && parser.check(&Token::LParen) {
            parser.advance();
            parse_func_call(parser, name)?
        } else {
            let star = parser.consume(&Token::Star);
            Expr::Relation(RelationExpr { name, only, star })
        }
    };

    if parser.consume(&Token::As) {
        let alias = parser.take_identifier()?;
        return Ok(Expr::Aliased(AliasedExpr {
            expr: Box::new(base),
            alias,
        }));
    }
    if matches!(
        parser.current(),
        Token::Identifier(_) | Token::QuotedIdentifier(_)
    ) {
        let alias = parser.take_identifier()?;
        return Ok(Expr::Aliased(AliasedExpr {
            expr: Box::new(base),
            alias,
        }));
    }
    Ok(base)
}

fn parse_relation(parser: &mut Parser) -> Result<RelationExpr> {
    let only = parser.consume(&Token::Only);
    let name = parse_qualified_name(parser)?;
    let star = parser.consume(&Token::Star);
    Ok(RelationExpr { name, only, star })
}

fn parse_values_clause(parser: &mut Parser) -> Result<ValuesClause> {
    parser.expect(&Token::Values)?;
    let mut rows = vec![parse_values_row(parser)?];
    while parser.consume(&Token::Comma) {
        rows.push(parse_values_row(parser)?);
    }
    Ok(ValuesClause(rows))
}

fn parse_values_row(parser: &mut Parser) -> Result<ValuesRow> {
    parser.expect(&Token::LParen)?;
    let mut exprs = vec![parse_expression(parser)?];
    while parser.consume(&Token::Comma) {
        exprs.push(parse_expression(parser)?);
    }
    parser.expect(&Token::RParen)?;
    Ok(ValuesRow(exprs))
}

fn parse_window_definition(parser: &mut Parser) -> Result<WindowDefinition> {
    let name = parser.take_identifier()?;
    parser.expect(&Token::As)?;
    parser.expect(&Token::LParen)?;
    let specification = parse_window_specification(parser)?;
    Ok(WindowDefinition {
        name,
        specification,
    })
}

fn parse_locking_item(parser: &mut Parser) -> Result<LockingItem> {
    parser.expect(&Token::For)?;
    let strength = if parser.consume_word("update") {
        LockStrength::Update
    } else if parser.consume_word("no") {
        parser.expect_word("key")?;
        parser.expect_word("update")?;
        LockStrength::NoKeyUpdate
    } else if parser.consume_word("share") {
        LockStrength::Share
    } else if parser.consume_word("key") {
        parser.expect_word("share")?;
        LockStrength::KeyShare
    } else {
        return Err(Error::parse(format!(
            "Expected lock strength after FOR, found {:?}",
            parser.current()
        )));
    };

    let mut relations = Vec::new();
    if parser.consume(&Token::Of) {
        relations.push(parse_qualified_name(parser)?);
        while parser.consume(&Token::Comma) {
            relations.push(parse_qualified_name(parser)?);
        }
    }

    let wait_policy = if parser.consume_word("nowait") {
        Some(WaitPolicy::Nowait)
    } else if parser.consume_word("skip") {
        parser.expect_word("locked")?;
        Some(WaitPolicy::SkipLocked)
    } else {
        None
    };

    Ok(LockingItem {
        strength,
        relations,
        wait_policy,
    })
}
