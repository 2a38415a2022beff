//! SQL rendering / pretty-printing logic
//!
//! One rendering function per AST node. Rendering is total: a
//! well-formed tree always renders, there is no error path. Layout is
//! construct-driven — each node decides where spaces, newlines, and
//! indent changes go; nothing depends on resulting line width.
//!
//! Clause bodies (target list, FROM, WHERE, GROUP BY, HAVING, ORDER BY,
//! WINDOW) indent one level with one element per comma-terminated line.
//! AND/OR chains stay flat at the current indent with the connective
//! leading each continuation line. Function-shaped constructs and window
//! specifications render fully inline.

pub mod printer;

use crate::ast::*;
use crate::error::Result;
use printer::{Printer, Sink, TokenKind};

/// Parse and render, one statement after another
pub fn format_sql(input: &str) -> Result<String> {
    let statements = crate::parser::parse_statements(input)?;
    let mut printer = Printer::new();
    for stmt in &statements {
        stmt.render_to(&mut printer);
    }
    Ok(printer.finish())
}

/// Render a single statement into a fresh text printer
pub fn format_ast(stmt: &SelectStmt) -> String {
    let mut printer = Printer::new();
    stmt.render_to(&mut printer);
    printer.finish()
}

/// Render a statement through an arbitrary sink
pub fn render(stmt: &SelectStmt, sink: &mut dyn Sink) {
    stmt.render_to(sink);
}

/// Tree-walking rendering protocol
///
/// Composite nodes call `render_to` on each child in document order,
/// interleaving their own fixed tokens and layout directives.
pub trait RenderTo {
    fn render_to(&self, sink: &mut dyn Sink);
}

/// `a, b, c` — comma-space separated, fully inline
fn render_comma_list<T: RenderTo>(items: &[T], sink: &mut dyn Sink) {
    for (i, item) in items.iter().enumerate() {
        item.render_to(sink);
        if i + 1 < items.len() {
            sink.emit(",", TokenKind::Comma);
            sink.space();
        }
    }
}

/// Clause body: indent one level, one element per line, comma-terminated
/// except the last, trailing newline left pending for the next clause
fn render_clause_body<T: RenderTo>(items: &[T], sink: &mut dyn Sink) {
    sink.newline();
    sink.indent();
    for (i, item) in items.iter().enumerate() {
        item.render_to(sink);
        if i + 1 < items.len() {
            sink.emit(",", TokenKind::Comma);
        }
        sink.newline();
    }
    sink.dedent();
}

/// Operator spelled as a (possibly qualified) name
fn render_operator_name(name: &QualifiedName, sink: &mut dyn Sink) {
    if let [op] = name.0.as_slice() {
        sink.emit(op, TokenKind::Operator);
        return;
    }
    for (i, part) in name.0.iter().enumerate() {
        sink.emit(part, TokenKind::Identifier);
        if i + 1 < name.0.len() {
            sink.emit(".", TokenKind::Period);
        }
    }
}

/// Identifier that may be the `*` wildcard
fn render_name_or_star(name: &str, sink: &mut dyn Sink) {
    if name == "*" {
        sink.emit("*", TokenKind::Star);
    } else {
        sink.emit(name, TokenKind::Identifier);
    }
}

impl RenderTo for Expr {
    fn render_to(&self, sink: &mut dyn Sink) {
        match self {
            Expr::StringLiteral(s) => sink.emit(s, TokenKind::StringLiteral),
            Expr::IntegerLiteral(s) => sink.emit(s, TokenKind::IntegerLiteral),
            Expr::FloatLiteral(s) => sink.emit(s, TokenKind::FloatLiteral),
            Expr::BooleanLiteral(b) => {
                sink.emit(if *b { "true" } else { "false" }, TokenKind::BoolLiteral)
            }
            Expr::NullLiteral => sink.emit("null", TokenKind::NullLiteral),
            Expr::BitLiteral(s) => sink.emit(s, TokenKind::BitLiteral),
            Expr::ColumnRef(e) => e.render_to(sink),
            Expr::Paren(e) => e.render_to(sink),
            Expr::Aliased(e) => e.render_to(sink),
            Expr::Boolean(e) => e.render_to(sink),
            Expr::Binary(e) => e.render_to(sink),
            Expr::Unary(e) => e.render_to(sink),
            Expr::Postfix(e) => e.render_to(sink),
            Expr::TextMatch(e) => e.render_to(sink),
            Expr::Not(e) => e.render_to(sink),
            Expr::Is(e) => e.render_to(sink),
            Expr::IsOf(e) => e.render_to(sink),
            Expr::In(e) => e.render_to(sink),
            Expr::Between(e) => e.render_to(sink),
            Expr::SubqueryOp(e) => e.render_to(sink),
            Expr::Case(e) => e.render_to(sink),
            Expr::Typecast(e) => e.render_to(sink),
            Expr::TypedLiteral(e) => e.render_to(sink),
            Expr::IntervalLiteral(e) => e.render_to(sink),
            Expr::NamedCast(e) => e.render_to(sink),
            Expr::Extract(e) => e.render_to(sink),
            Expr::Overlay(e) => e.render_to(sink),
            Expr::Position(e) => e.render_to(sink),
            Expr::Substring(e) => e.render_to(sink),
            Expr::Trim(e) => e.render_to(sink),
            Expr::XmlElement(e) => e.render_to(sink),
            Expr::XmlExists(e) => e.render_to(sink),
            Expr::XmlForest(e) => e.render_to(sink),
            Expr::XmlParse(e) => e.render_to(sink),
            Expr::XmlPi(e) => e.render_to(sink),
            Expr::XmlRoot(e) => e.render_to(sink),
            Expr::XmlSerialize(e) => e.render_to(sink),
            Expr::Collate(e) => e.render_to(sink),
            Expr::AtTimeZone(e) => e.render_to(sink),
            Expr::Func(e) => e.render_to(sink),
            Expr::BareFunction(name) => sink.emit(name, TokenKind::Keyword),
            Expr::Default => sink.emit("default", TokenKind::Keyword),
            Expr::Row(e) => e.render_to(sink),
            Expr::Array(e) => e.render_to(sink),
            Expr::ArrayConstructor(e) => {
                sink.emit("array", TokenKind::Keyword);
                e.render_to(sink);
            }
            Expr::Exists(stmt) => {
                sink.emit("exists", TokenKind::Keyword);
                stmt.render_to(sink);
            }
            Expr::ArraySubselect(stmt) => {
                sink.emit("array", TokenKind::Keyword);
                stmt.render_to(sink);
            }
            Expr::Select(stmt) => stmt.render_to(sink),
            Expr::Relation(e) => e.render_to(sink),
            Expr::Join(e) => e.render_to(sink),
        }
    }
}

impl RenderTo for QualifiedName {
    fn render_to(&self, sink: &mut dyn Sink) {
        for (i, part) in self.0.iter().enumerate() {
            sink.emit(part, TokenKind::Identifier);
            if i + 1 < self.0.len() {
                sink.emit(".", TokenKind::Period);
            }
        }
    }
}

impl RenderTo for ColumnRef {
    fn render_to(&self, sink: &mut dyn Sink) {
        render_name_or_star(&self.name, sink);
        if let Some(indirection) = &self.indirection {
            indirection.render_to(sink);
        }
    }
}

impl RenderTo for Indirection {
    fn render_to(&self, sink: &mut dyn Sink) {
        for el in &self.0 {
            el.render_to(sink);
        }
    }
}

impl RenderTo for IndirectionEl {
    fn render_to(&self, sink: &mut dyn Sink) {
        match self {
            IndirectionEl::Field(name) => {
                sink.emit(".", TokenKind::Period);
                render_name_or_star(name, sink);
            }
            IndirectionEl::Subscript { lower, upper } => {
                sink.emit("[", TokenKind::OpenBracket);
                lower.render_to(sink);
                if let Some(upper) = upper {
                    sink.emit(":", TokenKind::Colon);
                    upper.render_to(sink);
                }
                sink.emit("]", TokenKind::CloseBracket);
            }
        }
    }
}

impl RenderTo for BooleanExpr {
    fn render_to(&self, sink: &mut dyn Sink) {
        self.left.render_to(sink);
        sink.newline();
        let keyword = match self.op {
            BoolOp::And => "and",
            BoolOp::Or => "or",
        };
        sink.emit(keyword, TokenKind::Keyword);
        sink.space();
        self.right.render_to(sink);
    }
}

impl RenderTo for BinaryExpr {
    fn render_to(&self, sink: &mut dyn Sink) {
        self.left.render_to(sink);
        sink.space();
        render_operator_name(&self.op, sink);
        sink.space();
        self.right.render_to(sink);
    }
}

impl RenderTo for UnaryExpr {
    fn render_to(&self, sink: &mut dyn Sink) {
        render_operator_name(&self.op, sink);
        self.expr.render_to(sink);
    }
}

impl RenderTo for PostfixExpr {
    fn render_to(&self, sink: &mut dyn Sink) {
        self.expr.render_to(sink);
        sink.space();
        render_operator_name(&self.op, sink);
    }
}

impl RenderTo for TextMatchExpr {
    fn render_to(&self, sink: &mut dyn Sink) {
        self.left.render_to(sink);
        sink.space();
        if self.not {
            sink.emit("not", TokenKind::Keyword);
            sink.space();
        }
        let keyword = match self.op {
            TextOp::Like => "like",
            TextOp::ILike => "ilike",
            TextOp::SimilarTo => "similar to",
        };
        sink.emit(keyword, TokenKind::Keyword);
        sink.space();
        self.right.render_to(sink);
        if let Some(escape) = &self.escape {
            sink.space();
            sink.emit("escape", TokenKind::Keyword);
            sink.space();
            escape.render_to(sink);
        }
    }
}

impl RenderTo for NotExpr {
    fn render_to(&self, sink: &mut dyn Sink) {
        sink.emit("not", TokenKind::Keyword);
        sink.space();
        self.0.render_to(sink);
    }
}

impl RenderTo for IsExpr {
    fn render_to(&self, sink: &mut dyn Sink) {
        self.expr.render_to(sink);
        sink.space();
        sink.emit("is", TokenKind::Keyword);
        sink.space();
        if self.not {
            sink.emit("not", TokenKind::Keyword);
            sink.space();
        }
        let keyword = match self.test {
            IsTest::Null => "null",
            IsTest::True => "true",
            IsTest::False => "false",
            IsTest::Unknown => "unknown",
            IsTest::Document => "document",
        };
        sink.emit(keyword, TokenKind::Keyword);
    }
}

impl RenderTo for IsOfExpr {
    fn render_to(&self, sink: &mut dyn Sink) {
        self.expr.render_to(sink);
        sink.space();
        sink.emit("is", TokenKind::Keyword);
        sink.space();
        if self.not {
            sink.emit("not", TokenKind::Keyword);
            sink.space();
        }
        sink.emit("of", TokenKind::Keyword);
        sink.space();
        sink.emit("(", TokenKind::OpenParen);
        render_comma_list(&self.types, sink);
        sink.emit(")", TokenKind::CloseParen);
    }
}

impl RenderTo for InExpr {
    fn render_to(&self, sink: &mut dyn Sink) {
        self.value.render_to(sink);
        sink.space();
        if self.not {
            sink.emit("not", TokenKind::Keyword);
            sink.space();
        }
        sink.emit("in", TokenKind::Keyword);
        sink.space();
        self.set.render_to(sink);
    }
}

impl RenderTo for BetweenExpr {
    fn render_to(&self, sink: &mut dyn Sink) {
        self.expr.render_to(sink);
        sink.space();
        if self.not {
            sink.emit("not", TokenKind::Keyword);
            sink.space();
        }
        sink.emit("between", TokenKind::Keyword);
        sink.space();
        if self.symmetric {
            sink.emit("symmetric", TokenKind::Keyword);
            sink.space();
        }
        self.low.render_to(sink);
        sink.space();
        sink.emit("and", TokenKind::Keyword);
        sink.space();
        self.high.render_to(sink);
    }
}

impl RenderTo for SubqueryOp {
    fn render_to(&self, sink: &mut dyn Sink) {
        if self.operator_syntax {
            sink.emit("operator", TokenKind::Keyword);
            sink.emit("(", TokenKind::OpenParen);
        }
        render_operator_name(&self.name, sink);
        if self.operator_syntax {
            sink.emit(")", TokenKind::CloseParen);
        }
    }
}

impl RenderTo for SubqueryOpExpr {
    fn render_to(&self, sink: &mut dyn Sink) {
        self.value.render_to(sink);
        sink.space();
        self.op.render_to(sink);
        sink.space();
        let keyword = match self.quantifier {
            SubqueryQuantifier::Any => "any",
            SubqueryQuantifier::All => "all",
            SubqueryQuantifier::Some => "some",
        };
        sink.emit(keyword, TokenKind::Keyword);
        sink.space();
        self.query.render_to(sink);
    }
}

impl RenderTo for WhenClause {
    fn render_to(&self, sink: &mut dyn Sink) {
        sink.emit("when", TokenKind::Keyword);
        sink.space();
        self.condition.render_to(sink);
        sink.space();
        sink.emit("then", TokenKind::Keyword);
        sink.newline();
        sink.indent();
        self.result.render_to(sink);
        sink.newline();
        sink.dedent();
    }
}

impl RenderTo for CaseExpr {
    fn render_to(&self, sink: &mut dyn Sink) {
        sink.emit("case", TokenKind::Keyword);
        if let Some(subject) = &self.subject {
            sink.space();
            subject.render_to(sink);
        }
        sink.newline();
        for when in &self.when_clauses {
            when.render_to(sink);
        }
        if let Some(default) = &self.else_clause {
            sink.emit("else", TokenKind::Keyword);
            sink.newline();
            sink.indent();
            default.render_to(sink);
            sink.newline();
            sink.dedent();
        }
        sink.emit("end", TokenKind::Keyword);
        sink.newline();
    }
}

impl RenderTo for ParenExpr {
    fn render_to(&self, sink: &mut dyn Sink) {
        sink.emit("(", TokenKind::OpenParen);
        self.expr.render_to(sink);
        sink.emit(")", TokenKind::CloseParen);
        if let Some(indirection) = &self.indirection {
            indirection.render_to(sink);
        }
    }
}

impl RenderTo for TypeName {
    fn render_to(&self, sink: &mut dyn Sink) {
        if self.setof {
            sink.emit("setof", TokenKind::Keyword);
            sink.space();
        }
        self.name.render_to(sink);
        if let Some(interval) = &self.interval {
            sink.space();
            interval.render_to(sink);
        }
        if self.array_word {
            sink.space();
            sink.emit("array", TokenKind::Keyword);
        }
        for bound in &self.array_bounds {
            sink.emit("[", TokenKind::OpenBracket);
            if let Some(bound) = bound {
                sink.emit(bound, TokenKind::IntegerLiteral);
            }
            sink.emit("]", TokenKind::CloseBracket);
        }
        if !self.modifiers.is_empty() {
            sink.emit("(", TokenKind::OpenParen);
            render_comma_list(&self.modifiers, sink);
            sink.emit(")", TokenKind::CloseParen);
        }
        if self.with_time_zone {
            sink.space();
            sink.emit("with time zone", TokenKind::Keyword);
        }
        if let Some(char_set) = &self.char_set {
            sink.space();
            sink.emit("character set", TokenKind::Keyword);
            sink.space();
            sink.emit(char_set, TokenKind::Identifier);
        }
    }
}

impl RenderTo for IntervalQualifier {
    fn render_to(&self, sink: &mut dyn Sink) {
        match self {
            IntervalQualifier::Unit(unit) => {
                sink.emit(interval_unit_keyword(*unit), TokenKind::Keyword)
            }
            IntervalQualifier::Range(from, to) => {
                sink.emit(interval_unit_keyword(*from), TokenKind::Keyword);
                sink.space();
                sink.emit("to", TokenKind::Keyword);
                sink.space();
                sink.emit(interval_unit_keyword(*to), TokenKind::Keyword);
            }
            IntervalQualifier::Second(second) => second.render_to(sink),
            IntervalQualifier::RangeToSecond(from, second) => {
                sink.emit(interval_unit_keyword(*from), TokenKind::Keyword);
                sink.space();
                sink.emit("to", TokenKind::Keyword);
                sink.space();
                second.render_to(sink);
            }
        }
    }
}

fn interval_unit_keyword(unit: IntervalUnit) -> &'static str {
    match unit {
        IntervalUnit::Year => "year",
        IntervalUnit::Month => "month",
        IntervalUnit::Day => "day",
        IntervalUnit::Hour => "hour",
        IntervalUnit::Minute => "minute",
    }
}

impl RenderTo for IntervalSecond {
    fn render_to(&self, sink: &mut dyn Sink) {
        sink.emit("second", TokenKind::Keyword);
        if let Some(precision) = &self.precision {
            sink.emit("(", TokenKind::OpenParen);
            sink.emit(precision, TokenKind::IntegerLiteral);
            sink.emit(")", TokenKind::CloseParen);
        }
    }
}

impl RenderTo for TypecastExpr {
    fn render_to(&self, sink: &mut dyn Sink) {
        self.expr.render_to(sink);
        sink.emit("::", TokenKind::Typecast);
        self.type_name.render_to(sink);
    }
}

impl RenderTo for TypedLiteralExpr {
    fn render_to(&self, sink: &mut dyn Sink) {
        self.type_name.render_to(sink);
        sink.space();
        self.value.render_to(sink);
    }
}

impl RenderTo for IntervalLiteralExpr {
    fn render_to(&self, sink: &mut dyn Sink) {
        sink.emit("interval", TokenKind::Keyword);
        if let Some(precision) = &self.precision {
            sink.emit("(", TokenKind::OpenParen);
            sink.emit(precision, TokenKind::IntegerLiteral);
            sink.emit(")", TokenKind::CloseParen);
        }
        sink.space();
        self.value.render_to(sink);
        if let Some(qualifier) = &self.qualifier {
            sink.space();
            qualifier.render_to(sink);
        }
    }
}

impl RenderTo for NamedCastExpr {
    fn render_to(&self, sink: &mut dyn Sink) {
        let keyword = match self.name {
            CastName::Cast => "cast",
            CastName::Treat => "treat",
        };
        sink.emit(keyword, TokenKind::Keyword);
        sink.emit("(", TokenKind::OpenParen);
        self.expr.render_to(sink);
        sink.space();
        sink.emit("as", TokenKind::Keyword);
        sink.space();
        self.type_name.render_to(sink);
        sink.emit(")", TokenKind::CloseParen);
    }
}

impl RenderTo for ExtractExpr {
    fn render_to(&self, sink: &mut dyn Sink) {
        sink.emit("extract", TokenKind::Keyword);
        sink.emit("(", TokenKind::OpenParen);
        self.field.render_to(sink);
        sink.space();
        sink.emit("from", TokenKind::Keyword);
        sink.space();
        self.source.render_to(sink);
        sink.emit(")", TokenKind::CloseParen);
    }
}

impl RenderTo for OverlayExpr {
    fn render_to(&self, sink: &mut dyn Sink) {
        sink.emit("overlay", TokenKind::Keyword);
        sink.emit("(", TokenKind::OpenParen);
        self.dest.render_to(sink);
        sink.space();
        sink.emit("placing", TokenKind::Keyword);
        sink.space();
        self.placing.render_to(sink);
        sink.space();
        sink.emit("from", TokenKind::Keyword);
        sink.space();
        self.from.render_to(sink);
        if let Some(for_length) = &self.for_length {
            sink.space();
            sink.emit("for", TokenKind::Keyword);
            sink.space();
            for_length.render_to(sink);
        }
        sink.emit(")", TokenKind::CloseParen);
    }
}

impl RenderTo for PositionExpr {
    fn render_to(&self, sink: &mut dyn Sink) {
        sink.emit("position", TokenKind::Keyword);
        sink.emit("(", TokenKind::OpenParen);
        self.needle.render_to(sink);
        sink.space();
        sink.emit("in", TokenKind::Keyword);
        sink.space();
        self.haystack.render_to(sink);
        sink.emit(")", TokenKind::CloseParen);
    }
}

impl RenderTo for SubstringExpr {
    fn render_to(&self, sink: &mut dyn Sink) {
        sink.emit("substring", TokenKind::Keyword);
        sink.emit("(", TokenKind::OpenParen);
        self.source.render_to(sink);
        sink.space();
        sink.emit("from", TokenKind::Keyword);
        sink.space();
        self.from.render_to(sink);
        if let Some(for_length) = &self.for_length {
            sink.space();
            sink.emit("for", TokenKind::Keyword);
            sink.space();
            for_length.render_to(sink);
        }
        sink.emit(")", TokenKind::CloseParen);
    }
}

impl RenderTo for TrimExpr {
    fn render_to(&self, sink: &mut dyn Sink) {
        sink.emit("trim", TokenKind::Keyword);
        sink.emit("(", TokenKind::OpenParen);
        if let Some(direction) = self.direction {
            let keyword = match direction {
                TrimDirection::Both => "both",
                TrimDirection::Leading => "leading",
                TrimDirection::Trailing => "trailing",
            };
            sink.emit(keyword, TokenKind::Keyword);
            sink.space();
        }
        if let Some(head) = &self.head {
            head.render_to(sink);
            sink.space();
        }
        if self.from {
            sink.emit("from", TokenKind::Keyword);
            sink.space();
        }
        render_comma_list(&self.tail, sink);
        sink.emit(")", TokenKind::CloseParen);
    }
}

/// `xmlattributes(...)` wrapper shared by XMLELEMENT
fn render_xml_attributes(attributes: &[XmlAttributeEl], sink: &mut dyn Sink) {
    sink.emit("xmlattributes", TokenKind::Keyword);
    sink.emit("(", TokenKind::OpenParen);
    render_comma_list(attributes, sink);
    sink.emit(")", TokenKind::CloseParen);
}

impl RenderTo for XmlAttributeEl {
    fn render_to(&self, sink: &mut dyn Sink) {
        self.value.render_to(sink);
        if let Some(name) = &self.name {
            sink.space();
            sink.emit("as", TokenKind::Keyword);
            sink.space();
            sink.emit(name, TokenKind::Identifier);
        }
    }
}

impl RenderTo for XmlElement {
    fn render_to(&self, sink: &mut dyn Sink) {
        sink.emit("xmlelement", TokenKind::Keyword);
        sink.emit("(", TokenKind::OpenParen);
        sink.emit("name", TokenKind::Keyword);
        sink.space();
        sink.emit(&self.name, TokenKind::Identifier);
        if let Some(attributes) = &self.attributes {
            sink.emit(",", TokenKind::Comma);
            sink.space();
            render_xml_attributes(attributes, sink);
        }
        for expr in &self.body {
            sink.emit(",", TokenKind::Comma);
            sink.space();
            expr.render_to(sink);
        }
        sink.emit(")", TokenKind::CloseParen);
    }
}

impl RenderTo for XmlExistsArgument {
    fn render_to(&self, sink: &mut dyn Sink) {
        sink.emit("passing", TokenKind::Keyword);
        sink.space();
        if self.left_by_ref {
            sink.emit("by ref", TokenKind::Keyword);
            sink.space();
        }
        self.arg.render_to(sink);
        if self.right_by_ref {
            sink.space();
            sink.emit("by ref", TokenKind::Keyword);
        }
    }
}

impl RenderTo for XmlExists {
    fn render_to(&self, sink: &mut dyn Sink) {
        sink.emit("xmlexists", TokenKind::Keyword);
        sink.emit("(", TokenKind::OpenParen);
        self.path.render_to(sink);
        sink.space();
        self.passing.render_to(sink);
        sink.emit(")", TokenKind::CloseParen);
    }
}

impl RenderTo for XmlForest {
    fn render_to(&self, sink: &mut dyn Sink) {
        sink.emit("xmlforest", TokenKind::Keyword);
        sink.emit("(", TokenKind::OpenParen);
        render_comma_list(&self.0, sink);
        sink.emit(")", TokenKind::CloseParen);
    }
}

fn xml_content_type_keyword(content_type: XmlContentType) -> &'static str {
    match content_type {
        XmlContentType::Document => "document",
        XmlContentType::Content => "content",
    }
}

impl RenderTo for XmlParse {
    fn render_to(&self, sink: &mut dyn Sink) {
        sink.emit("xmlparse", TokenKind::Keyword);
        sink.emit("(", TokenKind::OpenParen);
        sink.emit(xml_content_type_keyword(self.content_type), TokenKind::Keyword);
        sink.space();
        self.content.render_to(sink);
        if let Some(whitespace) = self.whitespace {
            sink.space();
            let keyword = match whitespace {
                XmlWhitespace::Preserve => "preserve whitespace",
                XmlWhitespace::Strip => "strip whitespace",
            };
            sink.emit(keyword, TokenKind::Keyword);
        }
        sink.emit(")", TokenKind::CloseParen);
    }
}

impl RenderTo for XmlPi {
    fn render_to(&self, sink: &mut dyn Sink) {
        sink.emit("xmlpi", TokenKind::Keyword);
        sink.emit("(", TokenKind::OpenParen);
        sink.emit("name", TokenKind::Keyword);
        sink.space();
        sink.emit(&self.name, TokenKind::Identifier);
        if let Some(content) = &self.content {
            sink.emit(",", TokenKind::Comma);
            sink.space();
            content.render_to(sink);
        }
        sink.emit(")", TokenKind::CloseParen);
    }
}

impl RenderTo for XmlRootVersion {
    fn render_to(&self, sink: &mut dyn Sink) {
        sink.emit("version", TokenKind::Keyword);
        sink.space();
        match &self.expr {
            Some(expr) => expr.render_to(sink),
            None => sink.emit("no value", TokenKind::Keyword),
        }
    }
}

impl RenderTo for XmlRoot {
    fn render_to(&self, sink: &mut dyn Sink) {
        sink.emit("xmlroot", TokenKind::Keyword);
        sink.emit("(", TokenKind::OpenParen);
        self.xml.render_to(sink);
        sink.emit(",", TokenKind::Comma);
        sink.space();
        self.version.render_to(sink);
        if let Some(standalone) = self.standalone {
            sink.emit(",", TokenKind::Comma);
            sink.space();
            sink.emit("standalone", TokenKind::Keyword);
            sink.space();
            let keyword = match standalone {
                XmlStandalone::Yes => "yes",
                XmlStandalone::No => "no",
                XmlStandalone::NoValue => "no value",
            };
            sink.emit(keyword, TokenKind::Keyword);
        }
        sink.emit(")", TokenKind::CloseParen);
    }
}

impl RenderTo for XmlSerialize {
    fn render_to(&self, sink: &mut dyn Sink) {
        sink.emit("xmlserialize", TokenKind::Keyword);
        sink.emit("(", TokenKind::OpenParen);
        sink.emit(xml_content_type_keyword(self.content_type), TokenKind::Keyword);
        sink.space();
        self.content.render_to(sink);
        sink.space();
        sink.emit("as", TokenKind::Keyword);
        sink.space();
        self.type_name.render_to(sink);
        sink.emit(")", TokenKind::CloseParen);
    }
}

impl RenderTo for CollateExpr {
    fn render_to(&self, sink: &mut dyn Sink) {
        self.expr.render_to(sink);
        sink.space();
        sink.emit("collate", TokenKind::Keyword);
        sink.space();
        self.collation.render_to(sink);
    }
}

impl RenderTo for AtTimeZoneExpr {
    fn render_to(&self, sink: &mut dyn Sink) {
        self.expr.render_to(sink);
        sink.space();
        sink.emit("at time zone", TokenKind::Keyword);
        sink.space();
        self.time_zone.render_to(sink);
    }
}

impl RenderTo for AliasedExpr {
    fn render_to(&self, sink: &mut dyn Sink) {
        self.expr.render_to(sink);
        sink.space();
        sink.emit("as", TokenKind::Keyword);
        sink.space();
        sink.emit(&self.alias, TokenKind::Identifier);
    }
}

impl RenderTo for FuncArg {
    fn render_to(&self, sink: &mut dyn Sink) {
        if let Some(name) = &self.name {
            sink.emit(&name.name, TokenKind::Identifier);
            sink.space();
            let symbol = match name.op {
                NamedArgOp::ColonEquals => ":=",
                NamedArgOp::FatArrow => "=>",
            };
            sink.emit(symbol, TokenKind::Operator);
            sink.space();
        }
        self.expr.render_to(sink);
    }
}

impl RenderTo for FuncApplication {
    fn render_to(&self, sink: &mut dyn Sink) {
        self.name.render_to(sink);
        sink.emit("(", TokenKind::OpenParen);
        if self.distinct {
            sink.emit("distinct", TokenKind::Keyword);
            sink.space();
        }
        if self.star {
            sink.emit("*", TokenKind::Star);
        } else if !self.args.is_empty() {
            render_comma_list(&self.args, sink);
        }
        if let Some(variadic) = &self.variadic_arg {
            if !self.args.is_empty() {
                sink.emit(",", TokenKind::Comma);
                sink.space();
            }
            sink.emit("variadic", TokenKind::Keyword);
            sink.space();
            variadic.render_to(sink);
        }
        if let Some(order_by) = &self.order_by {
            sink.space();
            order_by.render_to(sink);
        }
        sink.emit(")", TokenKind::CloseParen);
    }
}

impl RenderTo for WithinGroupClause {
    fn render_to(&self, sink: &mut dyn Sink) {
        sink.emit("within group", TokenKind::Keyword);
        sink.space();
        sink.emit("(", TokenKind::OpenParen);
        self.0.render_to(sink);
        sink.emit(")", TokenKind::CloseParen);
    }
}

impl RenderTo for FilterClause {
    fn render_to(&self, sink: &mut dyn Sink) {
        sink.emit("filter", TokenKind::Keyword);
        sink.space();
        sink.emit("(", TokenKind::OpenParen);
        sink.emit("where", TokenKind::Keyword);
        sink.space();
        self.0.render_to(sink);
        sink.emit(")", TokenKind::CloseParen);
    }
}

impl RenderTo for OverClause {
    fn render_to(&self, sink: &mut dyn Sink) {
        sink.emit("over", TokenKind::Keyword);
        sink.space();
        match self {
            OverClause::WindowName(name) => sink.emit(name, TokenKind::Identifier),
            OverClause::Specification(spec) => spec.render_to(sink),
        }
    }
}

impl RenderTo for FuncExpr {
    fn render_to(&self, sink: &mut dyn Sink) {
        self.application.render_to(sink);
        if let Some(within_group) = &self.within_group {
            sink.space();
            within_group.render_to(sink);
        }
        if let Some(filter) = &self.filter {
            sink.space();
            filter.render_to(sink);
        }
        if let Some(over) = &self.over {
            sink.space();
            over.render_to(sink);
        }
    }
}

impl RenderTo for Row {
    fn render_to(&self, sink: &mut dyn Sink) {
        if self.row_word {
            sink.emit("row", TokenKind::Keyword);
            sink.space();
        }
        sink.emit("(", TokenKind::OpenParen);
        render_comma_list(&self.exprs, sink);
        sink.emit(")", TokenKind::CloseParen);
    }
}

impl RenderTo for ArrayExpr {
    fn render_to(&self, sink: &mut dyn Sink) {
        sink.emit("[", TokenKind::OpenBracket);
        render_comma_list(&self.0, sink);
        sink.emit("]", TokenKind::CloseBracket);
    }
}

impl RenderTo for WindowSpecification {
    fn render_to(&self, sink: &mut dyn Sink) {
        sink.emit("(", TokenKind::OpenParen);
        let mut first = true;
        if let Some(base_name) = &self.base_name {
            first = false;
            sink.emit(base_name, TokenKind::Identifier);
        }
        if let Some(partition) = &self.partition {
            if !first {
                sink.space();
            }
            first = false;
            sink.emit("partition by", TokenKind::Keyword);
            sink.space();
            render_comma_list(partition, sink);
        }
        if let Some(order_by) = &self.order_by {
            if !first {
                sink.space();
            }
            first = false;
            sink.emit("order by", TokenKind::Keyword);
            sink.space();
            render_comma_list(&order_by.0, sink);
        }
        if let Some(frame) = &self.frame {
            if !first {
                sink.space();
            }
            frame.render_to(sink);
        }
        sink.emit(")", TokenKind::CloseParen);
    }
}

impl RenderTo for FrameClause {
    fn render_to(&self, sink: &mut dyn Sink) {
        let keyword = match self.mode {
            FrameMode::Range => "range",
            FrameMode::Rows => "rows",
            FrameMode::Groups => "groups",
        };
        sink.emit(keyword, TokenKind::Keyword);
        sink.space();
        match &self.end {
            Some(end) => {
                sink.emit("between", TokenKind::Keyword);
                sink.space();
                self.start.render_to(sink);
                sink.space();
                sink.emit("and", TokenKind::Keyword);
                sink.space();
                end.render_to(sink);
            }
            None => self.start.render_to(sink),
        }
    }
}

fn bound_direction_keyword(direction: BoundDirection) -> &'static str {
    match direction {
        BoundDirection::Preceding => "preceding",
        BoundDirection::Following => "following",
    }
}

impl RenderTo for FrameBound {
    fn render_to(&self, sink: &mut dyn Sink) {
        match self {
            FrameBound::CurrentRow => sink.emit("current row", TokenKind::Keyword),
            FrameBound::Unbounded(direction) => {
                sink.emit("unbounded", TokenKind::Keyword);
                sink.space();
                sink.emit(bound_direction_keyword(*direction), TokenKind::Keyword);
            }
            FrameBound::Offset(expr, direction) => {
                expr.render_to(sink);
                sink.space();
                sink.emit(bound_direction_keyword(*direction), TokenKind::Keyword);
            }
        }
    }
}

impl RenderTo for WindowDefinition {
    fn render_to(&self, sink: &mut dyn Sink) {
        sink.emit(&self.name, TokenKind::Identifier);
        sink.space();
        sink.emit("as", TokenKind::Keyword);
        sink.space();
        self.specification.render_to(sink);
    }
}

impl RenderTo for WindowClause {
    fn render_to(&self, sink: &mut dyn Sink) {
        sink.emit("window", TokenKind::Keyword);
        render_clause_body(&self.0, sink);
    }
}

impl RenderTo for IntoClause {
    fn render_to(&self, sink: &mut dyn Sink) {
        sink.emit("into", TokenKind::Keyword);
        sink.space();
        if let Some(options) = self.options {
            let keyword = match options {
                TempOption::Temporary => "temporary",
                TempOption::Temp => "temp",
                TempOption::Unlogged => "unlogged",
            };
            sink.emit(keyword, TokenKind::Keyword);
            sink.space();
        }
        if self.table_word {
            sink.emit("table", TokenKind::Keyword);
            sink.space();
        }
        self.target.render_to(sink);
        sink.newline();
    }
}

impl RenderTo for FromClause {
    fn render_to(&self, sink: &mut dyn Sink) {
        sink.emit("from", TokenKind::Keyword);
        sink.newline();
        sink.indent();
        self.0.render_to(sink);
        sink.newline();
        sink.dedent();
    }
}

impl RenderTo for WhereClause {
    fn render_to(&self, sink: &mut dyn Sink) {
        sink.emit("where", TokenKind::Keyword);
        sink.newline();
        sink.indent();
        self.0.render_to(sink);
        sink.newline();
        sink.dedent();
    }
}

impl RenderTo for GroupByClause {
    fn render_to(&self, sink: &mut dyn Sink) {
        sink.emit("group by", TokenKind::Keyword);
        render_clause_body(&self.0, sink);
    }
}

impl RenderTo for HavingClause {
    fn render_to(&self, sink: &mut dyn Sink) {
        sink.emit("having", TokenKind::Keyword);
        sink.newline();
        sink.indent();
        self.0.render_to(sink);
        sink.newline();
        sink.dedent();
    }
}

impl RenderTo for OrderExpr {
    fn render_to(&self, sink: &mut dyn Sink) {
        self.expr.render_to(sink);
        if let Some(direction) = self.direction {
            sink.space();
            let keyword = match direction {
                SortDirection::Asc => "asc",
                SortDirection::Desc => "desc",
            };
            sink.emit(keyword, TokenKind::Keyword);
        }
        if let Some(using) = &self.using {
            sink.space();
            sink.emit("using", TokenKind::Keyword);
            sink.space();
            render_operator_name(using, sink);
        }
        if let Some(nulls) = self.nulls {
            sink.space();
            sink.emit("nulls", TokenKind::Keyword);
            sink.space();
            let keyword = match nulls {
                NullsOrder::First => "first",
                NullsOrder::Last => "last",
            };
            sink.emit(keyword, TokenKind::Keyword);
        }
    }
}

impl RenderTo for OrderClause {
    fn render_to(&self, sink: &mut dyn Sink) {
        sink.emit("order by", TokenKind::Keyword);
        render_clause_body(&self.0, sink);
    }
}

impl RenderTo for LimitClause {
    fn render_to(&self, sink: &mut dyn Sink) {
        if let Some(limit) = &self.limit {
            sink.emit("limit", TokenKind::Keyword);
            sink.space();
            limit.render_to(sink);
            sink.newline();
        }
        if let Some(offset) = &self.offset {
            sink.emit("offset", TokenKind::Keyword);
            sink.space();
            offset.render_to(sink);
            sink.newline();
        }
    }
}

impl RenderTo for LockingItem {
    fn render_to(&self, sink: &mut dyn Sink) {
        sink.emit("for", TokenKind::Keyword);
        sink.space();
        let keyword = match self.strength {
            LockStrength::Update => "update",
            LockStrength::NoKeyUpdate => "no key update",
            LockStrength::Share => "share",
            LockStrength::KeyShare => "key share",
        };
        sink.emit(keyword, TokenKind::Keyword);
        if !self.relations.is_empty() {
            sink.space();
            sink.emit("of", TokenKind::Keyword);
            sink.space();
            render_comma_list(&self.relations, sink);
        }
        if let Some(policy) = self.wait_policy {
            sink.space();
            let keyword = match policy {
                WaitPolicy::Nowait => "nowait",
                WaitPolicy::SkipLocked => "skip locked",
            };
            sink.emit(keyword, TokenKind::Keyword);
        }
        sink.newline();
    }
}

impl RenderTo for LockingClause {
    fn render_to(&self, sink: &mut dyn Sink) {
        for item in &self.0 {
            item.render_to(sink);
        }
    }
}

impl RenderTo for RelationExpr {
    fn render_to(&self, sink: &mut dyn Sink) {
        if self.only {
            sink.emit("only", TokenKind::Keyword);
            sink.space();
        }
        self.name.render_to(sink);
        if self.star {
            sink.space();
            sink.emit("*", TokenKind::Star);
        }
    }
}

impl RenderTo for JoinExpr {
    fn render_to(&self, sink: &mut dyn Sink) {
        self.left.render_to(sink);
        match self.kind {
            JoinKind::Comma => {
                sink.emit(",", TokenKind::Comma);
                sink.newline();
            }
            kind => {
                sink.newline();
                let keyword = match kind {
                    JoinKind::Inner => "join",
                    JoinKind::Left => "left join",
                    JoinKind::Right => "right join",
                    JoinKind::Full => "full join",
                    JoinKind::Cross => "cross join",
                    JoinKind::Comma => unreachable!(),
                };
                sink.emit(keyword, TokenKind::Keyword);
                sink.space();
            }
        }
        self.right.render_to(sink);
        if !self.using.is_empty() {
            sink.space();
            sink.emit("using", TokenKind::Keyword);
            sink.emit("(", TokenKind::OpenParen);
            for (i, column) in self.using.iter().enumerate() {
                sink.emit(column, TokenKind::Identifier);
                if i + 1 < self.using.len() {
                    sink.emit(",", TokenKind::Comma);
                    sink.space();
                }
            }
            sink.emit(")", TokenKind::CloseParen);
        }
        if let Some(on) = &self.on {
            sink.space();
            sink.emit("on", TokenKind::Keyword);
            sink.space();
            on.render_to(sink);
        }
    }
}

impl RenderTo for ValuesRow {
    fn render_to(&self, sink: &mut dyn Sink) {
        sink.emit("(", TokenKind::OpenParen);
        render_comma_list(&self.0, sink);
        sink.emit(")", TokenKind::CloseParen);
    }
}

impl RenderTo for ValuesClause {
    fn render_to(&self, sink: &mut dyn Sink) {
        sink.emit("values", TokenKind::Keyword);
        render_clause_body(&self.0, sink);
    }
}

impl RenderTo for SelectCore {
    fn render_to(&self, sink: &mut dyn Sink) {
        sink.emit("select", TokenKind::Keyword);
        if let Some(distinct) = &self.distinct {
            sink.space();
            sink.emit("distinct", TokenKind::Keyword);
            if !distinct.is_empty() {
                sink.space();
                sink.emit("on", TokenKind::Keyword);
                sink.emit("(", TokenKind::OpenParen);
                render_comma_list(distinct, sink);
                sink.emit(")", TokenKind::CloseParen);
            }
        }
        render_clause_body(&self.targets, sink);
        if let Some(into_clause) = &self.into_clause {
            into_clause.render_to(sink);
        }
        if let Some(from_clause) = &self.from_clause {
            from_clause.render_to(sink);
        }
        if let Some(where_clause) = &self.where_clause {
            where_clause.render_to(sink);
        }
        if let Some(group_by) = &self.group_by {
            group_by.render_to(sink);
        }
        if let Some(having) = &self.having {
            having.render_to(sink);
        }
        if let Some(window) = &self.window {
            window.render_to(sink);
        }
    }
}

impl RenderTo for SimpleSelect {
    fn render_to(&self, sink: &mut dyn Sink) {
        match self {
            SimpleSelect::Table(relation) => {
                sink.emit("table", TokenKind::Keyword);
                sink.space();
                relation.render_to(sink);
                sink.newline();
            }
            SimpleSelect::Values(values) => values.render_to(sink),
            SimpleSelect::SetOp {
                op,
                all,
                left,
                right,
            } => {
                left.render_to(sink);
                sink.newline();
                let keyword = match op {
                    SetOp::Union => "union",
                    SetOp::Intersect => "intersect",
                    SetOp::Except => "except",
                };
                sink.emit(keyword, TokenKind::Keyword);
                if *all {
                    sink.space();
                    sink.emit("all", TokenKind::Keyword);
                }
                sink.newline();
                right.render_to(sink);
            }
            SimpleSelect::Select(core) => core.render_to(sink),
        }
    }
}

impl RenderTo for SelectStmt {
    fn render_to(&self, sink: &mut dyn Sink) {
        if self.paren_wrapped {
            sink.emit("(", TokenKind::OpenParen);
        }
        self.body.render_to(sink);
        if let Some(order_by) = &self.order_by {
            order_by.render_to(sink);
        }
        if let Some(limit) = &self.limit {
            limit.render_to(sink);
        }
        if let Some(locking) = &self.locking {
            locking.render_to(sink);
        }
        if self.paren_wrapped {
            sink.emit(")", TokenKind::CloseParen);
            sink.newline();
        }
        if self.semicolon {
            sink.emit(";", TokenKind::Semicolon);
            sink.newline();
        }
    }
}
