//! AST node definitions for SQL SELECT statements
//!
//! This module defines the abstract syntax tree consumed by the renderer.
//! Nodes are plain immutable data: the parser builds them once and the
//! formatter walks them read-only. Every list field is ordered, and every
//! `Option` field that is `None` means "omit this clause entirely".

/// Expression node
///
/// The closed sum over every value-producing construct. The renderer
/// matches on this exhaustively, so adding a variant without a rendering
/// rule is a compile error.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// String constant, lexeme kept verbatim including quotes
    StringLiteral(String),
    /// Integer constant, lexeme kept verbatim (never parsed to a number)
    IntegerLiteral(String),
    /// Float constant, lexeme kept verbatim
    FloatLiteral(String),
    BooleanLiteral(bool),
    NullLiteral,
    /// Bit/hex string constant (`b'0101'`, `x'1f'`), lexeme verbatim
    BitLiteral(String),

    ColumnRef(ColumnRef),
    Paren(ParenExpr),
    Aliased(AliasedExpr),

    Boolean(BooleanExpr),
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Postfix(PostfixExpr),
    TextMatch(TextMatchExpr),
    Not(NotExpr),
    Is(IsExpr),
    IsOf(IsOfExpr),
    In(InExpr),
    Between(BetweenExpr),
    SubqueryOp(SubqueryOpExpr),

    Case(CaseExpr),

    Typecast(TypecastExpr),
    TypedLiteral(TypedLiteralExpr),
    IntervalLiteral(IntervalLiteralExpr),
    NamedCast(NamedCastExpr),

    Extract(ExtractExpr),
    Overlay(OverlayExpr),
    Position(PositionExpr),
    Substring(SubstringExpr),
    Trim(TrimExpr),

    XmlElement(XmlElement),
    XmlExists(XmlExists),
    XmlForest(XmlForest),
    XmlParse(XmlParse),
    XmlPi(XmlPi),
    XmlRoot(XmlRoot),
    XmlSerialize(XmlSerialize),

    Collate(CollateExpr),
    AtTimeZone(AtTimeZoneExpr),

    Func(FuncExpr),
    /// Keyword-spelled function with no parentheses (`current_timestamp`)
    BareFunction(String),
    /// The `default` placeholder inside VALUES rows
    Default,

    Row(Row),
    /// Bracketed array literal: `[a, b, c]`
    Array(ArrayExpr),
    /// `array[a, b, c]`
    ArrayConstructor(ArrayExpr),

    /// `exists (select ...)`
    Exists(Box<SelectStmt>),
    /// `array (select ...)`
    ArraySubselect(Box<SelectStmt>),
    /// Parenthesized subquery in expression position
    Select(Box<SelectStmt>),

    Relation(RelationExpr),
    Join(Box<JoinExpr>),
}

/// Ordered, non-empty sequence of identifier parts joined by `.`
#[derive(Debug, Clone, PartialEq)]
pub struct QualifiedName(pub Vec<String>);

impl QualifiedName {
    pub fn single(part: impl Into<String>) -> Self {
        QualifiedName(vec![part.into()])
    }
}

/// Base identifier plus optional indirection suffix chain
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRef {
    pub name: String,
    pub indirection: Option<Indirection>,
}

/// Indirection elements applied left to right
#[derive(Debug, Clone, PartialEq)]
pub struct Indirection(pub Vec<IndirectionEl>);

/// A single field access or subscript
#[derive(Debug, Clone, PartialEq)]
pub enum IndirectionEl {
    /// `.name`
    Field(String),
    /// `[lower]` or `[lower:upper]`
    Subscript {
        lower: Box<Expr>,
        upper: Option<Box<Expr>>,
    },
}

/// AND/OR connective, layout-distinct from generic binary operators
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoolOp {
    And,
    Or,
}

/// Boolean connective expression; chains render flat, one term per line
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanExpr {
    pub left: Box<Expr>,
    pub op: BoolOp,
    pub right: Box<Expr>,
}

/// Generic binary operator; the operator may be a qualified name
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub op: QualifiedName,
    pub right: Box<Expr>,
}

/// Prefix operator, rendered with no space before the operand
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub op: QualifiedName,
    pub expr: Box<Expr>,
}

/// Postfix operator
#[derive(Debug, Clone, PartialEq)]
pub struct PostfixExpr {
    pub expr: Box<Expr>,
    pub op: QualifiedName,
}

/// Text pattern operators
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextOp {
    Like,
    ILike,
    SimilarTo,
}

/// LIKE/ILIKE/SIMILAR TO with optional ESCAPE
#[derive(Debug, Clone, PartialEq)]
pub struct TextMatchExpr {
    pub left: Box<Expr>,
    pub not: bool,
    pub op: TextOp,
    pub right: Box<Expr>,
    pub escape: Option<Box<Expr>>,
}

/// Prefix NOT
#[derive(Debug, Clone, PartialEq)]
pub struct NotExpr(pub Box<Expr>);

/// IS-test operands
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IsTest {
    Null,
    True,
    False,
    Unknown,
    Document,
}

/// `expr is [not] <test>`
#[derive(Debug, Clone, PartialEq)]
pub struct IsExpr {
    pub expr: Box<Expr>,
    pub not: bool,
    pub test: IsTest,
}

/// `expr is [not] of (type, ...)`
#[derive(Debug, Clone, PartialEq)]
pub struct IsOfExpr {
    pub expr: Box<Expr>,
    pub not: bool,
    pub types: Vec<TypeName>,
}

/// `value [not] in <set>`; the set is a row list or a subquery
#[derive(Debug, Clone, PartialEq)]
pub struct InExpr {
    pub value: Box<Expr>,
    pub not: bool,
    pub set: Box<Expr>,
}

/// `expr [not] between [symmetric] low and high`
#[derive(Debug, Clone, PartialEq)]
pub struct BetweenExpr {
    pub expr: Box<Expr>,
    pub not: bool,
    pub symmetric: bool,
    pub low: Box<Expr>,
    pub high: Box<Expr>,
}

/// ANY/ALL/SOME
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SubqueryQuantifier {
    Any,
    All,
    Some,
}

/// Operator of a subquery comparison, possibly in `operator(name)` form
#[derive(Debug, Clone, PartialEq)]
pub struct SubqueryOp {
    pub operator_syntax: bool,
    pub name: QualifiedName,
}

/// `value <op> any|all|some (select ...)`
#[derive(Debug, Clone, PartialEq)]
pub struct SubqueryOpExpr {
    pub value: Box<Expr>,
    pub op: SubqueryOp,
    pub quantifier: SubqueryQuantifier,
    pub query: Box<Expr>,
}

/// One WHEN/THEN arm of a CASE expression
#[derive(Debug, Clone, PartialEq)]
pub struct WhenClause {
    pub condition: Expr,
    pub result: Expr,
}

/// CASE with optional subject, ordered non-empty arms, optional ELSE
#[derive(Debug, Clone, PartialEq)]
pub struct CaseExpr {
    pub subject: Option<Box<Expr>>,
    pub when_clauses: Vec<WhenClause>,
    pub else_clause: Option<Box<Expr>>,
}

/// Type reference shared by all cast variants
#[derive(Debug, Clone, PartialEq)]
pub struct TypeName {
    pub name: QualifiedName,
    pub setof: bool,
    /// The `array` keyword form (`int array`)
    pub array_word: bool,
    /// Fixed array bounds; a `None` bound renders an empty `[]`
    pub array_bounds: Vec<Option<String>>,
    /// Type modifier arguments (`numeric(10, 2)`)
    pub modifiers: Vec<Expr>,
    pub with_time_zone: bool,
    pub char_set: Option<String>,
    pub interval: Option<IntervalQualifier>,
}

impl TypeName {
    /// Plain type carrying only a name
    pub fn plain(name: QualifiedName) -> Self {
        TypeName {
            name,
            setof: false,
            array_word: false,
            array_bounds: Vec::new(),
            modifiers: Vec::new(),
            with_time_zone: false,
            char_set: None,
            interval: None,
        }
    }
}

/// Interval unit keywords
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IntervalUnit {
    Year,
    Month,
    Day,
    Hour,
    Minute,
}

/// `second` with optional precision
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalSecond {
    pub precision: Option<String>,
}

/// Interval qualifier: single unit, unit range, or range ending in SECOND
#[derive(Debug, Clone, PartialEq)]
pub enum IntervalQualifier {
    Unit(IntervalUnit),
    Range(IntervalUnit, IntervalUnit),
    Second(IntervalSecond),
    RangeToSecond(IntervalUnit, IntervalSecond),
}

/// `expr::type`
#[derive(Debug, Clone, PartialEq)]
pub struct TypecastExpr {
    pub expr: Box<Expr>,
    pub type_name: TypeName,
}

/// Constructor-style cast: `type 'literal'`
#[derive(Debug, Clone, PartialEq)]
pub struct TypedLiteralExpr {
    pub type_name: TypeName,
    pub value: Box<Expr>,
}

/// `interval(p) 'value' qualifier`
///
/// The precision renders in parentheses directly after the keyword,
/// before the value.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalLiteralExpr {
    pub precision: Option<String>,
    pub value: Box<Expr>,
    pub qualifier: Option<IntervalQualifier>,
}

/// Spelling of a named cast
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CastName {
    Cast,
    Treat,
}

/// `cast(expr as type)` / `treat(expr as type)`
#[derive(Debug, Clone, PartialEq)]
pub struct NamedCastExpr {
    pub name: CastName,
    pub expr: Box<Expr>,
    pub type_name: TypeName,
}

/// `extract(field from source)`
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractExpr {
    pub field: Box<Expr>,
    pub source: Box<Expr>,
}

/// `overlay(dest placing new from start [for length])`
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayExpr {
    pub dest: Box<Expr>,
    pub placing: Box<Expr>,
    pub from: Box<Expr>,
    pub for_length: Option<Box<Expr>>,
}

/// `position(needle in haystack)`
#[derive(Debug, Clone, PartialEq)]
pub struct PositionExpr {
    pub needle: Box<Expr>,
    pub haystack: Box<Expr>,
}

/// `substring(source from start [for length])`
#[derive(Debug, Clone, PartialEq)]
pub struct SubstringExpr {
    pub source: Box<Expr>,
    pub from: Box<Expr>,
    pub for_length: Option<Box<Expr>>,
}

/// TRIM direction keywords
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrimDirection {
    Both,
    Leading,
    Trailing,
}

/// `trim([direction] [head] [from] tail, ...)`
#[derive(Debug, Clone, PartialEq)]
pub struct TrimExpr {
    pub direction: Option<TrimDirection>,
    pub head: Option<Box<Expr>>,
    pub from: bool,
    pub tail: Vec<Expr>,
}

/// Attribute element shared by XMLELEMENT and XMLFOREST
#[derive(Debug, Clone, PartialEq)]
pub struct XmlAttributeEl {
    pub value: Expr,
    pub name: Option<String>,
}

/// `xmlelement(name n [, xmlattributes(...)] [, body...])`
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Option<Vec<XmlAttributeEl>>,
    pub body: Vec<Expr>,
}

/// The PASSING argument of XMLEXISTS
#[derive(Debug, Clone, PartialEq)]
pub struct XmlExistsArgument {
    pub left_by_ref: bool,
    pub arg: Box<Expr>,
    pub right_by_ref: bool,
}

/// `xmlexists(path passing ...)`
#[derive(Debug, Clone, PartialEq)]
pub struct XmlExists {
    pub path: Box<Expr>,
    pub passing: XmlExistsArgument,
}

/// `xmlforest(value [as name], ...)`
#[derive(Debug, Clone, PartialEq)]
pub struct XmlForest(pub Vec<XmlAttributeEl>);

/// DOCUMENT/CONTENT selector shared by XMLPARSE and XMLSERIALIZE
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum XmlContentType {
    Document,
    Content,
}

/// Whitespace option of XMLPARSE
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum XmlWhitespace {
    Preserve,
    Strip,
}

/// `xmlparse(document|content expr [whitespace option])`
#[derive(Debug, Clone, PartialEq)]
pub struct XmlParse {
    pub content_type: XmlContentType,
    pub content: Box<Expr>,
    pub whitespace: Option<XmlWhitespace>,
}

/// `xmlpi(name target [, content])`
#[derive(Debug, Clone, PartialEq)]
pub struct XmlPi {
    pub name: String,
    pub content: Option<Box<Expr>>,
}

/// VERSION part of XMLROOT; `None` renders `no value`
#[derive(Debug, Clone, PartialEq)]
pub struct XmlRootVersion {
    pub expr: Option<Box<Expr>>,
}

/// STANDALONE option of XMLROOT
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum XmlStandalone {
    Yes,
    No,
    NoValue,
}

/// `xmlroot(xml, version ... [, standalone ...])`
#[derive(Debug, Clone, PartialEq)]
pub struct XmlRoot {
    pub xml: Box<Expr>,
    pub version: XmlRootVersion,
    pub standalone: Option<XmlStandalone>,
}

/// `xmlserialize(document|content expr as type)`
#[derive(Debug, Clone, PartialEq)]
pub struct XmlSerialize {
    pub content_type: XmlContentType,
    pub content: Box<Expr>,
    pub type_name: TypeName,
}

/// `expr collate collation`
#[derive(Debug, Clone, PartialEq)]
pub struct CollateExpr {
    pub expr: Box<Expr>,
    pub collation: QualifiedName,
}

/// `expr at time zone tz`
#[derive(Debug, Clone, PartialEq)]
pub struct AtTimeZoneExpr {
    pub expr: Box<Expr>,
    pub time_zone: Box<Expr>,
}

/// `expr as alias`; always rendered with the explicit `as`
#[derive(Debug, Clone, PartialEq)]
pub struct AliasedExpr {
    pub expr: Box<Expr>,
    pub alias: String,
}

/// Parenthesized expression with optional trailing indirection
#[derive(Debug, Clone, PartialEq)]
pub struct ParenExpr {
    pub expr: Box<Expr>,
    pub indirection: Option<Indirection>,
}

/// Spelling of a named function argument
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NamedArgOp {
    /// `:=`
    ColonEquals,
    /// `=>`
    FatArrow,
}

/// Name part of a named function argument
#[derive(Debug, Clone, PartialEq)]
pub struct ArgName {
    pub name: String,
    pub op: NamedArgOp,
}

/// A single function argument, optionally named
#[derive(Debug, Clone, PartialEq)]
pub struct FuncArg {
    pub name: Option<ArgName>,
    pub expr: Expr,
}

/// The parenthesized core of a generic function call
///
/// `star` and `args` are mutually exclusive: when `star` is set the
/// argument list is never rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncApplication {
    pub name: QualifiedName,
    pub distinct: bool,
    pub star: bool,
    pub args: Vec<FuncArg>,
    pub variadic_arg: Option<Box<FuncArg>>,
    pub order_by: Option<OrderClause>,
}

/// `within group (order by ...)`
#[derive(Debug, Clone, PartialEq)]
pub struct WithinGroupClause(pub OrderClause);

/// `filter (where expr)`
#[derive(Debug, Clone, PartialEq)]
pub struct FilterClause(pub Box<Expr>);

/// `over` either names a window or carries an inline specification
#[derive(Debug, Clone, PartialEq)]
pub enum OverClause {
    WindowName(String),
    Specification(WindowSpecification),
}

/// Generic function application with its optional modifier clauses
#[derive(Debug, Clone, PartialEq)]
pub struct FuncExpr {
    pub application: FuncApplication,
    pub within_group: Option<WithinGroupClause>,
    pub filter: Option<FilterClause>,
    pub over: Option<OverClause>,
}

/// `[row] (a, b, ...)`
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub row_word: bool,
    pub exprs: Vec<Expr>,
}

/// Bracketed expression list
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayExpr(pub Vec<Expr>);

/// Window specification, always rendered inline within its parentheses
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSpecification {
    pub base_name: Option<String>,
    pub partition: Option<Vec<Expr>>,
    pub order_by: Option<OrderClause>,
    pub frame: Option<FrameClause>,
}

/// Frame modes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameMode {
    Range,
    Rows,
    Groups,
}

/// Offset direction of a frame bound
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundDirection {
    Preceding,
    Following,
}

/// A single frame bound
#[derive(Debug, Clone, PartialEq)]
pub enum FrameBound {
    CurrentRow,
    Unbounded(BoundDirection),
    Offset(Box<Expr>, BoundDirection),
}

/// Frame clause: mode plus one bound or a BETWEEN bound pair
#[derive(Debug, Clone, PartialEq)]
pub struct FrameClause {
    pub mode: FrameMode,
    pub start: FrameBound,
    pub end: Option<FrameBound>,
}

/// Named window definition in a WINDOW clause
#[derive(Debug, Clone, PartialEq)]
pub struct WindowDefinition {
    pub name: String,
    pub specification: WindowSpecification,
}

/// WINDOW clause for named windows
#[derive(Debug, Clone, PartialEq)]
pub struct WindowClause(pub Vec<WindowDefinition>);

/// Temporary-table options of INTO
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TempOption {
    Temporary,
    Temp,
    Unlogged,
}

/// `into [option] [table] target`
#[derive(Debug, Clone, PartialEq)]
pub struct IntoClause {
    pub options: Option<TempOption>,
    pub table_word: bool,
    pub target: QualifiedName,
}

/// FROM clause wrapping the join tree
#[derive(Debug, Clone, PartialEq)]
pub struct FromClause(pub Expr);

/// WHERE clause
#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause(pub Expr);

/// GROUP BY clause
#[derive(Debug, Clone, PartialEq)]
pub struct GroupByClause(pub Vec<Expr>);

/// HAVING clause
#[derive(Debug, Clone, PartialEq)]
pub struct HavingClause(pub Expr);

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// NULLS ordering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NullsOrder {
    First,
    Last,
}

/// A single sort key
#[derive(Debug, Clone, PartialEq)]
pub struct OrderExpr {
    pub expr: Expr,
    pub direction: Option<SortDirection>,
    pub using: Option<QualifiedName>,
    pub nulls: Option<NullsOrder>,
}

/// ORDER BY clause
#[derive(Debug, Clone, PartialEq)]
pub struct OrderClause(pub Vec<OrderExpr>);

/// LIMIT/OFFSET clause; either part may be absent
#[derive(Debug, Clone, PartialEq)]
pub struct LimitClause {
    pub limit: Option<Expr>,
    pub offset: Option<Expr>,
}

/// Lock strengths
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LockStrength {
    Update,
    NoKeyUpdate,
    Share,
    KeyShare,
}

/// Wait policies
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WaitPolicy {
    Nowait,
    SkipLocked,
}

/// One `for <strength> [of rels] [policy]` item
#[derive(Debug, Clone, PartialEq)]
pub struct LockingItem {
    pub strength: LockStrength,
    pub relations: Vec<QualifiedName>,
    pub wait_policy: Option<WaitPolicy>,
}

/// Locking clause: ordered list of locking items
#[derive(Debug, Clone, PartialEq)]
pub struct LockingClause(pub Vec<LockingItem>);

/// Join kinds, including the bare-comma cross join form
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JoinKind {
    Comma,
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

/// Binary join-tree node; chained joins accumulate left-deep
#[derive(Debug, Clone, PartialEq)]
pub struct JoinExpr {
    pub left: Box<Expr>,
    pub kind: JoinKind,
    pub right: Box<Expr>,
    pub using: Vec<String>,
    pub on: Option<Box<Expr>>,
}

/// Relation reference: `[only] name [*]`
#[derive(Debug, Clone, PartialEq)]
pub struct RelationExpr {
    pub name: QualifiedName,
    pub only: bool,
    pub star: bool,
}

/// One parenthesized VALUES row
#[derive(Debug, Clone, PartialEq)]
pub struct ValuesRow(pub Vec<Expr>);

/// VALUES clause: ordered list of row tuples
#[derive(Debug, Clone, PartialEq)]
pub struct ValuesClause(pub Vec<ValuesRow>);

/// Set operations
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SetOp {
    Union,
    Intersect,
    Except,
}

/// The clause set of a canonical SELECT
///
/// `distinct` distinguishes three cases: `None` is no DISTINCT at all,
/// `Some(vec![])` is bare `select distinct`, and a non-empty list is
/// `select distinct on(...)`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectCore {
    pub distinct: Option<Vec<Expr>>,
    pub targets: Vec<Expr>,
    pub into_clause: Option<IntoClause>,
    pub from_clause: Option<FromClause>,
    pub where_clause: Option<WhereClause>,
    pub group_by: Option<GroupByClause>,
    pub having: Option<HavingClause>,
    pub window: Option<WindowClause>,
}

/// Body of a select statement
#[derive(Debug, Clone, PartialEq)]
pub enum SimpleSelect {
    /// `table name` shorthand
    Table(RelationExpr),
    Values(ValuesClause),
    /// UNION/INTERSECT/EXCEPT over two sub-selects
    SetOp {
        op: SetOp,
        all: bool,
        left: Box<SelectStmt>,
        right: Box<SelectStmt>,
    },
    Select(SelectCore),
}

/// A full select statement
#[derive(Debug, Clone, PartialEq)]
pub struct SelectStmt {
    pub body: SimpleSelect,
    pub order_by: Option<OrderClause>,
    pub limit: Option<LimitClause>,
    pub locking: Option<LockingClause>,
    /// Render wrapped in parentheses, newline after the close paren
    pub paren_wrapped: bool,
    /// Render a `;` terminator line
    pub semicolon: bool,
}

impl SelectStmt {
    /// Statement with no trailing clauses or wrapping flags
    pub fn new(body: SimpleSelect) -> Self {
        SelectStmt {
            body,
            order_by: None,
            limit: None,
            locking: None,
            paren_wrapped: false,
            semicolon: false,
        }
    }
}
