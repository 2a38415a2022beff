//! Rendering tests driven by hand-built ASTs
//!
//! These cover constructs and edge cases independent of the parser: the
//! star/argument exclusivity rule, the bare DISTINCT form, frame clause
//! inline-ness, and the XML builtins.

use sqlcanon::ast::*;
use sqlcanon::formatter::printer::Printer;
use sqlcanon::formatter::{format_ast, RenderTo};

fn print<T: RenderTo>(node: &T) -> String {
    let mut printer = Printer::new();
    node.render_to(&mut printer);
    printer.finish()
}

fn column(name: &str) -> Expr {
    Expr::ColumnRef(ColumnRef {
        name: name.to_string(),
        indirection: None,
    })
}

fn int(lexeme: &str) -> Expr {
    Expr::IntegerLiteral(lexeme.to_string())
}

mod determinism {
    use super::*;

    #[test]
    fn same_ast_renders_byte_identical() {
        let stmt = sqlcanon::parser::parse(
            "select a, count(*) from t join u on a = b where a > 1 group by a order by a",
        )
        .unwrap();
        assert_eq!(format_ast(&stmt), format_ast(&stmt));
    }
}

mod func_application {
    use super::*;

    fn application(star: bool, args: Vec<FuncArg>) -> FuncApplication {
        FuncApplication {
            name: QualifiedName::single("count"),
            distinct: false,
            star,
            args,
            variadic_arg: None,
            order_by: None,
        }
    }

    #[test]
    fn star_suppresses_argument_list() {
        // A structurally present argument list must not render when the
        // star flag is set
        let node = application(
            true,
            vec![FuncArg {
                name: None,
                expr: column("x"),
            }],
        );
        assert_eq!(print(&node), "count(*)");
    }

    #[test]
    fn argument_list_renders_without_star() {
        let node = application(
            false,
            vec![
                FuncArg {
                    name: None,
                    expr: column("x"),
                },
                FuncArg {
                    name: None,
                    expr: column("y"),
                },
            ],
        );
        assert_eq!(print(&node), "count(x, y)");
    }

    #[test]
    fn variadic_after_regular_args() {
        let mut node = application(
            false,
            vec![FuncArg {
                name: None,
                expr: column("x"),
            }],
        );
        node.variadic_arg = Some(Box::new(FuncArg {
            name: None,
            expr: column("rest"),
        }));
        assert_eq!(print(&node), "count(x, variadic rest)");
    }
}

mod distinct_forms {
    use super::*;

    #[test]
    fn empty_distinct_list_renders_bare_keyword() {
        let core = SelectCore {
            distinct: Some(vec![]),
            targets: vec![column("a")],
            ..SelectCore::default()
        };
        let stmt = SelectStmt::new(SimpleSelect::Select(core));
        assert_eq!(format_ast(&stmt), "select distinct\n  a\n");
    }

    #[test]
    fn distinct_on_renders_list() {
        let core = SelectCore {
            distinct: Some(vec![column("a"), column("b")]),
            targets: vec![column("c")],
            ..SelectCore::default()
        };
        let stmt = SelectStmt::new(SimpleSelect::Select(core));
        assert_eq!(format_ast(&stmt), "select distinct on(a, b)\n  c\n");
    }

    #[test]
    fn empty_target_list_renders_keyword_only() {
        // The parser guarantees at least one target; the renderer must
        // not invent anything when handed none anyway
        let core = SelectCore {
            targets: vec![],
            ..SelectCore::default()
        };
        let stmt = SelectStmt::new(SimpleSelect::Select(core));
        assert_eq!(format_ast(&stmt), "select\n");
    }
}

mod window_frames {
    use super::*;

    #[test]
    fn single_bound_frame_is_inline() {
        let frame = FrameClause {
            mode: FrameMode::Rows,
            start: FrameBound::Unbounded(BoundDirection::Preceding),
            end: None,
        };
        let text = print(&frame);
        assert_eq!(text, "rows unbounded preceding");
        assert!(!text.contains('\n'));
    }

    #[test]
    fn between_frame_is_inline() {
        let frame = FrameClause {
            mode: FrameMode::Range,
            start: FrameBound::Offset(Box::new(int("1")), BoundDirection::Preceding),
            end: Some(FrameBound::CurrentRow),
        };
        let text = print(&frame);
        assert_eq!(text, "range between 1 preceding and current row");
        assert!(!text.contains('\n'));
    }

    #[test]
    fn groups_mode_keyword() {
        let frame = FrameClause {
            mode: FrameMode::Groups,
            start: FrameBound::CurrentRow,
            end: None,
        };
        assert_eq!(print(&frame), "groups current row");
    }

    #[test]
    fn full_specification_never_breaks_lines() {
        let spec = WindowSpecification {
            base_name: Some("w".to_string()),
            partition: Some(vec![column("a"), column("b")]),
            order_by: Some(OrderClause(vec![OrderExpr {
                expr: column("c"),
                direction: Some(SortDirection::Desc),
                using: None,
                nulls: Some(NullsOrder::First),
            }])),
            frame: Some(FrameClause {
                mode: FrameMode::Rows,
                start: FrameBound::CurrentRow,
                end: None,
            }),
        };
        let text = print(&spec);
        assert_eq!(
            text,
            "(w partition by a, b order by c desc nulls first rows current row)"
        );
        assert!(!text.contains('\n'));
    }

    #[test]
    fn name_only_specification_has_no_dangling_space() {
        let spec = WindowSpecification {
            base_name: Some("w".to_string()),
            partition: None,
            order_by: None,
            frame: None,
        };
        assert_eq!(print(&spec), "(w)");
    }
}

mod type_names {
    use super::*;

    #[test]
    fn full_type_reference() {
        let type_name = TypeName {
            name: QualifiedName::single("numeric"),
            setof: true,
            array_word: false,
            array_bounds: vec![Some("3".to_string()), None],
            modifiers: vec![int("10"), int("2")],
            with_time_zone: false,
            char_set: None,
            interval: None,
        };
        assert_eq!(print(&type_name), "setof numeric[3][](10, 2)");
    }

    #[test]
    fn timestamp_with_time_zone() {
        let mut type_name = TypeName::plain(QualifiedName::single("timestamp"));
        type_name.with_time_zone = true;
        assert_eq!(print(&type_name), "timestamp with time zone");
    }

    #[test]
    fn character_set_suffix() {
        let mut type_name = TypeName::plain(QualifiedName::single("char"));
        type_name.char_set = Some("utf8".to_string());
        assert_eq!(print(&type_name), "char character set utf8");
    }

    #[test]
    fn interval_qualifier_second_precision() {
        let mut type_name = TypeName::plain(QualifiedName::single("interval"));
        type_name.interval = Some(IntervalQualifier::RangeToSecond(
            IntervalUnit::Day,
            IntervalSecond {
                precision: Some("3".to_string()),
            },
        ));
        assert_eq!(print(&type_name), "interval day to second(3)");
    }
}

mod interval_literals {
    use super::*;

    #[test]
    fn precision_renders_before_the_value() {
        let node = IntervalLiteralExpr {
            precision: Some("2".to_string()),
            value: Box::new(Expr::StringLiteral("'foo'".to_string())),
            qualifier: Some(IntervalQualifier::Range(
                IntervalUnit::Year,
                IntervalUnit::Month,
            )),
        };
        assert_eq!(print(&node), "interval(2) 'foo' year to month");
    }

    #[test]
    fn bare_interval_literal() {
        let node = IntervalLiteralExpr {
            precision: None,
            value: Box::new(Expr::StringLiteral("'1 day'".to_string())),
            qualifier: None,
        };
        assert_eq!(print(&node), "interval '1 day'");
    }
}

mod xml_builtins {
    use super::*;

    fn attr(value: &str, name: Option<&str>) -> XmlAttributeEl {
        XmlAttributeEl {
            value: column(value),
            name: name.map(|n| n.to_string()),
        }
    }

    #[test]
    fn xml_element_with_attributes_and_body() {
        let node = XmlElement {
            name: "item".to_string(),
            attributes: Some(vec![attr("a", Some("x")), attr("b", None)]),
            body: vec![column("c")],
        };
        assert_eq!(
            print(&node),
            "xmlelement(name item, xmlattributes(a as x, b), c)"
        );
    }

    #[test]
    fn xml_element_without_attributes() {
        let node = XmlElement {
            name: "item".to_string(),
            attributes: None,
            body: vec![],
        };
        assert_eq!(print(&node), "xmlelement(name item)");
    }

    #[test]
    fn xml_forest() {
        let node = XmlForest(vec![attr("a", Some("x")), attr("b", None)]);
        assert_eq!(print(&node), "xmlforest(a as x, b)");
    }

    #[test]
    fn xml_exists_with_by_ref() {
        let node = XmlExists {
            path: Box::new(Expr::StringLiteral("'//a'".to_string())),
            passing: XmlExistsArgument {
                left_by_ref: true,
                arg: Box::new(column("doc")),
                right_by_ref: true,
            },
        };
        assert_eq!(
            print(&node),
            "xmlexists('//a' passing by ref doc by ref)"
        );
    }

    #[test]
    fn xml_parse_with_whitespace_option() {
        let node = XmlParse {
            content_type: XmlContentType::Document,
            content: Box::new(column("x")),
            whitespace: Some(XmlWhitespace::Preserve),
        };
        assert_eq!(print(&node), "xmlparse(document x preserve whitespace)");
    }

    #[test]
    fn xml_pi_without_content() {
        let node = XmlPi {
            name: "php".to_string(),
            content: None,
        };
        assert_eq!(print(&node), "xmlpi(name php)");
    }

    #[test]
    fn xml_root_version_no_value() {
        let node = XmlRoot {
            xml: Box::new(column("x")),
            version: XmlRootVersion { expr: None },
            standalone: None,
        };
        assert_eq!(print(&node), "xmlroot(x, version no value)");
    }

    #[test]
    fn xml_root_standalone_is_omitted_not_defaulted() {
        let with = XmlRoot {
            xml: Box::new(column("x")),
            version: XmlRootVersion {
                expr: Some(Box::new(Expr::StringLiteral("'1.0'".to_string()))),
            },
            standalone: Some(XmlStandalone::Yes),
        };
        assert_eq!(print(&with), "xmlroot(x, version '1.0', standalone yes)");

        let without = XmlRoot {
            standalone: None,
            ..with
        };
        assert_eq!(print(&without), "xmlroot(x, version '1.0')");
    }

    #[test]
    fn xml_serialize() {
        let node = XmlSerialize {
            content_type: XmlContentType::Content,
            content: Box::new(column("x")),
            type_name: TypeName::plain(QualifiedName::single("text")),
        };
        assert_eq!(print(&node), "xmlserialize(content x as text)");
    }
}

mod operators {
    use super::*;

    #[test]
    fn unary_operator_has_no_space() {
        let node = UnaryExpr {
            op: QualifiedName::single("-"),
            expr: Box::new(int("1")),
        };
        assert_eq!(print(&node), "-1");
    }

    #[test]
    fn postfix_operator_is_space_separated() {
        let node = PostfixExpr {
            expr: Box::new(column("n")),
            op: QualifiedName::single("!"),
        };
        assert_eq!(print(&node), "n !");
    }

    #[test]
    fn qualified_operator_name() {
        let node = BinaryExpr {
            left: Box::new(column("a")),
            op: QualifiedName(vec!["pg_catalog".to_string(), "+".to_string()]),
            right: Box::new(column("b")),
        };
        assert_eq!(print(&node), "a pg_catalog.+ b");
    }

    #[test]
    fn subquery_operator_spelling() {
        let node = SubqueryOp {
            operator_syntax: true,
            name: QualifiedName::single("="),
        };
        assert_eq!(print(&node), "operator(=)");
    }
}

mod misc_nodes {
    use super::*;

    #[test]
    fn row_with_and_without_keyword() {
        let with = Row {
            row_word: true,
            exprs: vec![int("1"), int("2")],
        };
        assert_eq!(print(&with), "row (1, 2)");

        let without = Row {
            row_word: false,
            exprs: vec![int("1"), int("2")],
        };
        assert_eq!(print(&without), "(1, 2)");
    }

    #[test]
    fn array_constructor() {
        let node = Expr::ArrayConstructor(ArrayExpr(vec![int("1"), int("2")]));
        assert_eq!(print(&node), "array[1, 2]");
    }

    #[test]
    fn relation_with_only_and_star() {
        let node = RelationExpr {
            name: QualifiedName(vec!["public".to_string(), "t".to_string()]),
            only: true,
            star: true,
        };
        assert_eq!(print(&node), "only public.t *");
    }

    #[test]
    fn default_keyword() {
        assert_eq!(print(&Expr::Default), "default");
    }

    #[test]
    fn locking_item_full_form() {
        let node = LockingItem {
            strength: LockStrength::NoKeyUpdate,
            relations: vec![QualifiedName::single("t"), QualifiedName::single("u")],
            wait_policy: Some(WaitPolicy::SkipLocked),
        };
        assert_eq!(print(&node), "for no key update of t, u skip locked\n");
    }
}
