//! Formatting tests for sqlcanon
//!
//! End-to-end checks of the layout policy: clause keyword lines with
//! indented bodies, comma-terminated list lines, flat AND/OR chains,
//! inline function-shaped constructs, and the statement-level wrapping
//! rules.

use pretty_assertions::assert_eq;
use sqlcanon::format;

/// Helper to format and compare
fn assert_formats_to(input: &str, expected: &str) {
    let result = format(input).expect("format should succeed");
    assert_eq!(result.trim_end(), expected.trim_end());
}

/// Helper to verify formatting is idempotent
fn assert_idempotent(input: &str) {
    let formatted = format(input).expect("first format should succeed");
    let reformatted = format(&formatted).expect("second format should succeed");
    assert_eq!(formatted, reformatted, "formatting should be idempotent");
}

mod statement_body {
    use super::*;

    #[test]
    fn target_list_one_expression_per_line() {
        assert_formats_to(
            "SELECT a, b, c FROM t",
            "select\n  a,\n  b,\n  c\nfrom\n  t",
        );
    }

    #[test]
    fn single_target_still_gets_its_own_line() {
        assert_formats_to("SELECT id FROM users", "select\n  id\nfrom\n  users");
    }

    #[test]
    fn keywords_are_lowercased_identifiers_kept_verbatim() {
        assert_formats_to(
            "SELECT UserId FROM Accounts",
            "select\n  UserId\nfrom\n  Accounts",
        );
    }

    #[test]
    fn clause_omission() {
        let result = format("select a from t").unwrap();
        assert!(!result.contains("where"));
        assert!(!result.contains("group by"));
        assert!(!result.contains("order by"));
        assert!(!result.contains("limit"));
    }

    #[test]
    fn adding_where_adds_only_where() {
        assert_formats_to(
            "select a from t where a > 1",
            "select\n  a\nfrom\n  t\nwhere\n  a > 1",
        );
    }

    #[test]
    fn group_by_and_having_shape() {
        assert_formats_to(
            "select a from t group by a, b having count(*) > 1",
            "select\n  a\nfrom\n  t\ngroup by\n  a,\n  b\nhaving\n  count(*) > 1",
        );
    }

    #[test]
    fn order_by_with_options() {
        assert_formats_to(
            "select a from t order by a desc nulls last, b using <",
            "select\n  a\nfrom\n  t\norder by\n  a desc nulls last,\n  b using <",
        );
    }

    #[test]
    fn limit_and_offset_lines() {
        assert_formats_to(
            "select a from t limit 10 offset 5",
            "select\n  a\nfrom\n  t\nlimit 10\noffset 5",
        );
    }

    #[test]
    fn into_clause_line() {
        assert_formats_to(
            "select a into temp table t2 from t",
            "select\n  a\ninto temp table t2\nfrom\n  t",
        );
    }

    #[test]
    fn locking_clause_lines() {
        assert_formats_to(
            "select a from t for update of t nowait for share",
            "select\n  a\nfrom\n  t\nfor update of t nowait\nfor share",
        );
    }

    #[test]
    fn named_window_clause_line() {
        assert_formats_to(
            "select a from t window w as (partition by b)",
            "select\n  a\nfrom\n  t\nwindow\n  w as (partition by b)",
        );
    }

    #[test]
    fn aliases_normalize_to_explicit_as() {
        assert_formats_to("select a x from t", "select\n  a as x\nfrom\n  t");
    }

    #[test]
    fn semicolon_gets_its_own_line() {
        assert_formats_to("select 1;", "select\n  1\n;");
    }

    #[test]
    fn multiple_statements_render_in_sequence() {
        assert_formats_to(
            "select 1; select 2;",
            "select\n  1\n;\nselect\n  2\n;",
        );
    }
}

mod boolean_chains {
    use super::*;

    #[test]
    fn and_chain_renders_flat() {
        // Three terms, three lines, same indent, connective leads the
        // continuation lines
        assert_formats_to(
            "SELECT 1 WHERE a AND b AND c",
            "select\n  1\nwhere\n  a\n  and b\n  and c",
        );
    }

    #[test]
    fn mixed_connectives_stay_flush() {
        assert_formats_to(
            "select 1 where a and b or c",
            "select\n  1\nwhere\n  a\n  and b\n  or c",
        );
    }

    #[test]
    fn join_predicates_with_connectives_break_lines() {
        assert_formats_to(
            "select * from a join b on a.x = b.x and a.y = b.y",
            "select\n  *\nfrom\n  a\n  join b on a.x = b.x\n  and a.y = b.y",
        );
    }

    #[test]
    fn parenthesized_condition_stays_grouped() {
        // The inner chain breaks inside the parentheses; the outer AND
        // still leads its own continuation line
        assert_formats_to(
            "select 1 where (a or b) and c",
            "select\n  1\nwhere\n  (a\n  or b)\n  and c",
        );
    }
}

mod joins {
    use super::*;

    #[test]
    fn comma_join_comma_binds_to_left_line() {
        assert_formats_to(
            "select * from a, b, c",
            "select\n  *\nfrom\n  a,\n  b,\n  c",
        );
    }

    #[test]
    fn keyword_join_with_on_inline() {
        assert_formats_to(
            "select * from a join b on a.id = b.id",
            "select\n  *\nfrom\n  a\n  join b on a.id = b.id",
        );
    }

    #[test]
    fn join_kinds_render_canonical_keywords() {
        assert_formats_to(
            "select * from a inner join b on x left outer join c on y",
            "select\n  *\nfrom\n  a\n  join b on x\n  left join c on y",
        );
    }

    #[test]
    fn using_list_inline() {
        assert_formats_to(
            "select * from a full join b using (id, ts)",
            "select\n  *\nfrom\n  a\n  full join b using(id, ts)",
        );
    }

    #[test]
    fn relation_modifiers() {
        assert_formats_to(
            "select * from only public.t *",
            "select\n  *\nfrom\n  only public.t *",
        );
    }
}

mod distinct_forms {
    use super::*;

    #[test]
    fn bare_distinct() {
        assert_formats_to("select distinct a from t", "select distinct\n  a\nfrom\n  t");
    }

    #[test]
    fn distinct_on_list() {
        assert_formats_to(
            "select distinct on (a, b) c from t",
            "select distinct on(a, b)\n  c\nfrom\n  t",
        );
    }
}

mod case_expressions {
    use super::*;

    #[test]
    fn case_shape() {
        assert_formats_to(
            "select case when a then 1 else 2 end from t",
            "select\n  case\n  when a then\n    1\n  else\n    2\n  end\nfrom\n  t",
        );
    }

    #[test]
    fn case_with_subject_and_multiple_whens() {
        assert_formats_to(
            "select case x when 1 then 'a' when 2 then 'b' end from t",
            "select\n  case x\n  when 1 then\n    'a'\n  when 2 then\n    'b'\n  end\nfrom\n  t",
        );
    }
}

mod inline_constructs {
    use super::*;

    #[test]
    fn builtin_functions_render_inline() {
        assert_formats_to(
            "select extract(year from d), position('a' in s), substring(s from 2 for 3) from t",
            "select\n  extract(year from d),\n  position('a' in s),\n  substring(s from 2 for 3)\nfrom\n  t",
        );
    }

    #[test]
    fn overlay_and_trim() {
        assert_formats_to(
            "select overlay(a placing b from 2 for 3), trim(both 'x' from s) from t",
            "select\n  overlay(a placing b from 2 for 3),\n  trim(both 'x' from s)\nfrom\n  t",
        );
    }

    #[test]
    fn trailing_for_is_omitted_when_absent() {
        assert_formats_to(
            "select substring(s from 2) from t",
            "select\n  substring(s from 2)\nfrom\n  t",
        );
    }

    #[test]
    fn cast_forms() {
        assert_formats_to(
            "select cast(x as numeric(10, 2)), x::int, date '2024-01-02' from t",
            "select\n  cast(x as numeric(10, 2)),\n  x::int,\n  date '2024-01-02'\nfrom\n  t",
        );
    }

    #[test]
    fn interval_literal_round_trip() {
        assert_formats_to(
            "select interval(2) 'foo' year to month",
            "select\n  interval(2) 'foo' year to month",
        );
        assert_idempotent("select interval(2) 'foo' year to month");
    }

    #[test]
    fn xml_family_inline() {
        assert_formats_to(
            "select xmlelement(name foo, xmlattributes(a as b), c) from t",
            "select\n  xmlelement(name foo, xmlattributes(a as b), c)\nfrom\n  t",
        );
        assert_formats_to(
            "select xmlparse(document x strip whitespace) from t",
            "select\n  xmlparse(document x strip whitespace)\nfrom\n  t",
        );
        assert_formats_to(
            "select xmlserialize(content x as text) from t",
            "select\n  xmlserialize(content x as text)\nfrom\n  t",
        );
    }

    #[test]
    fn window_specification_inline() {
        assert_formats_to(
            "select sum(x) over (partition by y order by z rows unbounded preceding) from t",
            "select\n  sum(x) over (partition by y order by z rows unbounded preceding)\nfrom\n  t",
        );
    }

    #[test]
    fn frame_between_inline() {
        assert_formats_to(
            "select sum(x) over (rows between 1 preceding and current row) from t",
            "select\n  sum(x) over (rows between 1 preceding and current row)\nfrom\n  t",
        );
    }

    #[test]
    fn filter_and_named_window_reference() {
        assert_formats_to(
            "select count(*) filter (where x > 0) over w from t window w as (order by y)",
            "select\n  count(*) filter (where x > 0) over w\nfrom\n  t\nwindow\n  w as (order by y)",
        );
    }
}

mod subqueries {
    use super::*;

    #[test]
    fn from_subquery_wraps_and_indents() {
        assert_formats_to(
            "select * from (select id from users) u where id > 1",
            "select\n  *\nfrom\n  (select\n    id\n  from\n    users\n  )\n  as u\nwhere\n  id > 1",
        );
    }

    #[test]
    fn exists_subquery() {
        assert_formats_to(
            "select exists (select 1 from t)",
            "select\n  exists(select\n    1\n  from\n    t\n  )",
        );
    }

    #[test]
    fn quantified_comparison() {
        assert_formats_to(
            "select 1 where x = any (select y from u)",
            "select\n  1\nwhere\n  x = any (select\n    y\n  from\n    u\n  )",
        );
    }

    #[test]
    fn array_subselect() {
        assert_formats_to(
            "select array(select x from t)",
            "select\n  array(select\n    x\n  from\n    t\n  )",
        );
    }
}

mod set_operations {
    use super::*;

    #[test]
    fn union_renders_flat() {
        assert_formats_to(
            "select 1 union all select 2",
            "select\n  1\nunion all\nselect\n  2",
        );
    }

    #[test]
    fn chained_set_operations_stay_flush() {
        assert_formats_to(
            "select 1 union select 2 intersect select 3",
            "select\n  1\nunion\nselect\n  2\nintersect\nselect\n  3",
        );
    }

    #[test]
    fn values_statement() {
        assert_formats_to(
            "values (1, 2), (3, 4)",
            "values\n  (1, 2),\n  (3, 4)",
        );
    }

    #[test]
    fn table_shorthand() {
        assert_formats_to("table users", "table users");
    }
}

mod determinism_and_idempotence {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn formatting_is_deterministic() {
        let input = "select a, b from t join u on a = b where a > 1 order by a";
        assert_eq!(format(input).unwrap(), format(input).unwrap());
    }

    #[test]
    fn representative_statements_are_idempotent() {
        let inputs = [
            "select a, b, c from t",
            "select distinct on (a) a from t",
            "select 1 where a and b and c",
            "select * from a join b on a.id = b.id left join c using (id)",
            "select case when a then 1 else 2 end from t",
            "select sum(x) over (partition by y rows between 1 preceding and current row) from t",
            "select exists (select 1 from t)",
            "select * from (select id from users) u",
            "select 1 union all select 2",
            "values (1, 2), (3, 4)",
            "table users",
            "select interval(2) 'foo' year to month",
            "select count(*) filter (where x > 0) from t group by a having count(*) > 1",
            "select a from t order by a desc nulls last limit 10 offset 5 for update nowait",
            "select xmlelement(name foo, xmlattributes(a as b), c) from t",
            "select trim(leading 'x' from s), overlay(a placing b from 2) from t",
            "select array_agg(x order by y) from t",
            "select percentile_cont(0.5) within group (order by x) from t",
            "select a.b[1:2], (c).d, t.* from t",
            "select 'it''s', b'0101', 1.5e10, -2 from t",
        ];
        for input in inputs {
            assert_idempotent(input);
        }
    }
}

mod expression_details {
    use super::*;

    #[test]
    fn predicates_render_inline() {
        assert_formats_to(
            "select 1 where x between 1 and 10",
            "select\n  1\nwhere\n  x between 1 and 10",
        );
        assert_formats_to(
            "select 1 where x not in (1, 2)",
            "select\n  1\nwhere\n  x not in (1, 2)",
        );
        assert_formats_to(
            "select 1 where a not like 'x%' escape '!'",
            "select\n  1\nwhere\n  a not like 'x%' escape '!'",
        );
        assert_formats_to(
            "select 1 where x is not null",
            "select\n  1\nwhere\n  x is not null",
        );
    }

    #[test]
    fn at_time_zone_and_collate() {
        assert_formats_to(
            "select ts at time zone 'utc', a collate \"C\" from t",
            "select\n  ts at time zone 'utc',\n  a collate \"C\"\nfrom\n  t",
        );
    }

    #[test]
    fn string_literals_are_verbatim() {
        assert_formats_to("select 'It''s HERE'", "select\n  'It''s HERE'");
    }

    #[test]
    fn numeric_lexemes_are_verbatim() {
        assert_formats_to("select 007, 1.50, 2E10", "select\n  007,\n  1.50,\n  2E10");
    }

    #[test]
    fn row_and_array_constructors() {
        assert_formats_to(
            "select row(1, 2), (3, 4), array[5, 6]",
            "select\n  row (1, 2),\n  (3, 4),\n  array[5, 6]",
        );
    }

    #[test]
    fn function_order_by_keeps_clause_shape() {
        assert_formats_to(
            "select array_agg(x order by y) from t",
            "select\n  array_agg(x order by\n    y\n  )\nfrom\n  t",
        );
    }

    #[test]
    fn within_group_keeps_clause_shape() {
        assert_formats_to(
            "select percentile_cont(0.5) within group (order by x) from t",
            "select\n  percentile_cont(0.5) within group (order by\n    x\n  )\nfrom\n  t",
        );
    }

    #[test]
    fn bare_functions_render_without_parens() {
        assert_formats_to(
            "select CURRENT_TIMESTAMP, session_user",
            "select\n  current_timestamp,\n  session_user",
        );
    }
}
