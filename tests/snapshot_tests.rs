//! Snapshot tests using insta
//!
//! Whole-statement renders pinned as inline snapshots.

use insta::assert_snapshot;
use sqlcanon::format;

fn formatted(input: &str) -> String {
    format(input).expect("format should succeed").trim_end().to_string()
}

#[test]
fn simple_select() {
    assert_snapshot!(formatted("SELECT id, name FROM users WHERE active = true"), @r"
    select
      id,
      name
    from
      users
    where
      active = true
    ");
}

#[test]
fn join_with_grouping() {
    assert_snapshot!(formatted(
        "select u.id, count(*) from users u join orders o on o.user_id = u.id group by u.id having count(*) > 1 order by u.id"
    ), @r"
    select
      u.id,
      count(*)
    from
      users as u
      join orders as o on o.user_id = u.id
    group by
      u.id
    having
      count(*) > 1
    order by
      u.id
    ");
}

#[test]
fn union_with_limit() {
    assert_snapshot!(formatted("select 1 union all select 2 limit 1"), @r"
    select
      1
    union all
    select
      2
    limit 1
    ");
}

#[test]
fn nested_subquery() {
    assert_snapshot!(formatted("select * from (select a from t where a in (1, 2)) s"), @r"
    select
      *
    from
      (select
        a
      from
        t
      where
        a in (1, 2)
      )
      as s
    ");
}

#[test]
fn case_in_target_list() {
    // CASE terminates its own line, so a trailing alias starts the next one
    assert_snapshot!(formatted("select case when a > 0 then 'pos' else 'neg' end as sign from t"), @r"
    select
      case
      when a > 0 then
        'pos'
      else
        'neg'
      end
      as sign
    from
      t
    ");
}
