//! End-to-end INSERT rendering scenarios.

use planner::{
    error::QueryError,
    query::{
        ast::{
            common::TableRef,
            expr::{BinaryOp, BinaryOperator, Expr},
            subquery::RawQuery,
        },
        builder::{insert::InsertBuilder, select::SelectBuilder},
        columns,
        dialect::{Dialect, Generic, MySql, Postgres},
        ident, param, value,
    },
};
use model::core::value::Value;

fn users() -> TableRef {
    TableRef::new("users")
}

/// Every `$n` in `sql`, in textual order.
fn numbered_markers(sql: &str) -> Vec<usize> {
    let mut out = Vec::new();
    let bytes = sql.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'$' {
            let digits: String = sql[i + 1..]
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .collect();
            if !digits.is_empty() {
                out.push(digits.parse().unwrap());
                i += digits.len();
            }
        }
        i += 1;
    }
    out
}

#[test]
fn literal_rows_render_in_order() {
    let insert = InsertBuilder::with_rows(
        users(),
        Some(columns(["id", "name"])),
        vec![
            vec![value(1), value("Alice")],
            vec![value(2), value("Bob")],
        ],
    );

    let (sql, params) = insert.to_sql(&Generic).unwrap();
    assert_eq!(sql, "INSERT INTO users (id, name) VALUES (1, 'Alice'), (2, 'Bob')");
    assert!(params.is_empty());
}

#[test]
fn short_row_fails_with_row_index() {
    let insert = InsertBuilder::with_rows(
        users(),
        Some(columns(["id", "name"])),
        vec![vec![value(1)]],
    );

    match insert.to_sql(&Generic) {
        Err(QueryError::Syntax(msg)) => assert!(msg.contains("row number 0"), "{msg}"),
        other => panic!("expected a syntax error, got {other:?}"),
    }
}

#[test]
fn insert_from_select_without_columns() {
    let select = SelectBuilder::new()
        .select(vec![ident("id"), ident("name")])
        .from(TableRef::new("staging"), None)
        .build();

    let insert = InsertBuilder::with_query(users(), None, select);
    let (sql, _) = insert.to_sql(&Generic).unwrap();
    assert_eq!(sql, "INSERT INTO users SELECT id, name FROM staging");
}

#[test]
fn second_returning_clause_fails_render() {
    let insert = InsertBuilder::values(users(), [value(1), value("Alice")])
        .returning_all()
        .returning(["id"]);

    for dialect in [&Generic as &dyn Dialect, &Postgres, &MySql] {
        match insert.to_sql(dialect) {
            Err(QueryError::Syntax(msg)) => {
                assert!(msg.contains("Multiple returning clauses"), "{msg}")
            }
            other => panic!("expected a syntax error, got {other:?}"),
        }
    }
}

#[test]
fn missing_source_fails_render() {
    let insert = InsertBuilder::with_rows(users(), Some(columns(["id"])), vec![]);
    assert_eq!(
        insert.to_sql(&Postgres),
        Err(QueryError::Syntax(
            "Insert query doesn't have any values to insert.".into()
        ))
    );
}

#[test]
fn pairs_render_columns_and_values_side_by_side() {
    let insert = InsertBuilder::with_pairs(
        users(),
        [
            ("email", param("ann@example.com")),
            ("id", value(10)),
            ("name", param("Ann")),
        ],
    )
    .returning(["id"]);

    let (sql, params) = insert.to_sql(&Postgres).unwrap();
    assert_eq!(
        sql,
        r#"INSERT INTO "users" ("email", "id", "name") VALUES ($1, 10, $2) RETURNING "id""#
    );
    assert_eq!(
        params,
        vec![Value::from("ann@example.com"), Value::from("Ann")]
    );
}

#[test]
fn nested_select_placeholders_share_one_sequence() {
    let filter = Expr::BinaryOp(Box::new(BinaryOp {
        left: ident("status"),
        op: BinaryOperator::Eq,
        right: param("pending"),
    }));
    let select = SelectBuilder::new()
        .select(vec![ident("id"), value("imported"), param(7)])
        .from(TableRef::new("staging"), None)
        .where_clause(filter)
        .limit(param(100))
        .build();

    let insert = InsertBuilder::with_query(users(), Some(columns(["id", "source", "batch"])), select)
        .returning_all();

    let (sql, params) = insert.to_sql(&Postgres).unwrap();
    assert_eq!(
        sql,
        r#"INSERT INTO "users" ("id", "source", "batch") SELECT "id", 'imported', $1 FROM "staging" WHERE ("status" = $2) LIMIT $3 RETURNING *"#
    );
    assert_eq!(numbered_markers(&sql), vec![1, 2, 3]);
    assert_eq!(
        params,
        vec![Value::Int(7), Value::from("pending"), Value::Int(100)]
    );
}

#[test]
fn raw_subquery_numbering_is_rewritten_globally() {
    // Numbered independently, starting at $1 and referenced out of order.
    let raw = RawQuery::new("SELECT id, name FROM staging WHERE tenant = $2 AND kind = $1")
        .with_params(vec![Value::from("user"), Value::Int(42)])
        .with_fields(2);

    let insert = InsertBuilder::with_query(users(), Some(columns(["id", "name"])), raw);
    let (sql, params) = insert.to_sql(&Generic).unwrap();

    assert_eq!(
        sql,
        "INSERT INTO users (id, name) SELECT id, name FROM staging WHERE tenant = $1 AND kind = $2"
    );
    assert_eq!(params, vec![Value::Int(42), Value::from("user")]);
}

#[test]
fn placeholder_numbering_ignores_literal_values() {
    let rows = vec![
        vec![param(1), value("a"), param(true)],
        vec![value(2), param("b"), value(false)],
        vec![param(3), param("c"), param(Value::Null)],
    ];
    let insert = InsertBuilder::with_rows(users(), Some(columns(["id", "name", "ok"])), rows);

    let (sql, params) = insert.to_sql(&Postgres).unwrap();
    let markers = numbered_markers(&sql);
    assert_eq!(markers, (1..=params.len()).collect::<Vec<_>>());
    assert_eq!(params.len(), 6);

    let (sql, params) = insert.to_sql(&MySql).unwrap();
    assert_eq!(sql.matches('?').count(), params.len());
}

#[test]
fn each_render_starts_numbering_from_one() {
    let insert = InsertBuilder::values(users(), [param(1), param(2)]);

    let first = insert.to_sql(&Postgres).unwrap();
    let second = insert.to_sql(&Postgres).unwrap();
    assert_eq!(first, second);
    assert_eq!(numbered_markers(&first.0), vec![1, 2]);
}

#[test]
fn unsupported_literal_is_reported() {
    let insert = InsertBuilder::values(users(), [value(vec!["a".to_string()])]);
    assert!(matches!(
        insert.to_sql(&MySql),
        Err(QueryError::UnsupportedValue { .. })
    ));

    // Bound, the same value is left to the driver.
    let insert = InsertBuilder::values(users(), [param(vec!["a".to_string()])]);
    assert!(insert.to_sql(&MySql).is_ok());
}
