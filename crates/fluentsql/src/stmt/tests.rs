//! Cross-builder tests for the stmt module.

use crate::params;
use crate::stmt::{
    Compile, Statement, StatementKind, delete, delete_from, insert, insert_into, quote_ident,
    select, select_from, update, update_table,
};
use crate::value::Value;

#[test]
fn test_select_columns_and_table() {
    let stmt = select().columns(["id", "name", "email"]).from("users");
    let compiled = stmt.compile();
    assert_eq!(compiled.sql, "SELECT id,name,email FROM users");
    assert!(compiled.params.is_empty());
}

#[test]
fn test_from_into_table_are_aliases() {
    let a = select().from("t");
    let b = select().into("t");
    let c = select().table("t");
    assert_eq!(a, b);
    assert_eq!(b, c);
    // later calls overwrite
    assert_eq!(select().from("a").table("b").target(), Some("b"));
}

#[test]
fn test_where_and_where_preserve_order() {
    let stmt = select()
        .from("posts")
        .where_("id = ?", [5])
        .and_where("status = ?", ["trash"]);
    let compiled = stmt.compile();
    assert_eq!(
        compiled.sql,
        "SELECT * FROM posts WHERE id = ? and status = ?"
    );
    assert_eq!(compiled.params, params![5, "trash"]);
}

#[test]
fn test_where_resets_predicates() {
    let stmt = select()
        .from("t")
        .where_("a = ?", [1])
        .or_where("b = ?", [2])
        .where_("c = ?", [3]);
    let compiled = stmt.compile();
    assert_eq!(compiled.sql, "SELECT * FROM t WHERE c = ?");
    assert_eq!(compiled.params, params![3]);
}

#[test]
fn test_and_where_without_where_keeps_connective() {
    let stmt = delete()
        .from("t")
        .and_where("a = ?", [1])
        .or_where("b IS NULL", params![]);
    assert_eq!(stmt.to_sql(), "DELETE FROM t WHERE and a = ? or b IS NULL");
    assert_eq!(stmt.params(), params![1]);

    let stmt = select().from("t").and_where("a = ?", [1]);
    assert_eq!(stmt.to_sql(), "SELECT * FROM t WHERE and a = ?");
}

#[test]
fn test_where_raw_binds_nothing() {
    let stmt = select()
        .from("t")
        .where_("a = ?", [1])
        .where_raw(["a = 1", "and b = 2"]);
    let compiled = stmt.compile();
    assert_eq!(compiled.sql, "SELECT * FROM t WHERE a = 1 and b = 2");
    assert!(compiled.params.is_empty());
}

#[test]
fn test_mixed_param_types() {
    let stmt = select()
        .from("users")
        .where_("age > ? AND name LIKE ? AND deleted_at IS ?", params![18, "a%", Value::Null]);
    assert_eq!(
        stmt.params(),
        vec![Value::Int(18), Value::Text("a%".into()), Value::Null]
    );
}

#[test]
fn test_page_equals_limit_offset() {
    let stmt = select().from("t").page(2, 20);
    assert_eq!(stmt.to_sql(), "SELECT * FROM t LIMIT 20,20");
    assert_eq!(stmt, select().from("t").limit_offset(20, 20));
}

#[test]
fn test_insert_quoted_columns() {
    let stmt = insert().into("t").columns(["a", "b"]).values([1, 2]);
    let compiled = stmt.compile();
    assert_eq!(compiled.sql, "INSERT INTO t (`a`,`b`) VALUES (?,?)");
    assert_eq!(compiled.params, params![1, 2]);
}

#[test]
fn test_insert_values_append() {
    let stmt = insert()
        .into("t")
        .columns(["a", "b"])
        .values([1, 2])
        .values([3]);
    let compiled = stmt.compile();
    // three placeholders for two columns: sent to the server as-is
    assert_eq!(compiled.sql, "INSERT INTO t (`a`,`b`) VALUES (?,?,?)");
    assert_eq!(compiled.params, params![1, 2, 3]);
}

#[test]
fn test_update_write_values_precede_predicates() {
    let stmt = update()
        .table("t")
        .columns(["a"])
        .values([9])
        .where_("id = ?", [1]);
    let compiled = stmt.compile();
    assert_eq!(compiled.sql, "UPDATE t SET `a` = ? WHERE id = ?");
    assert_eq!(compiled.params, params![9, 1]);
}

#[test]
fn test_compile_is_idempotent() {
    let stmt = select()
        .from("t")
        .where_("a = ?", [1])
        .order_by_with("FIELD(b, ?)", ["x"])
        .limit(3);
    let first = stmt.compile();
    let second = stmt.compile();
    assert_eq!(first, second);
    assert_eq!(stmt.to_sql(), stmt.to_sql());
    assert_eq!(stmt.to_count_sql(), stmt.to_count_sql());
    assert_eq!(stmt.compile(), first);
}

#[test]
fn test_param_order_where_having_order() {
    let stmt = select()
        .columns(["dept", "count(*)"])
        .from("staff")
        .where_("active = ?", [true])
        .group_by("dept")
        .having("count(*) > ?", [3])
        .order_by_with("FIELD(dept, ?)", ["ops"]);
    assert_eq!(stmt.params(), params![true, 3, "ops"]);
}

#[test]
fn test_shortcuts_set_target() {
    assert_eq!(select_from("users").to_sql(), "SELECT * FROM users");
    assert_eq!(
        insert_into("users").columns(["a"]).values([1]).to_sql(),
        "INSERT INTO users (`a`) VALUES (?)"
    );
    assert_eq!(
        update_table("users").columns(["a"]).values([1]).to_sql(),
        "UPDATE users SET `a` = ?"
    );
    assert_eq!(delete_from("users").to_sql(), "DELETE FROM users");
}

#[test]
fn test_statement_dispatch() {
    let stmts: Vec<Statement> = vec![
        Statement::from(select().from("t")),
        Statement::from(insert().into("t").values([1])),
        Statement::from(update().table("t").columns(["a"]).values([1])),
        Statement::from(delete().from("t")),
    ];
    let kinds: Vec<StatementKind> = stmts.iter().map(Statement::kind).collect();
    assert_eq!(
        kinds,
        [
            StatementKind::Select,
            StatementKind::Insert,
            StatementKind::Update,
            StatementKind::Delete
        ]
    );
    let sql: Vec<String> = stmts.iter().map(Compile::to_sql).collect();
    assert_eq!(
        sql,
        [
            "SELECT * FROM t",
            "INSERT INTO t VALUES (?)",
            "UPDATE t SET `a` = ?",
            "DELETE FROM t"
        ]
    );
    assert_eq!(StatementKind::Update.to_string(), "UPDATE");
}

#[test]
fn test_missing_target_is_not_validated() {
    assert_eq!(insert().values([1]).to_sql(), "INSERT VALUES (?)");
    assert_eq!(update().columns(["a"]).values([1]).to_sql(), "UPDATE SET `a` = ?");
    assert_eq!(delete().to_sql(), "DELETE");
}

#[test]
fn test_quote_ident() {
    assert_eq!(quote_ident("name"), "`name`");
    assert_eq!(quote_ident("u.name"), "`u`.`name`");
    assert_eq!(quote_ident("`already`"), "`already`");
    assert_eq!(quote_ident("we`ird"), "`we``ird`");
    assert_eq!(quote_ident("u.*"), "`u`.*");
}

#[test]
fn test_compiled_json() {
    let compiled = insert().into("t").columns(["a"]).values(["x"]).compile();
    let json = compiled.to_json();
    assert_eq!(json["sql"], "INSERT INTO t (`a`) VALUES (?)");
    assert_eq!(json["params"][0], "x");
    assert_eq!(compiled.to_string(), compiled.sql);
}
