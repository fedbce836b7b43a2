//! INSERT statement builder.

use super::macros::{impl_target_methods, impl_write_methods};
use super::quote_ident;
use super::traits::{Compile, Compiled, Execute};
use crate::value::Value;

/// INSERT statement builder.
///
/// Renders ``INSERT INTO <table> (`c1`,`c2`) VALUES (?,?)`` with one
/// placeholder per value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsertStmt {
    table: Option<String>,
    columns: Vec<String>,
    values: Vec<Value>,
}

impl InsertStmt {
    pub fn new() -> Self {
        Self::default()
    }
}

impl_target_methods!(InsertStmt);
impl_write_methods!(InsertStmt);

impl Compile for InsertStmt {
    fn compile(&self) -> Compiled {
        let mut sql = String::from("INSERT ");
        if let Some(table) = &self.table {
            sql.push_str("INTO ");
            sql.push_str(table);
            sql.push(' ');
        }
        if !self.columns.is_empty() {
            sql.push('(');
            let quoted: Vec<String> = self.columns.iter().map(|c| quote_ident(c)).collect();
            sql.push_str(&quoted.join(","));
            sql.push_str(") ");
        }
        sql.push_str("VALUES (");
        sql.push_str(&vec!["?"; self.values.len()].join(","));
        sql.push(')');

        Compiled::new(sql, self.values.clone())
    }
}

impl Execute for InsertStmt {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params;

    #[test]
    fn test_basic_insert() {
        let stmt = InsertStmt::new()
            .into("users")
            .columns(["name", "email"])
            .values(["Bob", "bob@example.com"]);
        let compiled = stmt.compile();
        assert_eq!(compiled.sql, "INSERT INTO users (`name`,`email`) VALUES (?,?)");
        assert_eq!(compiled.params, params!["Bob", "bob@example.com"]);
    }

    #[test]
    fn test_values_accumulate() {
        let stmt = InsertStmt::new()
            .into("t")
            .columns(["a", "b", "c"])
            .values([1, 2])
            .value("three");
        assert_eq!(stmt.to_sql(), "INSERT INTO t (`a`,`b`,`c`) VALUES (?,?,?)");
        assert_eq!(stmt.params(), params![1, 2, "three"]);
    }

    #[test]
    fn test_qualified_columns_quote_each_segment() {
        let stmt = InsertStmt::new()
            .into("app.users")
            .columns(["users.name", "odd`col"])
            .values(["a", "b"]);
        assert_eq!(
            stmt.to_sql(),
            "INSERT INTO app.users (`users`.`name`,`odd``col`) VALUES (?,?)"
        );
    }

    #[test]
    fn test_no_columns_omits_list() {
        let stmt = InsertStmt::new().into("t").values(params![1, Value::Null]);
        assert_eq!(stmt.to_sql(), "INSERT INTO t VALUES (?,?)");
    }

    #[test]
    fn test_placeholders_follow_value_count() {
        let stmt = InsertStmt::new()
            .into("t")
            .columns(["a", "b"])
            .values([1]);
        assert_eq!(stmt.to_sql(), "INSERT INTO t (`a`,`b`) VALUES (?)");
    }
}
