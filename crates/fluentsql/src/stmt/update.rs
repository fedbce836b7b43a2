//! UPDATE statement builder.

use super::macros::{impl_target_methods, impl_where_methods, impl_write_methods};
use super::predicate::Predicates;
use super::quote_ident;
use super::traits::{Compile, Compiled, Execute};
use crate::value::Value;

/// UPDATE statement builder.
///
/// Each column renders as `` `column` = ? ``; the values fill the SET placeholders
/// first, followed by the WHERE values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateStmt {
    table: Option<String>,
    columns: Vec<String>,
    values: Vec<Value>,
    predicates: Predicates,
}

impl UpdateStmt {
    pub fn new() -> Self {
        Self::default()
    }
}

impl_target_methods!(UpdateStmt);
impl_write_methods!(UpdateStmt);
impl_where_methods!(UpdateStmt);

impl Compile for UpdateStmt {
    fn compile(&self) -> Compiled {
        let mut sql = String::from("UPDATE ");
        if let Some(table) = &self.table {
            sql.push_str(table);
            sql.push(' ');
        }
        sql.push_str("SET ");
        let assignments: Vec<String> = self
            .columns
            .iter()
            .map(|c| format!("{} = ?", quote_ident(c)))
            .collect();
        sql.push_str(&assignments.join(", "));

        let mut params = self.values.clone();
        self.predicates.write_where(&mut sql, &mut params);

        Compiled::new(sql, params)
    }
}

impl Execute for UpdateStmt {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params;

    #[test]
    fn test_update_with_where() {
        let stmt = UpdateStmt::new()
            .table("users")
            .columns(["name", "email"])
            .values(["Bob", "bob@example.com"])
            .where_("id = ?", [7]);
        let compiled = stmt.compile();
        assert_eq!(
            compiled.sql,
            "UPDATE users SET `name` = ?, `email` = ? WHERE id = ?"
        );
        assert_eq!(compiled.params, params!["Bob", "bob@example.com", 7]);
    }

    #[test]
    fn test_set_values_precede_where_values() {
        let stmt = UpdateStmt::new()
            .table("t")
            .where_("a = ?", [1])
            .and_where("b = ?", [2])
            .columns(["c"])
            .values([3]);
        assert_eq!(stmt.params(), params![3, 1, 2]);
    }

    #[test]
    fn test_no_columns_passes_through() {
        let stmt = UpdateStmt::new().table("t").where_("id = ?", [1]);
        assert_eq!(stmt.to_sql(), "UPDATE t SET  WHERE id = ?");
    }
}
