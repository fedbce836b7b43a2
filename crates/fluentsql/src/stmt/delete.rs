//! DELETE statement builder.

use super::macros::{impl_target_methods, impl_where_methods};
use super::predicate::Predicates;
use super::traits::{Compile, Compiled, Execute};

/// DELETE statement builder.
///
/// A DELETE without predicates removes every row of the table; no guard is
/// applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeleteStmt {
    table: Option<String>,
    predicates: Predicates,
}

impl DeleteStmt {
    pub fn new() -> Self {
        Self::default()
    }
}

impl_target_methods!(DeleteStmt);
impl_where_methods!(DeleteStmt);

impl Compile for DeleteStmt {
    fn compile(&self) -> Compiled {
        let mut sql = String::from("DELETE");
        if let Some(table) = &self.table {
            sql.push_str(" FROM ");
            sql.push_str(table);
        }
        let mut params = Vec::new();
        self.predicates.write_where(&mut sql, &mut params);
        Compiled::new(sql, params)
    }
}

impl Execute for DeleteStmt {}
