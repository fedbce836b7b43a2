//! Fluent statement builders for fluentsql.
//!
//! Each statement kind has its own builder type; [`Statement`] wraps any of
//! them when the kind is only known at runtime.
//!
//! # Features
//!
//! - **Explicit parameters**: every `?` placeholder gets its value from an
//!   ordered list passed alongside the expression, never from argument sniffing
//! - **Deterministic compilation**: compiling never mutates the builder
//! - **Session injection**: execution methods take the [`Session`] to run on
//!
//! # Usage
//!
//! ```ignore
//! use fluentsql::stmt::{self, Compile, Execute};
//! use fluentsql::params;
//!
//! // SELECT
//! let rows = stmt::select()
//!     .columns(["id", "name"])
//!     .from("users")
//!     .where_("status = ?", ["active"])
//!     .and_where("age > ?", [18])
//!     .order_by("id DESC")
//!     .page(2, 20)
//!     .fetch_all(&session)
//!     .await?;
//!
//! // INSERT
//! let result = stmt::insert()
//!     .into("users")
//!     .columns(["name", "age"])
//!     .values(params!["alice", 30])
//!     .execute(&session)
//!     .await?;
//!
//! // UPDATE
//! stmt::update()
//!     .table("users")
//!     .columns(["status"])
//!     .values(["inactive"])
//!     .where_("id = ?", [user_id])
//!     .execute(&session)
//!     .await?;
//!
//! // DELETE
//! stmt::delete()
//!     .from("users")
//!     .where_("id = ?", [user_id])
//!     .execute(&session)
//!     .await?;
//! ```

mod delete;
mod insert;
mod macros;
mod predicate;
mod select;
mod traits;
mod update;

pub use delete::DeleteStmt;
pub use insert::InsertStmt;
pub use predicate::{BoundExpr, Connective, Predicates};
pub use select::{Limit, SelectStmt, found_rows};
pub use traits::{Compile, Compiled, Execute};
pub use update::UpdateStmt;

use crate::error::StmtResult;
use crate::row::Row;
use crate::session::{ExecResult, Session};
use std::fmt;

/// Quote a column identifier with backticks.
///
/// Each `.`-separated segment is quoted on its own, embedded backticks are
/// doubled, and segments that are already quoted (or `*`) are kept as-is.
pub(crate) fn quote_ident(ident: &str) -> String {
    ident
        .split('.')
        .map(|segment| {
            let already_quoted =
                segment.len() >= 2 && segment.starts_with('`') && segment.ends_with('`');
            if already_quoted || segment == "*" {
                segment.to_string()
            } else {
                format!("`{}`", segment.replace('`', "``"))
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}

/// The kind of a [`Statement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StatementKind::Select => "SELECT",
            StatementKind::Insert => "INSERT",
            StatementKind::Update => "UPDATE",
            StatementKind::Delete => "DELETE",
        };
        f.write_str(s)
    }
}

/// Any statement, tagged by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Select(SelectStmt),
    Insert(InsertStmt),
    Update(UpdateStmt),
    Delete(DeleteStmt),
}

impl Statement {
    /// The statement kind.
    pub fn kind(&self) -> StatementKind {
        match self {
            Statement::Select(_) => StatementKind::Select,
            Statement::Insert(_) => StatementKind::Insert,
            Statement::Update(_) => StatementKind::Update,
            Statement::Delete(_) => StatementKind::Delete,
        }
    }

    /// Execute for effect and return affected rows and generated id.
    pub async fn execute(&self, session: &impl Session) -> StmtResult<ExecResult> {
        let Compiled { sql, params } = self.compile();
        session.execute(&sql, &params).await
    }

    /// Execute and return all rows.
    pub async fn fetch_all(&self, session: &impl Session) -> StmtResult<Vec<Row>> {
        let Compiled { sql, params } = self.compile();
        session.query(&sql, &params).await
    }
}

impl Compile for Statement {
    fn compile(&self) -> Compiled {
        match self {
            Statement::Select(s) => s.compile(),
            Statement::Insert(s) => s.compile(),
            Statement::Update(s) => s.compile(),
            Statement::Delete(s) => s.compile(),
        }
    }
}

impl From<SelectStmt> for Statement {
    fn from(stmt: SelectStmt) -> Self {
        Statement::Select(stmt)
    }
}

impl From<InsertStmt> for Statement {
    fn from(stmt: InsertStmt) -> Self {
        Statement::Insert(stmt)
    }
}

impl From<UpdateStmt> for Statement {
    fn from(stmt: UpdateStmt) -> Self {
        Statement::Update(stmt)
    }
}

impl From<DeleteStmt> for Statement {
    fn from(stmt: DeleteStmt) -> Self {
        Statement::Delete(stmt)
    }
}

/// Create a SELECT statement (columns default to `*`).
///
/// # Example
/// ```ignore
/// let stmt = fluentsql::select().from("users").where_("id = ?", [1]);
/// ```
pub fn select() -> SelectStmt {
    SelectStmt::new()
}

/// Create a SELECT statement with its FROM expression set.
///
/// # Example
/// ```ignore
/// let stmt = fluentsql::select_from("posts p").left_join("users u ON u.id = p.author_id");
/// ```
pub fn select_from(from_expr: &str) -> SelectStmt {
    SelectStmt::new().from(from_expr)
}

/// Create an INSERT statement.
pub fn insert() -> InsertStmt {
    InsertStmt::new()
}

/// Create an INSERT statement with its target table set.
pub fn insert_into(table: &str) -> InsertStmt {
    InsertStmt::new().into(table)
}

/// Create an UPDATE statement.
pub fn update() -> UpdateStmt {
    UpdateStmt::new()
}

/// Create an UPDATE statement with its target table set.
pub fn update_table(table: &str) -> UpdateStmt {
    UpdateStmt::new().table(table)
}

/// Create a DELETE statement.
///
/// There is no guard against a missing WHERE clause: an unconditioned DELETE
/// removes every row.
pub fn delete() -> DeleteStmt {
    DeleteStmt::new()
}

/// Create a DELETE statement with its target table set.
pub fn delete_from(table: &str) -> DeleteStmt {
    DeleteStmt::new().from(table)
}

#[cfg(test)]
mod tests;
