//! # fluentsql
//!
//! A fluent, parameterized SQL statement builder for MySQL.
//!
//! ## Features
//!
//! - **Chainable builders**: one typed builder per statement kind, wrapped by
//!   [`Statement`] when the kind is only known at runtime
//! - **Parameterized by construction**: every value travels as a bound `?`
//!   parameter, in an explicit ordered list
//! - **Explicit sessions**: execution takes the [`Session`] to run on; there is
//!   no global connection
//! - **Row mapping**: rows decode into [`Value`]s and map to tuples or your own
//!   types via [`FromRow`]
//! - **Statement logging**: [`TracingSession`] reports every statement through
//!   `tracing`, with truncation and slow-statement warnings
//!
//! ## Statements
//!
//! ```ignore
//! use fluentsql::prelude::*;
//!
//! // SELECT
//! let rows = select()
//!     .columns(["id", "name"])
//!     .from("users")
//!     .where_("status = ?", ["active"])
//!     .order_by("id DESC")
//!     .limit(10)
//!     .fetch_all(&session)
//!     .await?;
//!
//! // INSERT
//! let done = insert()
//!     .into("users")
//!     .columns(["name", "email"])
//!     .values(["alice", "alice@example.com"])
//!     .execute(&session)
//!     .await?;
//! println!("new id: {:?}", done.last_insert_id);
//!
//! // UPDATE
//! update()
//!     .table("users")
//!     .columns(["status"])
//!     .values(["inactive"])
//!     .where_("id = ?", [user_id])
//!     .execute(&session)
//!     .await?;
//!
//! // DELETE
//! delete()
//!     .from("users")
//!     .where_("id = ?", [user_id])
//!     .execute(&session)
//!     .await?;
//! ```

pub mod config;
pub mod error;
pub mod monitor;
pub mod mysql;
pub mod prelude;
pub mod row;
pub mod session;
pub mod stmt;
pub mod transaction;
pub mod value;

pub use config::SessionConfig;
pub use error::{StmtError, StmtResult};
pub use monitor::{Outcome, QueryKind, TracingSession};
pub use mysql::MySqlSession;
pub use row::{FromRow, Row, RowIndex};
pub use session::{ExecResult, Prepared, Session};
pub use value::{FromValue, Value};

// Re-export stmt module for easy access
pub use stmt::{
    Compile, Compiled, DeleteStmt, Execute, InsertStmt, Limit, SelectStmt, Statement,
    StatementKind, UpdateStmt, delete, delete_from, found_rows, insert, insert_into, select,
    select_from, update, update_table,
};
