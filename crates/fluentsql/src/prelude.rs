//! Glob-import of the everyday API: builders, execution traits and sessions.
//!
//! ```ignore
//! use fluentsql::prelude::*;
//! ```

pub use crate::params;
pub use crate::stmt::{
    Compile, Execute, Statement, delete, delete_from, insert, insert_into, select, select_from,
    update, update_table,
};
pub use crate::{
    ExecResult, FromRow, FromValue, MySqlSession, Row, Session, StmtError, StmtResult, Value,
};
