//! Trait definitions shared by every statement kind.

use crate::error::StmtResult;
use crate::session::{ExecResult, Session};
use crate::value::Value;
use serde::Serialize;
use std::fmt;
use std::future::Future;

/// The result of compiling a statement: SQL text plus ordered parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Compiled {
    /// SQL with one `?` per bound value.
    pub sql: String,
    /// Values for the placeholders, in placeholder order.
    pub params: Vec<Value>,
}

impl Compiled {
    /// Create a compiled statement.
    pub fn new(sql: String, params: Vec<Value>) -> Self {
        Self { sql, params }
    }

    /// Render as a JSON object (`{"sql": ..., "params": [...]}`), for logs and fixtures.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl fmt::Display for Compiled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

/// Base trait for all statements: deterministic compilation.
///
/// Compiling never mutates the statement, so calling any of these methods
/// repeatedly without changing the statement yields identical output.
pub trait Compile {
    /// Render SQL and parameters.
    fn compile(&self) -> Compiled;

    /// The SQL string alone.
    fn to_sql(&self) -> String {
        self.compile().sql
    }

    /// The parameter list alone.
    fn params(&self) -> Vec<Value> {
        self.compile().params
    }
}

/// Trait for statements run for their effect (INSERT/UPDATE/DELETE).
pub trait Execute: Compile + Sync {
    /// Execute and return affected row count and generated id.
    fn execute(
        &self,
        session: &impl Session,
    ) -> impl Future<Output = StmtResult<ExecResult>> + Send {
        async move {
            let Compiled { sql, params } = self.compile();
            session.execute(&sql, &params).await
        }
    }
}
