//! The database session contract.
//!
//! Statements never talk to a driver directly. They compile to SQL plus an
//! ordered parameter list and hand both to a [`Session`], passed explicitly to
//! every execution call. [`MySqlSession`](crate::MySqlSession) is the bundled
//! implementation; tests and wrappers such as
//! [`TracingSession`](crate::TracingSession) provide others.

use crate::error::{StmtError, StmtResult};
use crate::row::Row;
use crate::value::Value;
use std::future::Future;

/// Outcome of a write statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecResult {
    /// Rows changed by the statement.
    pub rows_affected: u64,
    /// Auto-increment id generated by the statement, if any.
    pub last_insert_id: Option<u64>,
}

impl ExecResult {
    /// Create a result with no generated id.
    pub fn affected(rows_affected: u64) -> Self {
        Self {
            rows_affected,
            last_insert_id: None,
        }
    }
}

/// Driver-side description of a prepared statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prepared {
    /// SQL text that was prepared.
    pub sql: String,
    /// Number of `?` placeholders the server expects.
    pub param_count: usize,
    /// Result column names (empty for write statements).
    pub columns: Vec<String>,
}

/// A database session: connection, execution and transaction control.
///
/// Implementations own their connection state. The methods take `&self` so a
/// session can be shared by reference between the statements built against it.
pub trait Session: Send + Sync {
    /// Execute a row-producing statement and return all rows.
    fn query(
        &self,
        sql: &str,
        params: &[Value],
    ) -> impl Future<Output = StmtResult<Vec<Row>>> + Send;

    /// Execute a statement and report affected rows and the generated id.
    fn execute(
        &self,
        sql: &str,
        params: &[Value],
    ) -> impl Future<Output = StmtResult<ExecResult>> + Send;

    /// Execute a query and return the **first** row.
    ///
    /// Semantics:
    /// - 0 rows: returns [`StmtError::NotFound`]
    /// - 1 or more rows: returns the first row
    fn query_one(
        &self,
        sql: &str,
        params: &[Value],
    ) -> impl Future<Output = StmtResult<Row>> + Send {
        async move {
            let rows = self.query(sql, params).await?;
            rows.into_iter()
                .next()
                .ok_or_else(|| StmtError::not_found("Expected one row, got none"))
        }
    }

    /// Execute a query and return the first row, if any.
    fn query_opt(
        &self,
        sql: &str,
        params: &[Value],
    ) -> impl Future<Output = StmtResult<Option<Row>>> + Send {
        async move {
            let rows = self.query(sql, params).await?;
            Ok(rows.into_iter().next())
        }
    }

    /// Execute a query and return one column of the first row, if any.
    fn query_scalar(
        &self,
        sql: &str,
        params: &[Value],
        column: usize,
    ) -> impl Future<Output = StmtResult<Option<Value>>> + Send {
        async move {
            let Some(row) = self.query_opt(sql, params).await? else {
                return Ok(None);
            };
            match row.get(column) {
                Some(value) => Ok(Some(value.clone())),
                None => Err(StmtError::decode(
                    format!("#{column}"),
                    format!("row has {} columns", row.len()),
                )),
            }
        }
    }

    /// Prepare a statement on this session.
    ///
    /// The default implementation returns [`StmtError::Unsupported`].
    fn prepare(&self, sql: &str) -> impl Future<Output = StmtResult<Prepared>> + Send {
        let _ = sql;
        async {
            Err(StmtError::Unsupported(
                "prepared statements are not supported by this session".to_string(),
            ))
        }
    }

    /// Begin a transaction.
    fn begin(&self) -> impl Future<Output = StmtResult<()>> + Send;

    /// Commit the open transaction.
    fn commit(&self) -> impl Future<Output = StmtResult<()>> + Send;

    /// Roll back the open transaction.
    fn rollback(&self) -> impl Future<Output = StmtResult<()>> + Send;

    /// Id generated by the most recent INSERT on this session.
    fn last_insert_id(&self) -> Option<u64>;
}

impl<S: Session> Session for &S {
    fn query(
        &self,
        sql: &str,
        params: &[Value],
    ) -> impl Future<Output = StmtResult<Vec<Row>>> + Send {
        (**self).query(sql, params)
    }

    fn execute(
        &self,
        sql: &str,
        params: &[Value],
    ) -> impl Future<Output = StmtResult<ExecResult>> + Send {
        (**self).execute(sql, params)
    }

    fn prepare(&self, sql: &str) -> impl Future<Output = StmtResult<Prepared>> + Send {
        (**self).prepare(sql)
    }

    fn begin(&self) -> impl Future<Output = StmtResult<()>> + Send {
        (**self).begin()
    }

    fn commit(&self) -> impl Future<Output = StmtResult<()>> + Send {
        (**self).commit()
    }

    fn rollback(&self) -> impl Future<Output = StmtResult<()>> + Send {
        (**self).rollback()
    }

    fn last_insert_id(&self) -> Option<u64> {
        (**self).last_insert_id()
    }
}
