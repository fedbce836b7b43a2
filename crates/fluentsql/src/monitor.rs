//! Structured logging of executed SQL via `tracing`.
//!
//! [`TracingSession`] wraps any [`Session`] and emits one event before and one
//! after every statement. Events use the `fluentsql.sql` target for statements
//! and `fluentsql.tx` for transaction control, so they can be filtered
//! independently:
//!
//! ```text
//! RUST_LOG=fluentsql.sql=debug,fluentsql.tx=info
//! ```

use crate::error::StmtResult;
use crate::row::Row;
use crate::session::{ExecResult, Prepared, Session};
use crate::value::Value;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::Level;

/// Maximum length for error messages in [`Outcome::Error`].
const MAX_ERROR_LEN: usize = 512;

/// Truncate to at most `max_bytes`, backing off to a char boundary.
pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

/// The kind of SQL statement being executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// SELECT query
    Select,
    /// INSERT statement
    Insert,
    /// UPDATE statement
    Update,
    /// DELETE statement
    Delete,
    /// EXPLAIN of any statement
    Explain,
    /// Anything else (DDL, SET, CALL, ...)
    Other,
}

impl QueryKind {
    /// Detect the statement kind from its leading keyword.
    pub fn from_sql(sql: &str) -> Self {
        let keyword: String = sql
            .trim_start_matches(|c: char| c.is_whitespace() || c == '(')
            .chars()
            .take_while(|c| c.is_ascii_alphabetic())
            .collect();

        match keyword.to_ascii_uppercase().as_str() {
            "SELECT" => QueryKind::Select,
            "INSERT" | "REPLACE" => QueryKind::Insert,
            "UPDATE" => QueryKind::Update,
            "DELETE" => QueryKind::Delete,
            "EXPLAIN" | "DESCRIBE" => QueryKind::Explain,
            _ => QueryKind::Other,
        }
    }
}

/// Result of a statement execution, as reported in log events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Query returned rows.
    Rows(usize),
    /// Statement affected rows.
    Affected(u64),
    /// Statement was prepared.
    Prepared,
    /// Execution failed (message truncated to 512 bytes).
    Error(String),
}

impl Outcome {
    /// Create an error outcome, truncating the message.
    pub fn error(msg: String) -> Self {
        if msg.len() > MAX_ERROR_LEN {
            Self::Error(format!("{}...", truncate_sql_bytes(&msg, MAX_ERROR_LEN)))
        } else {
            Self::Error(msg)
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Rows(n) => write!(f, "{n} rows"),
            Outcome::Affected(n) => write!(f, "{n} affected"),
            Outcome::Prepared => f.write_str("prepared"),
            Outcome::Error(e) => write!(f, "error: {e}"),
        }
    }
}

/// A [`Session`] wrapper that logs every statement through `tracing`.
#[derive(Debug, Clone)]
pub struct TracingSession<S> {
    inner: S,
    level: Level,
    max_sql_length: Option<usize>,
    slow_query_threshold: Option<Duration>,
}

impl<S: Session> TracingSession<S> {
    /// Wrap `inner`, logging at DEBUG and truncating SQL to 200 bytes.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            level: Level::DEBUG,
            max_sql_length: Some(200),
            slow_query_threshold: None,
        }
    }

    /// Override the tracing event level for statement events.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set maximum SQL length to display.
    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }

    /// Warn about statements slower than `threshold`.
    pub fn slow_query_threshold(mut self, threshold: Duration) -> Self {
        self.slow_query_threshold = Some(threshold);
        self
    }

    /// Get a reference to the wrapped session.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Unwrap, returning the wrapped session.
    pub fn into_inner(self) -> S {
        self.inner
    }

    pub(crate) fn truncate_sql(&self, sql: &str) -> String {
        match self.max_sql_length {
            Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
            _ => sql.to_string(),
        }
    }

    pub(crate) fn is_slow(&self, elapsed: Duration) -> bool {
        self.slow_query_threshold
            .is_some_and(|threshold| elapsed > threshold)
    }

    fn before(&self, sql: &str, param_count: usize) {
        /// Dispatch a tracing event at a runtime-determined level.
        macro_rules! emit_at_level {
            ($level:expr, $($field:tt)*) => {
                match $level {
                    Level::ERROR => tracing::error!($($field)*),
                    Level::WARN  => tracing::warn!($($field)*),
                    Level::INFO  => tracing::info!($($field)*),
                    Level::DEBUG => tracing::debug!($($field)*),
                    Level::TRACE => tracing::trace!($($field)*),
                }
            };
        }

        let sql = self.truncate_sql(sql);
        emit_at_level!(
            self.level,
            target: "fluentsql.sql",
            kind = ?QueryKind::from_sql(&sql),
            param_count,
            sql = %sql,
            "executing statement"
        );
    }

    fn after(&self, sql: &str, elapsed: Duration, outcome: &Outcome) {
        let kind = QueryKind::from_sql(sql);
        match outcome {
            Outcome::Error(message) => tracing::error!(
                target: "fluentsql.sql",
                kind = ?kind,
                elapsed_ms = elapsed.as_millis() as u64,
                sql = %self.truncate_sql(sql),
                error = %message,
                "statement failed"
            ),
            _ if self.is_slow(elapsed) => tracing::warn!(
                target: "fluentsql.sql",
                kind = ?kind,
                elapsed_ms = elapsed.as_millis() as u64,
                outcome = %outcome,
                sql = %self.truncate_sql(sql),
                "slow statement"
            ),
            _ => tracing::trace!(
                target: "fluentsql.sql",
                kind = ?kind,
                elapsed_ms = elapsed.as_millis() as u64,
                outcome = %outcome,
                "statement finished"
            ),
        }
    }

    fn observe<T>(
        &self,
        sql: &str,
        start: Instant,
        result: &StmtResult<T>,
        outcome: impl FnOnce(&T) -> Outcome,
    ) {
        let outcome = match result {
            Ok(value) => outcome(value),
            Err(e) => Outcome::error(e.to_string()),
        };
        self.after(sql, start.elapsed(), &outcome);
    }

    fn control(&self, action: &'static str, result: &StmtResult<()>) {
        match result {
            Ok(()) => tracing::debug!(target: "fluentsql.tx", action, "transaction"),
            Err(e) => tracing::error!(
                target: "fluentsql.tx",
                action,
                error = %e,
                "transaction control failed"
            ),
        }
    }
}

impl<S: Session> Session for TracingSession<S> {
    async fn query(&self, sql: &str, params: &[Value]) -> StmtResult<Vec<Row>> {
        self.before(sql, params.len());
        let start = Instant::now();
        let result = self.inner.query(sql, params).await;
        self.observe(sql, start, &result, |rows| Outcome::Rows(rows.len()));
        result
    }

    async fn execute(&self, sql: &str, params: &[Value]) -> StmtResult<ExecResult> {
        self.before(sql, params.len());
        let start = Instant::now();
        let result = self.inner.execute(sql, params).await;
        self.observe(sql, start, &result, |done| Outcome::Affected(done.rows_affected));
        result
    }

    async fn prepare(&self, sql: &str) -> StmtResult<Prepared> {
        let start = Instant::now();
        let result = self.inner.prepare(sql).await;
        self.observe(sql, start, &result, |_| Outcome::Prepared);
        result
    }

    async fn begin(&self) -> StmtResult<()> {
        let result = self.inner.begin().await;
        self.control("begin", &result);
        result
    }

    async fn commit(&self) -> StmtResult<()> {
        let result = self.inner.commit().await;
        self.control("commit", &result);
        result
    }

    async fn rollback(&self) -> StmtResult<()> {
        let result = self.inner.rollback().await;
        self.control("rollback", &result);
        result
    }

    fn last_insert_id(&self) -> Option<u64> {
        self.inner.last_insert_id()
    }
}
