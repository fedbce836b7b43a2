//! In-memory session that records every call, for execution tests.

#![allow(dead_code)]

use fluentsql::{ExecResult, Row, Session, StmtError, StmtResult, Value};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// One call observed by [`RecordingSession`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Query(String, Vec<Value>),
    Execute(String, Vec<Value>),
    Begin,
    Commit,
    Rollback,
}

/// Session that records calls and replays scripted result sets.
///
/// Each `query` pops the next scripted result set (or returns no rows). Any
/// `execute` whose SQL contains the configured failure marker errors.
#[derive(Default)]
pub struct RecordingSession {
    calls: Mutex<Vec<Call>>,
    results: Mutex<VecDeque<Vec<Row>>>,
    fail_marker: Mutex<Option<String>>,
    next_id: AtomicU64,
}

impl RecordingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a result set for the next `query`.
    pub fn push_rows(&self, rows: Vec<Row>) -> &Self {
        self.results.lock().unwrap().push_back(rows);
        self
    }

    /// Make every `execute` whose SQL contains `marker` fail.
    pub fn fail_on(&self, marker: &str) -> &Self {
        *self.fail_marker.lock().unwrap() = Some(marker.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Session for RecordingSession {
    async fn query(&self, sql: &str, params: &[Value]) -> StmtResult<Vec<Row>> {
        self.record(Call::Query(sql.to_string(), params.to_vec()));
        Ok(self.results.lock().unwrap().pop_front().unwrap_or_default())
    }

    async fn execute(&self, sql: &str, params: &[Value]) -> StmtResult<ExecResult> {
        self.record(Call::Execute(sql.to_string(), params.to_vec()));
        let failing = self
            .fail_marker
            .lock()
            .unwrap()
            .as_deref()
            .is_some_and(|marker| sql.contains(marker));
        if failing {
            return Err(StmtError::Other(format!("scripted failure: {sql}")));
        }
        let last_insert_id = sql
            .starts_with("INSERT")
            .then(|| self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        Ok(ExecResult {
            rows_affected: 1,
            last_insert_id,
        })
    }

    async fn begin(&self) -> StmtResult<()> {
        self.record(Call::Begin);
        Ok(())
    }

    async fn commit(&self) -> StmtResult<()> {
        self.record(Call::Commit);
        Ok(())
    }

    async fn rollback(&self) -> StmtResult<()> {
        self.record(Call::Rollback);
        Ok(())
    }

    fn last_insert_id(&self) -> Option<u64> {
        match self.next_id.load(Ordering::SeqCst) {
            0 => None,
            id => Some(id),
        }
    }
}

/// Build a row from column names and values.
pub fn row(columns: &[&str], values: Vec<Value>) -> Row {
    let columns: Arc<[String]> = columns.iter().map(|c| c.to_string()).collect();
    Row::new(columns, values)
}
