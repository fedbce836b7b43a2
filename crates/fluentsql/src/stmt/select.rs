//! SELECT statement builder.

use super::macros::{impl_target_methods, impl_where_methods};
use super::predicate::{BoundExpr, Predicates};
use super::traits::{Compile, Compiled};
use crate::error::StmtResult;
use crate::row::{FromRow, Row};
use crate::session::Session;
use crate::value::{FromValue, Value};
use std::fmt;
use std::fmt::Write as _;

/// The LIMIT clause of a SELECT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Limit {
    /// `LIMIT count`
    Count(i64),
    /// `LIMIT offset,count`
    Window { offset: i64, count: i64 },
    /// `LIMIT <text>`, emitted verbatim
    Raw(String),
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Count(count) => write!(f, "{count}"),
            Limit::Window { offset, count } => write!(f, "{offset},{count}"),
            Limit::Raw(text) => f.write_str(text),
        }
    }
}

/// SELECT statement builder.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectStmt {
    /// Table or FROM expression
    table: Option<String>,
    /// SELECT columns (never empty, default ["*"])
    columns: Vec<String>,
    /// JOIN clauses, already rendered
    joins: Vec<String>,
    /// WHERE fragments
    predicates: Predicates,
    group_by: Option<String>,
    with_rollup: bool,
    having: Option<BoundExpr>,
    order_by: Option<BoundExpr>,
    limit: Option<Limit>,
    explain: bool,
    calc_found_rows: bool,
}

impl Default for SelectStmt {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectStmt {
    /// Create a SELECT of `*` with no target.
    pub fn new() -> Self {
        Self {
            table: None,
            columns: vec!["*".to_string()],
            joins: Vec::new(),
            predicates: Predicates::new(),
            group_by: None,
            with_rollup: false,
            having: None,
            order_by: None,
            limit: None,
            explain: false,
            calc_found_rows: false,
        }
    }

    // ==================== Columns ====================

    /// Replace the column list.
    ///
    /// Entries are emitted verbatim, so expressions such as `"max(member)"`
    /// or `"*, c.name"` are allowed. An empty list restores `*`.
    pub fn columns<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.columns = columns.into_iter().map(Into::into).collect();
        if self.columns.is_empty() {
            self.columns.push("*".to_string());
        }
        self
    }

    /// The current column list.
    pub fn column_list(&self) -> &[String] {
        &self.columns
    }

    // ==================== JOIN ====================

    /// Add `join <expr>`.
    pub fn join(mut self, expr: &str) -> Self {
        self.joins.push(format!("join {expr}"));
        self
    }

    /// Add `left join <expr>`.
    pub fn left_join(mut self, expr: &str) -> Self {
        self.joins.push(format!("left join {expr}"));
        self
    }

    /// Add `right join <expr>`.
    pub fn right_join(mut self, expr: &str) -> Self {
        self.joins.push(format!("right join {expr}"));
        self
    }

    /// Add `inner join <expr>`.
    pub fn inner_join(mut self, expr: &str) -> Self {
        self.joins.push(format!("inner join {expr}"));
        self
    }

    // ==================== Grouping & Ordering ====================

    /// Set GROUP BY.
    pub fn group_by(mut self, expr: &str) -> Self {
        self.group_by = Some(expr.to_string());
        self.with_rollup = false;
        self
    }

    /// Set GROUP BY ... WITH ROLLUP.
    pub fn group_by_with_rollup(mut self, expr: &str) -> Self {
        self.group_by = Some(expr.to_string());
        self.with_rollup = true;
        self
    }

    /// Set HAVING with values bound to its placeholders.
    pub fn having<V: Into<Value>>(mut self, expr: &str, params: impl IntoIterator<Item = V>) -> Self {
        self.having = Some(BoundExpr::new(expr, params.into_iter().map(Into::into)));
        self
    }

    /// Set ORDER BY.
    pub fn order_by(mut self, expr: &str) -> Self {
        self.order_by = Some(BoundExpr::new(expr, Vec::new()));
        self
    }

    /// Set ORDER BY with values bound to its placeholders,
    /// e.g. `order_by_with("FIELD(status, ?, ?)", ["open", "closed"])`.
    pub fn order_by_with<V: Into<Value>>(
        mut self,
        expr: &str,
        params: impl IntoIterator<Item = V>,
    ) -> Self {
        self.order_by = Some(BoundExpr::new(expr, params.into_iter().map(Into::into)));
        self
    }

    // ==================== Pagination ====================

    /// Set `LIMIT count`.
    pub fn limit(mut self, count: i64) -> Self {
        self.limit = Some(Limit::Count(count));
        self
    }

    /// Set `LIMIT offset,count`.
    pub fn limit_offset(mut self, offset: i64, count: i64) -> Self {
        self.limit = Some(Limit::Window { offset, count });
        self
    }

    /// Set `LIMIT <text>` verbatim, e.g. `limit_raw("10 OFFSET 5")`.
    pub fn limit_raw(mut self, text: impl Into<String>) -> Self {
        self.limit = Some(Limit::Raw(text.into()));
        self
    }

    /// Pagination helper: `page` is 1-based.
    ///
    /// Equivalent to `limit_offset(per_page * (page - 1), per_page)`. Page 0
    /// or below yields a negative offset, which is passed through unchanged.
    pub fn page(self, page: i64, per_page: i64) -> Self {
        let offset = per_page.saturating_mul(page.saturating_sub(1));
        self.limit_offset(offset, per_page)
    }

    /// The current LIMIT, if set.
    pub fn limit_clause(&self) -> Option<&Limit> {
        self.limit.as_ref()
    }

    // ==================== Flags ====================

    /// Prefix the statement with EXPLAIN.
    pub fn explain(mut self, enabled: bool) -> Self {
        self.explain = enabled;
        self
    }

    /// Add SQL_CALC_FOUND_ROWS so [`found_rows`] reports the un-limited count.
    pub fn calc_found_rows(mut self, enabled: bool) -> Self {
        self.calc_found_rows = enabled;
        self
    }

    // ==================== Build helpers ====================

    fn build(&self, count: bool) -> Compiled {
        let mut sql = String::new();
        let mut params = Vec::new();

        if self.explain {
            sql.push_str("EXPLAIN ");
        }
        sql.push_str("SELECT ");
        if self.calc_found_rows {
            sql.push_str("SQL_CALC_FOUND_ROWS ");
        }
        if count {
            let first = self.columns.first().map_or("*", String::as_str);
            let _ = write!(sql, "count({first})");
        } else {
            sql.push_str(&self.columns.join(","));
        }

        if let Some(table) = &self.table {
            sql.push_str(" FROM ");
            sql.push_str(table);
        }

        for join in &self.joins {
            sql.push(' ');
            sql.push_str(join);
        }

        self.predicates.write_where(&mut sql, &mut params);

        if let Some(group) = &self.group_by {
            sql.push_str(" GROUP BY ");
            sql.push_str(group);
            if self.with_rollup {
                sql.push_str(" WITH ROLLUP");
            }
        }

        if let Some(having) = &self.having {
            sql.push_str(" HAVING ");
            sql.push_str(&having.sql);
            params.extend(having.values.iter().cloned());
        }

        if let Some(order) = &self.order_by {
            sql.push_str(" ORDER BY ");
            sql.push_str(&order.sql);
            params.extend(order.values.iter().cloned());
        }

        if let Some(limit) = &self.limit {
            let _ = write!(sql, " LIMIT {limit}");
        }

        Compiled::new(sql, params)
    }

    /// Compile in count mode: the column list renders as `count(<first column>)`.
    pub fn compile_count(&self) -> Compiled {
        self.build(true)
    }

    /// The count-mode SQL string (for debugging).
    pub fn to_count_sql(&self) -> String {
        self.build(true).sql
    }

    // ==================== Execution ====================

    /// Execute and return all rows.
    pub async fn fetch_all(&self, session: &impl Session) -> StmtResult<Vec<Row>> {
        let Compiled { sql, params } = self.compile();
        session.query(&sql, &params).await
    }

    /// Execute and return the first row, if any.
    pub async fn fetch(&self, session: &impl Session) -> StmtResult<Option<Row>> {
        let Compiled { sql, params } = self.compile();
        session.query_opt(&sql, &params).await
    }

    /// Execute and return the first row, or [`StmtError::NotFound`](crate::StmtError::NotFound).
    pub async fn fetch_one(&self, session: &impl Session) -> StmtResult<Row> {
        let Compiled { sql, params } = self.compile();
        session.query_one(&sql, &params).await
    }

    /// Execute and map all rows to `T`.
    pub async fn fetch_all_as<T: FromRow>(&self, session: &impl Session) -> StmtResult<Vec<T>> {
        let rows = self.fetch_all(session).await?;
        rows.iter().map(T::from_row).collect()
    }

    /// Execute and map the first row, if any, to `T`.
    pub async fn fetch_as<T: FromRow>(&self, session: &impl Session) -> StmtResult<Option<T>> {
        let row = self.fetch(session).await?;
        row.as_ref().map(T::from_row).transpose()
    }

    /// Execute and map the first row to `T`, erroring when there is none.
    pub async fn fetch_one_as<T: FromRow>(&self, session: &impl Session) -> StmtResult<T> {
        let row = self.fetch_one(session).await?;
        T::from_row(&row)
    }

    /// Execute and return column `column` of the first row, if any.
    pub async fn fetch_column(
        &self,
        session: &impl Session,
        column: usize,
    ) -> StmtResult<Option<Value>> {
        let Compiled { sql, params } = self.compile();
        session.query_scalar(&sql, &params, column).await
    }

    /// Execute in count mode and return the count from the first row.
    ///
    /// A result with no rows (possible with GROUP BY) counts as 0.
    pub async fn count(&self, session: &impl Session) -> StmtResult<i64> {
        let Compiled { sql, params } = self.compile_count();
        match session.query_scalar(&sql, &params, 0).await? {
            Some(value) => i64::from_value(&value, "count"),
            None => Ok(0),
        }
    }
}

impl_target_methods!(SelectStmt);
impl_where_methods!(SelectStmt);

impl Compile for SelectStmt {
    fn compile(&self) -> Compiled {
        self.build(false)
    }
}

/// Number of rows the last `SQL_CALC_FOUND_ROWS` SELECT on `session` would
/// have returned without its LIMIT.
pub async fn found_rows(session: &impl Session) -> StmtResult<i64> {
    match session.query_scalar("SELECT FOUND_ROWS()", &[], 0).await? {
        Some(value) => i64::from_value(&value, "FOUND_ROWS()"),
        None => Ok(0),
    }
}
