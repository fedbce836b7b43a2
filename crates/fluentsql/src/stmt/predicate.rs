//! WHERE-clause accumulation.

use crate::value::Value;

/// Boolean connective placed in front of a predicate fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    /// No connective (first fragment of a clause).
    None,
    /// `and <expr>`
    And,
    /// `or <expr>`
    Or,
}

impl Connective {
    fn prefix(self) -> &'static str {
        match self {
            Connective::None => "",
            Connective::And => "and ",
            Connective::Or => "or ",
        }
    }
}

/// A SQL fragment together with the values bound to its `?` placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundExpr {
    /// SQL text, emitted verbatim.
    pub sql: String,
    /// Values for the placeholders in `sql`, in order.
    pub values: Vec<Value>,
}

impl BoundExpr {
    /// Create a fragment with its bound values.
    pub fn new(sql: impl Into<String>, values: impl IntoIterator<Item = Value>) -> Self {
        Self {
            sql: sql.into(),
            values: values.into_iter().collect(),
        }
    }
}

/// Ordered predicate fragments of a WHERE clause.
///
/// Each fragment keeps its own bound values, so fragments and values can
/// never drift out of alignment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicates {
    fragments: Vec<BoundExpr>,
}

impl Predicates {
    /// Create an empty predicate list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every fragment and bound value.
    pub fn reset(&mut self) {
        self.fragments.clear();
    }

    /// Append `expr` prefixed with `connective`.
    ///
    /// The connective is kept even on the first fragment, so `and_where`
    /// without a preceding `where_` renders `WHERE and ...` and the server
    /// rejects it.
    pub fn push(
        &mut self,
        connective: Connective,
        expr: &str,
        values: impl IntoIterator<Item = Value>,
    ) {
        self.fragments.push(BoundExpr::new(
            format!("{}{}", connective.prefix(), expr),
            values,
        ));
    }

    /// Replace the whole list with verbatim fragments that bind no values.
    pub fn replace_raw<S: Into<String>>(&mut self, fragments: impl IntoIterator<Item = S>) {
        self.fragments = fragments
            .into_iter()
            .map(|sql| BoundExpr::new(sql, Vec::new()))
            .collect();
    }

    /// Whether no fragment has been added.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// The fragments in append order.
    pub fn fragments(&self) -> &[BoundExpr] {
        &self.fragments
    }

    /// All bound values in append order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.fragments.iter().flat_map(|f| f.values.iter())
    }

    /// Append ` WHERE <fragments>` to `sql` and the bound values to `params`.
    ///
    /// Does nothing when the list is empty.
    pub fn write_where(&self, sql: &mut String, params: &mut Vec<Value>) {
        if self.fragments.is_empty() {
            return;
        }
        sql.push_str(" WHERE ");
        for (i, fragment) in self.fragments.iter().enumerate() {
            if i > 0 {
                sql.push(' ');
            }
            sql.push_str(&fragment.sql);
        }
        params.extend(self.values().cloned());
    }
}
