//! Row mapping traits and utilities

use crate::error::{StmtError, StmtResult};
use crate::value::{FromValue, Value};
use std::sync::Arc;

/// A single result row, independent of the driver that produced it.
///
/// Column names are shared between all rows of one result set.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl Row {
    /// Create a row from shared column names and the row's values.
    ///
    /// Missing trailing values read back as absent; extra values are kept
    /// but can only be reached by position.
    pub fn new(columns: Arc<[String]>, values: Vec<Value>) -> Self {
        Self { columns, values }
    }

    /// Column names in result order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All values in result order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Number of values in this row.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether this row has no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get a value by position or column name.
    pub fn get<I: RowIndex>(&self, index: I) -> Option<&Value> {
        index.position(self).and_then(|i| self.values.get(i))
    }

    /// Decode a value by position or column name.
    pub fn try_get<T: FromValue, I: RowIndex>(&self, index: I) -> StmtResult<T> {
        let label = index.label(self);
        let value = self
            .get(index)
            .ok_or_else(|| StmtError::decode(label.clone(), "no such column"))?;
        T::from_value(value, &label)
    }

    /// Consume the row, returning its values.
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// Render the row as a JSON object keyed by column name.
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::with_capacity(self.values.len());
        for (i, value) in self.values.iter().enumerate() {
            let key = self
                .columns
                .get(i)
                .cloned()
                .unwrap_or_else(|| i.to_string());
            let json = serde_json::to_value(value).unwrap_or(serde_json::Value::Null);
            map.insert(key, json);
        }
        serde_json::Value::Object(map)
    }
}

/// Something that selects a column of a [`Row`]: a position or a name.
pub trait RowIndex {
    /// Resolve to a position within the row.
    fn position(&self, row: &Row) -> Option<usize>;

    /// Human-readable label used in decode errors.
    fn label(&self, row: &Row) -> String;
}

impl RowIndex for usize {
    fn position(&self, _row: &Row) -> Option<usize> {
        Some(*self)
    }

    fn label(&self, row: &Row) -> String {
        row.columns
            .get(*self)
            .cloned()
            .unwrap_or_else(|| format!("#{self}"))
    }
}

impl RowIndex for &str {
    fn position(&self, row: &Row) -> Option<usize> {
        row.columns.iter().position(|c| c == self)
    }

    fn label(&self, _row: &Row) -> String {
        (*self).to_string()
    }
}

/// Trait for converting a result row into a Rust type.
///
/// # Example
///
/// ```ignore
/// use fluentsql::{FromRow, Row, StmtResult};
///
/// struct Post {
///     id: i64,
///     title: String,
/// }
///
/// impl FromRow for Post {
///     fn from_row(row: &Row) -> StmtResult<Self> {
///         Ok(Self {
///             id: row.try_get("id")?,
///             title: row.try_get("title")?,
///         })
///     }
/// }
/// ```
pub trait FromRow: Sized {
    /// Convert a result row into Self
    fn from_row(row: &Row) -> StmtResult<Self>;
}

impl FromRow for Row {
    fn from_row(row: &Row) -> StmtResult<Self> {
        Ok(row.clone())
    }
}

macro_rules! impl_from_row_tuple {
    ($($ty:ident => $idx:tt),+) => {
        impl<$($ty: FromValue),+> FromRow for ($($ty,)+) {
            fn from_row(row: &Row) -> StmtResult<Self> {
                Ok(($(row.try_get::<$ty, usize>($idx)?,)+))
            }
        }
    };
}

impl_from_row_tuple!(A => 0);
impl_from_row_tuple!(A => 0, B => 1);
impl_from_row_tuple!(A => 0, B => 1, C => 2);
impl_from_row_tuple!(A => 0, B => 1, C => 2, D => 3);
impl_from_row_tuple!(A => 0, B => 1, C => 2, D => 3, E => 4);
impl_from_row_tuple!(A => 0, B => 1, C => 2, D => 3, E => 4, F => 5);
