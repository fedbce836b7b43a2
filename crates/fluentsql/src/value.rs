//! Bound parameter values and typed decoding.
//!
//! Every parameter handed to a [`Session`](crate::Session) and every column
//! returned from it is a [`Value`]. Conversions *into* a `Value` go through the
//! standard `From` trait; conversions *out of* one go through [`FromValue`].

use crate::error::{StmtError, StmtResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::Serialize;
use std::fmt;

/// A scalar value bound to a `?` placeholder or read back from a result row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// SQL NULL.
    Null,
    /// Boolean value (MySQL stores these as `TINYINT(1)`).
    Bool(bool),
    /// Signed integer value.
    Int(i64),
    /// Unsigned integer value.
    UInt(u64),
    /// Floating point value.
    Float(f64),
    /// Text value. DECIMAL columns are also read back as text.
    Text(String),
    /// Binary value.
    Bytes(Vec<u8>),
    /// Calendar date.
    Date(NaiveDate),
    /// Time of day.
    Time(NaiveTime),
    /// Date and time without a zone.
    DateTime(NaiveDateTime),
    /// JSON document.
    Json(serde_json::Value),
}

impl Value {
    /// Whether this value is SQL NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short name of the variant, used in decode errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::UInt(_) => "unsigned int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::Date(_) => "date",
            Self::Time(_) => "time",
            Self::DateTime(_) => "datetime",
            Self::Json(_) => "json",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::UInt(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Self::Bytes(b) => write!(f, "<{} bytes>", b.len()),
            Self::Date(d) => write!(f, "'{d}'"),
            Self::Time(t) => write!(f, "'{t}'"),
            Self::DateTime(dt) => write!(f, "'{dt}'"),
            Self::Json(j) => write!(f, "'{j}'"),
        }
    }
}

/// Build an ordered parameter list from values of mixed types.
///
/// ```ignore
/// let stmt = fluentsql::select()
///     .from("posts")
///     .where_("author_id = ? AND status = ?", params![7, "draft"]);
/// ```
#[macro_export]
macro_rules! params {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($value)),+]
    };
}

macro_rules! impl_from_lossless {
    ($variant:ident($target:ty): $($source:ty),+) => {
        $(
            impl From<$source> for Value {
                fn from(value: $source) -> Self {
                    Value::$variant(<$target>::from(value))
                }
            }
        )+
    };
}

impl_from_lossless!(Int(i64): i8, i16, i32, i64);
impl_from_lossless!(UInt(u64): u8, u16, u32, u64);
impl_from_lossless!(Float(f64): f32, f64);

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::UInt(value as u64)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::Text(value.clone())
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Bytes(value.to_vec())
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::Date(value)
    }
}

impl From<NaiveTime> for Value {
    fn from(value: NaiveTime) -> Self {
        Value::Time(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::DateTime(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::DateTime(value.naive_utc())
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        Value::Json(value)
    }
}

impl From<uuid::Uuid> for Value {
    fn from(value: uuid::Uuid) -> Self {
        Value::Text(value.hyphenated().to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

/// Decode a [`Value`] into a Rust type.
///
/// `column` is only used to label errors.
pub trait FromValue: Sized {
    /// Convert a borrowed value into `Self`.
    fn from_value(value: &Value, column: &str) -> StmtResult<Self>;
}

fn mismatch(column: &str, expected: &str, value: &Value) -> StmtError {
    StmtError::decode(
        column,
        format!("expected {expected}, found {}", value.type_name()),
    )
}

impl FromValue for Value {
    fn from_value(value: &Value, _column: &str) -> StmtResult<Self> {
        Ok(value.clone())
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value, column: &str) -> StmtResult<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other, column).map(Some),
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value, column: &str) -> StmtResult<Self> {
        match value {
            Value::Int(n) => Ok(*n),
            Value::UInt(n) => i64::try_from(*n)
                .map_err(|_| StmtError::decode(column, format!("{n} overflows i64"))),
            Value::Bool(b) => Ok(i64::from(*b)),
            Value::Text(s) => s
                .trim()
                .parse()
                .map_err(|e| StmtError::decode(column, format!("invalid integer '{s}': {e}"))),
            other => Err(mismatch(column, "integer", other)),
        }
    }
}

impl FromValue for u64 {
    fn from_value(value: &Value, column: &str) -> StmtResult<Self> {
        match value {
            Value::UInt(n) => Ok(*n),
            Value::Int(n) => u64::try_from(*n)
                .map_err(|_| StmtError::decode(column, format!("{n} is negative"))),
            Value::Bool(b) => Ok(u64::from(*b)),
            Value::Text(s) => s
                .trim()
                .parse()
                .map_err(|e| StmtError::decode(column, format!("invalid integer '{s}': {e}"))),
            other => Err(mismatch(column, "unsigned integer", other)),
        }
    }
}

macro_rules! impl_from_value_narrow {
    ($wide:ty => $($narrow:ty),+) => {
        $(
            impl FromValue for $narrow {
                fn from_value(value: &Value, column: &str) -> StmtResult<Self> {
                    let wide = <$wide>::from_value(value, column)?;
                    <$narrow>::try_from(wide).map_err(|_| {
                        StmtError::decode(
                            column,
                            format!("{wide} out of range for {}", stringify!($narrow)),
                        )
                    })
                }
            }
        )+
    };
}

impl_from_value_narrow!(i64 => i8, i16, i32);
impl_from_value_narrow!(u64 => u8, u16, u32, usize);

impl FromValue for f64 {
    fn from_value(value: &Value, column: &str) -> StmtResult<Self> {
        match value {
            Value::Float(n) => Ok(*n),
            Value::Int(n) => Ok(*n as f64),
            Value::UInt(n) => Ok(*n as f64),
            Value::Text(s) => s
                .trim()
                .parse()
                .map_err(|e| StmtError::decode(column, format!("invalid number '{s}': {e}"))),
            other => Err(mismatch(column, "number", other)),
        }
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value, column: &str) -> StmtResult<Self> {
        f64::from_value(value, column).map(|n| n as f32)
    }
}

impl FromValue for bool {
    fn from_value(value: &Value, column: &str) -> StmtResult<Self> {
        match value {
            Value::Bool(b) => Ok(*b),
            Value::Int(n) => Ok(*n != 0),
            Value::UInt(n) => Ok(*n != 0),
            other => Err(mismatch(column, "bool", other)),
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value, column: &str) -> StmtResult<Self> {
        match value {
            Value::Text(s) => Ok(s.clone()),
            Value::Bytes(b) => String::from_utf8(b.clone())
                .map_err(|e| StmtError::decode(column, e.to_string())),
            Value::Json(j) => Ok(j.to_string()),
            other => Err(mismatch(column, "text", other)),
        }
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: &Value, column: &str) -> StmtResult<Self> {
        match value {
            Value::Bytes(b) => Ok(b.clone()),
            Value::Text(s) => Ok(s.clone().into_bytes()),
            other => Err(mismatch(column, "bytes", other)),
        }
    }
}

impl FromValue for NaiveDate {
    fn from_value(value: &Value, column: &str) -> StmtResult<Self> {
        match value {
            Value::Date(d) => Ok(*d),
            Value::DateTime(dt) => Ok(dt.date()),
            other => Err(mismatch(column, "date", other)),
        }
    }
}

impl FromValue for NaiveTime {
    fn from_value(value: &Value, column: &str) -> StmtResult<Self> {
        match value {
            Value::Time(t) => Ok(*t),
            other => Err(mismatch(column, "time", other)),
        }
    }
}

impl FromValue for NaiveDateTime {
    fn from_value(value: &Value, column: &str) -> StmtResult<Self> {
        match value {
            Value::DateTime(dt) => Ok(*dt),
            Value::Date(d) => Ok(d.and_time(NaiveTime::MIN)),
            other => Err(mismatch(column, "datetime", other)),
        }
    }
}

impl FromValue for DateTime<Utc> {
    fn from_value(value: &Value, column: &str) -> StmtResult<Self> {
        NaiveDateTime::from_value(value, column).map(|dt| dt.and_utc())
    }
}

impl FromValue for serde_json::Value {
    fn from_value(value: &Value, column: &str) -> StmtResult<Self> {
        match value {
            Value::Json(j) => Ok(j.clone()),
            Value::Text(s) => {
                serde_json::from_str(s).map_err(|e| StmtError::decode(column, e.to_string()))
            }
            Value::Null => Ok(serde_json::Value::Null),
            other => Err(mismatch(column, "json", other)),
        }
    }
}

impl FromValue for uuid::Uuid {
    fn from_value(value: &Value, column: &str) -> StmtResult<Self> {
        match value {
            Value::Text(s) => {
                uuid::Uuid::parse_str(s).map_err(|e| StmtError::decode(column, e.to_string()))
            }
            Value::Bytes(b) => {
                uuid::Uuid::from_slice(b).map_err(|e| StmtError::decode(column, e.to_string()))
            }
            other => Err(mismatch(column, "uuid", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_macro_mixes_types() {
        let params = params![5, "trash", None::<i32>, 1.5f64];
        assert_eq!(
            params,
            vec![
                Value::Int(5),
                Value::Text("trash".into()),
                Value::Null,
                Value::Float(1.5),
            ]
        );
        assert!(params![].is_empty());
    }

    #[test]
    fn unsigned_sources_stay_unsigned() {
        assert_eq!(Value::from(7u32), Value::UInt(7));
        assert_eq!(Value::from(7usize), Value::UInt(7));
    }

    #[test]
    fn uuid_binds_as_hyphenated_text() {
        let id = uuid::Uuid::nil();
        assert_eq!(
            Value::from(id),
            Value::Text("00000000-0000-0000-0000-000000000000".into())
        );
    }

    #[test]
    fn decimal_text_decodes_as_number() {
        assert_eq!(f64::from_value(&Value::Text("12.50".into()), "price").unwrap(), 12.5);
        assert_eq!(i64::from_value(&Value::Text("42".into()), "n").unwrap(), 42);
    }

    #[test]
    fn narrowing_checks_range() {
        assert_eq!(i32::from_value(&Value::Int(12), "n").unwrap(), 12);
        let err = i8::from_value(&Value::Int(1000), "n").unwrap_err();
        assert!(matches!(err, StmtError::Decode { ref column, .. } if column == "n"));
    }

    #[test]
    fn option_maps_null_to_none() {
        assert_eq!(Option::<i64>::from_value(&Value::Null, "n").unwrap(), None);
        assert_eq!(Option::<i64>::from_value(&Value::Int(3), "n").unwrap(), Some(3));
        assert!(i64::from_value(&Value::Null, "n").is_err());
    }

    #[test]
    fn tinyint_decodes_as_bool() {
        assert!(bool::from_value(&Value::Int(1), "active").unwrap());
        assert!(!bool::from_value(&Value::Int(0), "active").unwrap());
    }

    #[test]
    fn display_quotes_text() {
        assert_eq!(Value::Text("it's".into()).to_string(), "'it''s'");
        assert_eq!(Value::Null.to_string(), "NULL");
    }
}
