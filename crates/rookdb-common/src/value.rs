//! Runtime value representation for RookDB
//!
//! The `Value` enum represents any scalar that can be stored in a column or
//! used as an index key. Comparison and on-disk encoding dispatch on the
//! declared column type, so callers must supply values whose variant matches
//! the column they target.

use crate::types::DataType;
use std::cmp::Ordering;
use std::fmt;

/// Runtime value representation
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// 32-bit signed integer
    Int32(i32),
    /// 64-bit signed integer
    Int64(i64),
    /// 32-bit floating point
    Float(f32),
    /// 64-bit floating point
    Double(f64),
    /// String, stored fixed-width (256 bytes) on disk
    Varchar(String),
    /// Boolean value
    Boolean(bool),
}

impl Value {
    /// Returns the data type of this value
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Int32(_) => DataType::Int32,
            Value::Int64(_) => DataType::Int64,
            Value::Float(_) => DataType::Float,
            Value::Double(_) => DataType::Double,
            Value::Varchar(_) => DataType::Varchar,
            Value::Boolean(_) => DataType::Boolean,
        }
    }

    /// Numeric view of this value, used by column aggregation.
    /// Strings and booleans have no numeric interpretation.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int32(v) => Some(*v as f64),
            Value::Int64(v) => Some(*v as f64),
            Value::Float(v) => Some(*v as f64),
            Value::Double(v) => Some(*v),
            Value::Varchar(_) | Value::Boolean(_) => None,
        }
    }

    /// Order two values of the same variant by the natural order of the
    /// underlying scalar. Floats that do not compare (NaN) are treated as
    /// equal. Values of different variants fall back to a fixed tag order;
    /// the engine never produces such comparisons because keys within one
    /// index share a declared type.
    pub fn compare(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Int32(a), Value::Int32(b)) => a.cmp(b),
            (Value::Int64(a), Value::Int64(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Value::Double(a), Value::Double(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Value::Varchar(a), Value::Varchar(b)) => a.cmp(b),
            (Value::Boolean(a), Value::Boolean(b)) => a.cmp(b),
            _ => self.data_type().to_byte().cmp(&other.data_type().to_byte()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int32(v) => write!(f, "{}", v),
            Value::Int64(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
            Value::Varchar(v) => write!(f, "{}", v),
            Value::Boolean(v) => write!(f, "{}", v),
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Varchar(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Varchar(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type() {
        assert_eq!(Value::Int32(1).data_type(), DataType::Int32);
        assert_eq!(Value::Varchar("x".into()).data_type(), DataType::Varchar);
        assert_eq!(Value::Boolean(true).data_type(), DataType::Boolean);
    }

    #[test]
    fn test_compare_same_variant() {
        assert_eq!(Value::Int32(1).compare(&Value::Int32(2)), Ordering::Less);
        assert_eq!(
            Value::Double(2.5).compare(&Value::Double(2.5)),
            Ordering::Equal
        );
        assert_eq!(
            Value::Varchar("b".into()).compare(&Value::Varchar("a".into())),
            Ordering::Greater
        );
    }

    #[test]
    fn test_as_f64() {
        assert_eq!(Value::Int32(3).as_f64(), Some(3.0));
        assert_eq!(Value::Double(1.5).as_f64(), Some(1.5));
        assert_eq!(Value::Varchar("x".into()).as_f64(), None);
        assert_eq!(Value::Boolean(true).as_f64(), None);
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(Value::from(7i32), Value::Int32(7));
        assert_eq!(Value::from(7i64), Value::Int64(7));
        assert_eq!(Value::from("hi"), Value::Varchar("hi".to_string()));
        assert_eq!(Value::from(false), Value::Boolean(false));
    }
}
