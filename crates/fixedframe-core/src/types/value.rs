//! Scalar values that can be stored in record fields.
//!
//! This module provides the [`FieldValue`] enum, the closed set of values a scalar
//! field can hold, and the [`Scalar`] trait that maps Rust types onto it.
//!
//! # Example
//!
//! ```
//! use fixedframe_core::{FieldValue, ValueType};
//!
//! // Create values via From trait
//! let name: FieldValue = "Alice".into();
//! let age: FieldValue = 30i64.into();
//! let active: FieldValue = true.into();
//!
//! // Access typed values
//! assert_eq!(name.as_text(), Some("Alice"));
//! assert_eq!(age.as_integer(), Some(30));
//! assert_eq!(active.value_type(), ValueType::Boolean);
//! ```

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{FrameError, FrameResult};
use crate::schema::ValueType;

/// A value held by a scalar field.
///
/// | Variant | Rust Type | Byte form |
/// |---------|-----------|-----------|
/// | `Text` | `String` | bytes in the field's charset |
/// | `Integer` | `i64` | decimal text |
/// | `Float` | `f32` | decimal text |
/// | `Double` | `f64` | decimal text |
/// | `Boolean` | `bool` | `1` or `0` |
/// | `Temporal` | `NaiveDateTime` | text produced by the field's formatter |
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Text value
    Text(String),
    /// 64-bit signed integer
    Integer(i64),
    /// 32-bit floating point number
    Float(f32),
    /// 64-bit floating point number
    Double(f64),
    /// Boolean flag
    Boolean(bool),
    /// Date and time without a time zone
    Temporal(NaiveDateTime),
}

impl FieldValue {
    /// Returns the value type tag of this value.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::Text(_) => ValueType::Text,
            Self::Integer(_) => ValueType::Integer,
            Self::Float(_) => ValueType::Float,
            Self::Double(_) => ValueType::Double,
            Self::Boolean(_) => ValueType::Boolean,
            Self::Temporal(_) => ValueType::Temporal,
        }
    }

    /// Returns the text if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer if this is an integer value.
    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the float if this is a float value.
    #[must_use]
    pub const fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the double if this is a double value.
    #[must_use]
    pub const fn as_double(&self) -> Option<f64> {
        match self {
            Self::Double(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the flag if this is a boolean value.
    #[must_use]
    pub const fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the timestamp if this is a temporal value.
    #[must_use]
    pub const fn as_temporal(&self) -> Option<&NaiveDateTime> {
        match self {
            Self::Temporal(t) => Some(t),
            _ => None,
        }
    }

    /// Returns a copy with trailing spaces removed from text values.
    ///
    /// Decoding keeps a text field's padding; callers that want the logical value
    /// without it use this. Non-text values are returned unchanged.
    #[must_use]
    pub fn trimmed(&self) -> Self {
        match self {
            Self::Text(s) => Self::Text(s.trim_end_matches(' ').to_owned()),
            other => other.clone(),
        }
    }

    /// Converts this value into the Rust type a record stores for `field`.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::UnsupportedType`] if the value's type does not match
    /// `T`'s value type.
    pub fn extract<T: Scalar>(self, record: &str, field: &str) -> FrameResult<T> {
        T::from_value(self).map_err(|value| {
            FrameError::unsupported_type(record, field, T::VALUE_TYPE, value.value_type())
        })
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Temporal(t) => write!(f, "{t}"),
        }
    }
}

/// A Rust type that maps onto exactly one [`FieldValue`] variant.
///
/// Hand-written [`Record`](crate::Record) implementations use this through
/// [`FieldValue::extract`] to turn decoded values back into their field types.
pub trait Scalar: Sized + Into<FieldValue> {
    /// The value type this Rust type corresponds to.
    const VALUE_TYPE: ValueType;

    /// Unwraps the matching variant, handing the value back otherwise.
    ///
    /// # Errors
    ///
    /// Returns the original value if its variant does not match.
    fn from_value(value: FieldValue) -> Result<Self, FieldValue>;
}

macro_rules! scalar_type {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for FieldValue {
            #[inline]
            fn from(v: $ty) -> Self {
                Self::$variant(v)
            }
        }

        impl Scalar for $ty {
            const VALUE_TYPE: ValueType = ValueType::$variant;

            fn from_value(value: FieldValue) -> Result<Self, FieldValue> {
                match value {
                    FieldValue::$variant(v) => Ok(v),
                    other => Err(other),
                }
            }
        }
    };
}

scalar_type!(String, Text);
scalar_type!(i64, Integer);
scalar_type!(f32, Float);
scalar_type!(f64, Double);
scalar_type!(bool, Boolean);
scalar_type!(NaiveDateTime, Temporal);

impl From<&str> for FieldValue {
    #[inline]
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<NaiveDate> for FieldValue {
    #[inline]
    fn from(d: NaiveDate) -> Self {
        Self::Temporal(d.and_time(NaiveTime::default()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn from_primitives() {
        assert_eq!(FieldValue::from("ab"), FieldValue::Text("ab".to_owned()));
        assert_eq!(FieldValue::from(7i64), FieldValue::Integer(7));
        assert_eq!(FieldValue::from(1.5f32), FieldValue::Float(1.5));
        assert_eq!(FieldValue::from(2.5f64), FieldValue::Double(2.5));
        assert_eq!(FieldValue::from(false), FieldValue::Boolean(false));
    }

    #[test]
    fn date_converts_to_midnight() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let value = FieldValue::from(date);
        let ts = value.as_temporal().unwrap();
        assert_eq!(ts.date(), date);
        assert_eq!(ts.time(), NaiveTime::from_hms_opt(0, 0, 0).unwrap());
    }

    #[test]
    fn extract_matching_type() {
        let n: i64 = FieldValue::Integer(12).extract("R", "n").unwrap();
        assert_eq!(n, 12);
        let s: String = FieldValue::from("x").extract("R", "s").unwrap();
        assert_eq!(s, "x");
    }

    #[test]
    fn extract_mismatched_type() {
        let err = FieldValue::Text("12".to_owned()).extract::<i64>("R", "n").unwrap_err();
        match err {
            FrameError::UnsupportedType { expected, actual, .. } => {
                assert_eq!(expected, ValueType::Integer);
                assert_eq!(actual, ValueType::Text);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn trimmed_strips_only_trailing_spaces() {
        assert_eq!(FieldValue::from(" ab  ").trimmed(), FieldValue::from(" ab"));
        assert_eq!(FieldValue::Integer(3).trimmed(), FieldValue::Integer(3));
    }
}
