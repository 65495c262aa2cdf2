//! Coercion of decoded JSON values into typed comparison domains.

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

use crate::domain::ValueType;

/// Layout of `date` values.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Layout of `datetime` values.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Kind tag of a decoded JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonKind {
    /// `null`
    Null,
    /// `true` / `false`
    Boolean,
    /// Any JSON number.
    Number,
    /// A JSON string.
    String,
    /// A JSON array.
    Array,
    /// A JSON object.
    Object,
}

impl JsonKind {
    /// Returns the kind of `value`.
    #[must_use]
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        })
    }
}

/// A value coerced into the domain of its declared type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypedValue<'a> {
    /// Numbers are compared as `f64`.
    Integer(f64),
    /// Borrowed string content.
    String(&'a str),
    /// Day-granularity date.
    Date(NaiveDate),
    /// Second-granularity datetime.
    DateTime(NaiveDateTime),
    /// Boolean.
    Boolean(bool),
}

/// Why a value could not be coerced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    /// The JSON kind does not fit the declared type.
    #[error("expected {expected}, found {found}")]
    WrongKind {
        /// The declared type.
        expected: ValueType,
        /// The kind actually present.
        found: JsonKind,
    },

    /// An integer comparison value with a fractional part or out of range.
    #[error("{0} is not an integer")]
    NotIntegral(String),

    /// A string that does not follow the date or datetime layout.
    #[error("{value:?} does not match {expected} layout {layout}")]
    Unparseable {
        /// The declared type.
        expected: ValueType,
        /// The offending string.
        value: String,
        /// The strftime layout that was expected.
        layout: &'static str,
    },

    /// The declared type is not one of the supported five.
    #[error("unsupported value type")]
    UnsupportedType,
}

/// Coerces a record field value into the domain of `value_type`.
///
/// Any JSON number is accepted for [`ValueType::Integer`] and read as `f64`,
/// so a field holding `25.5` is compared as `25.5`.
///
/// # Errors
///
/// Returns a [`CoercionError`] when the kind is wrong or a date string does
/// not parse. Callers treat every error as "no match".
pub fn coerce_field(value: &Value, value_type: ValueType) -> Result<TypedValue<'_>, CoercionError> {
    match (value_type, value) {
        (ValueType::Integer, Value::Number(n)) => n
            .as_f64()
            .map(TypedValue::Integer)
            .ok_or_else(|| CoercionError::NotIntegral(n.to_string())),
        _ => coerce_common(value, value_type),
    }
}

/// Coerces a condition's comparison value into the domain of `value_type`.
///
/// Integer comparison values must be integral JSON numbers. They are widened
/// to `f64`, which loses precision beyond 2^53; two distinct integers of that
/// size may compare equal.
///
/// # Errors
///
/// Returns a [`CoercionError`] for wrong kinds, non-integral integers, and
/// unparseable date strings.
#[expect(
    clippy::cast_precision_loss,
    reason = "integer comparison values are widened to f64 to compare with field numbers"
)]
pub fn coerce_comparison(
    value: &Value,
    value_type: ValueType,
) -> Result<TypedValue<'_>, CoercionError> {
    match (value_type, value) {
        (ValueType::Integer, Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                Ok(TypedValue::Integer(i as f64))
            } else if let Some(u) = n.as_u64() {
                Ok(TypedValue::Integer(u as f64))
            } else {
                Err(CoercionError::NotIntegral(n.to_string()))
            }
        }
        _ => coerce_common(value, value_type),
    }
}

fn coerce_common(value: &Value, value_type: ValueType) -> Result<TypedValue<'_>, CoercionError> {
    match (value_type, value) {
        (ValueType::Unsupported, _) => Err(CoercionError::UnsupportedType),
        (ValueType::String, Value::String(s)) => Ok(TypedValue::String(s)),
        (ValueType::Boolean, Value::Bool(b)) => Ok(TypedValue::Boolean(*b)),
        (ValueType::Date, Value::String(s)) => NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(TypedValue::Date)
            .map_err(|_| unparseable(value_type, s, DATE_FORMAT)),
        (ValueType::DateTime, Value::String(s)) => {
            NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
                .map(TypedValue::DateTime)
                .map_err(|_| unparseable(value_type, s, DATETIME_FORMAT))
        }
        (expected, other) => Err(CoercionError::WrongKind {
            expected,
            found: JsonKind::of(other),
        }),
    }
}

fn unparseable(expected: ValueType, value: &str, layout: &'static str) -> CoercionError {
    CoercionError::Unparseable {
        expected,
        value: value.to_string(),
        layout,
    }
}
