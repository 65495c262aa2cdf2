//! Domain types for keyed NDJSON filtering.
//!
//! This module contains the record representation, the operating mode of a
//! [`DataManager`](crate::manager::DataManager), and the structured filter
//! conditions callers build queries from.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// One decoded line of the source: field name to JSON value.
///
/// Values keep the shape the JSON decoder gave them. In particular every
/// JSON number stays a number; integer coercion happens at evaluation time.
pub type Record = sieve_jsonl::Object;

/// How a [`DataManager`](crate::manager::DataManager) reads its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Load the whole source into a keyed dataset plus index.
    #[serde(alias = "in-memory", alias = "inmemory")]
    Materializing,

    /// Evaluate conditions line by line, keeping only matches.
    #[serde(alias = "split")]
    Streaming,
}

impl Mode {
    /// Returns the configuration name of this mode.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Materializing => "materializing",
            Self::Streaming => "streaming",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared type of a condition's field and comparison value.
///
/// Unknown type names deserialize to [`ValueType::Unsupported`], which never
/// matches anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum ValueType {
    /// JSON number, compared as `f64`.
    Integer,
    /// JSON string.
    String,
    /// `YYYY-MM-DD` string.
    Date,
    /// `YYYY-MM-DD HH:MM:SS` string.
    DateTime,
    /// JSON boolean.
    Boolean,
    /// Any name not listed above.
    Unsupported,
}

impl ValueType {
    /// Maps a type name to a `ValueType`, accepting short aliases.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "integer" | "int" => Self::Integer,
            "string" | "str" => Self::String,
            "date" => Self::Date,
            "datetime" => Self::DateTime,
            "boolean" | "bool" => Self::Boolean,
            _ => Self::Unsupported,
        }
    }

    /// Returns the canonical name of this type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::String => "string",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Boolean => "boolean",
            Self::Unsupported => "unsupported",
        }
    }
}

impl From<String> for ValueType {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparison operator of a condition.
///
/// Which operators apply depends on the declared type; see
/// [`Operator::applies_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum Operator {
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `==`
    Eq,
    /// `contains` (substring match)
    Contains,
    /// Any symbol not listed above.
    Unsupported,
}

impl Operator {
    /// Maps an operator symbol to an `Operator`.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Self {
        match symbol.trim() {
            ">" => Self::Gt,
            ">=" => Self::Ge,
            "<" => Self::Lt,
            "<=" => Self::Le,
            "==" => Self::Eq,
            "contains" => Self::Contains,
            _ => Self::Unsupported,
        }
    }

    /// Returns the symbol of this operator.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Eq => "==",
            Self::Contains => "contains",
            Self::Unsupported => "unsupported",
        }
    }

    /// Whether this operator is defined for `value_type`.
    ///
    /// | type | operators |
    /// |---|---|
    /// | integer, date, datetime | `>` `>=` `<` `<=` `==` |
    /// | string | `==` `contains` |
    /// | boolean | `==` |
    #[must_use]
    pub fn applies_to(self, value_type: ValueType) -> bool {
        match value_type {
            ValueType::Integer | ValueType::Date | ValueType::DateTime => {
                matches!(self, Self::Gt | Self::Ge | Self::Lt | Self::Le | Self::Eq)
            }
            ValueType::String => matches!(self, Self::Eq | Self::Contains),
            ValueType::Boolean => self == Self::Eq,
            ValueType::Unsupported => false,
        }
    }
}

impl From<String> for Operator {
    fn from(symbol: String) -> Self {
        Self::from_symbol(&symbol)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single typed predicate on one field.
///
/// A query is a list of conditions combined with logical AND.
///
/// # Examples
///
/// ```
/// use sieve::domain::{FilterCondition, Operator};
///
/// let conditions = vec![
///     FilterCondition::integer("age", Operator::Gt, 30),
///     FilterCondition::string("fullname", Operator::Contains, "James"),
/// ];
/// assert_eq!(conditions[0].to_string(), "age > 30 (integer)");
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FilterCondition {
    /// Name of the record field to test.
    pub field: String,

    /// Declared type of the field and comparison value.
    #[serde(rename = "type")]
    pub value_type: ValueType,

    /// Comparison operator.
    #[serde(rename = "op")]
    pub operator: Operator,

    /// Value to compare against.
    pub value: Value,
}

impl FilterCondition {
    /// Creates a condition from its parts.
    pub fn new(
        field: impl Into<String>,
        value_type: ValueType,
        operator: Operator,
        value: impl Into<Value>,
    ) -> Self {
        Self {
            field: field.into(),
            value_type,
            operator,
            value: value.into(),
        }
    }

    /// Integer condition.
    pub fn integer(field: impl Into<String>, operator: Operator, value: i64) -> Self {
        Self::new(field, ValueType::Integer, operator, value)
    }

    /// String condition.
    pub fn string(field: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Self::new(field, ValueType::String, operator, value.into())
    }

    /// Date condition; `value` uses the `YYYY-MM-DD` layout.
    pub fn date(field: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Self::new(field, ValueType::Date, operator, value.into())
    }

    /// Datetime condition; `value` uses the `YYYY-MM-DD HH:MM:SS` layout.
    pub fn datetime(
        field: impl Into<String>,
        operator: Operator,
        value: impl Into<String>,
    ) -> Self {
        Self::new(field, ValueType::DateTime, operator, value.into())
    }

    /// Boolean condition.
    pub fn boolean(field: impl Into<String>, operator: Operator, value: bool) -> Self {
        Self::new(field, ValueType::Boolean, operator, value)
    }
}

impl fmt::Display for FilterCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.field, self.operator, self.value, self.value_type
        )
    }
}
