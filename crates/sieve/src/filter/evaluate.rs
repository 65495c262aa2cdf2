//! Evaluation of a single typed condition against one field value.

use serde_json::Value;

use super::coerce::{TypedValue, coerce_comparison, coerce_field};
use crate::domain::{Operator, ValueType};

/// Evaluates `field_value <operator> comparison_value` under `value_type`.
///
/// Returns `false` when the operator is not defined for the type, when the
/// type is unsupported, or when either side fails coercion. It never panics
/// and never returns an error.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use sieve::domain::{Operator, ValueType};
/// use sieve::filter::evaluate;
///
/// assert!(evaluate(&json!(35), Operator::Gt, &json!(30), ValueType::Integer));
/// assert!(!evaluate(&json!("true"), Operator::Eq, &json!(true), ValueType::Boolean));
/// ```
#[must_use]
pub fn evaluate(
    field_value: &Value,
    operator: Operator,
    comparison_value: &Value,
    value_type: ValueType,
) -> bool {
    if !operator.applies_to(value_type) {
        return false;
    }
    let (Ok(lhs), Ok(rhs)) = (
        coerce_field(field_value, value_type),
        coerce_comparison(comparison_value, value_type),
    ) else {
        return false;
    };

    match (lhs, rhs) {
        (TypedValue::Integer(a), TypedValue::Integer(b)) => compare(a, operator, b),
        (TypedValue::Date(a), TypedValue::Date(b)) => compare(a, operator, b),
        (TypedValue::DateTime(a), TypedValue::DateTime(b)) => compare(a, operator, b),
        (TypedValue::String(a), TypedValue::String(b)) => match operator {
            Operator::Eq => a == b,
            Operator::Contains => a.contains(b),
            _ => false,
        },
        (TypedValue::Boolean(a), TypedValue::Boolean(b)) => operator == Operator::Eq && a == b,
        _ => false,
    }
}

fn compare<T: PartialOrd>(lhs: T, operator: Operator, rhs: T) -> bool {
    match operator {
        Operator::Gt => lhs > rhs,
        Operator::Ge => lhs >= rhs,
        Operator::Lt => lhs < rhs,
        Operator::Le => lhs <= rhs,
        Operator::Eq => lhs == rhs,
        Operator::Contains | Operator::Unsupported => false,
    }
}
