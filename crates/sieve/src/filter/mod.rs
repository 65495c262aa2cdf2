//! Typed predicate evaluation.
//!
//! Evaluation is layered: [`coerce`] turns a raw JSON value into a typed
//! value, [`evaluate`] applies one operator, and [`matches`] ANDs a list of
//! conditions over a record.
//!
//! Malformed data fails closed. A missing field, a value of the wrong JSON
//! kind, or a date string in the wrong layout makes its condition false;
//! none of these are errors.

pub mod coerce;
mod evaluate;
mod matcher;

pub use coerce::{CoercionError, JsonKind, TypedValue};
pub use evaluate::evaluate;
pub use matcher::{filter_records, matches};
