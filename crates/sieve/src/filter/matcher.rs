//! AND-composition of conditions over a record.

use super::evaluate::evaluate;
use crate::domain::{FilterCondition, Record};

/// Returns `true` if `record` satisfies every condition.
///
/// A condition whose field is absent from the record fails the whole match.
/// Evaluation stops at the first failing condition. An empty condition list
/// matches every record.
#[must_use]
pub fn matches(record: &Record, conditions: &[FilterCondition]) -> bool {
    conditions.iter().all(|condition| {
        record.get(&condition.field).is_some_and(|value| {
            evaluate(
                value,
                condition.operator,
                &condition.value,
                condition.value_type,
            )
        })
    })
}

/// Clones every record from `records` that satisfies `conditions`.
pub fn filter_records<'a, I>(records: I, conditions: &[FilterCondition]) -> Vec<Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .filter(|record| matches(record, conditions))
        .cloned()
        .collect()
}
