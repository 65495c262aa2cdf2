//! Property tests for the record matcher.

use proptest::prelude::*;
use serde_json::json;
use sieve::domain::{FilterCondition, Operator, Record};
use sieve::filter::matches;

fn condition_pool() -> Vec<FilterCondition> {
    vec![
        FilterCondition::integer("age", Operator::Gt, 30),
        FilterCondition::integer("age", Operator::Le, 60),
        FilterCondition::string("fullname", Operator::Contains, "James"),
        FilterCondition::string("fullname", Operator::Eq, "James Smith"),
        FilterCondition::boolean("active", Operator::Eq, true),
        FilterCondition::date("joined", Operator::Ge, "2020-01-01"),
        FilterCondition::datetime("seen", Operator::Lt, "2024-06-01 00:00:00"),
        FilterCondition::integer("missing", Operator::Eq, 1),
    ]
}

fn record() -> impl Strategy<Value = Record> {
    (
        0i64..100,
        prop::sample::select(vec!["James Brown", "Alice Jameson", "James Smith", "Bob"]),
        any::<bool>(),
        prop::sample::select(vec!["2019-12-31", "2020-01-01", "2023-07-04", "not a date"]),
        prop::sample::select(vec!["2024-05-31 23:59:59", "2024-06-01 00:00:00", "2024-06-01"]),
    )
        .prop_map(|(age, fullname, active, joined, seen)| {
            let value = json!({
                "age": age,
                "fullname": fullname,
                "active": active,
                "joined": joined,
                "seen": seen,
            });
            value.as_object().cloned().unwrap_or_default()
        })
}

fn conditions_and_permutation() -> impl Strategy<Value = (Vec<FilterCondition>, Vec<FilterCondition>)>
{
    let pool = condition_pool();
    let len = pool.len();
    prop::sample::subsequence(pool, 0..=len)
        .prop_flat_map(|picked| (Just(picked.clone()), Just(picked).prop_shuffle()))
}

proptest! {
    #[test]
    fn reordering_conditions_does_not_change_the_result(
        record in record(),
        (conditions, shuffled) in conditions_and_permutation(),
    ) {
        prop_assert_eq!(matches(&record, &conditions), matches(&record, &shuffled));
    }

    #[test]
    fn a_conjunction_matches_only_if_every_condition_does(
        record in record(),
        (conditions, _) in conditions_and_permutation(),
    ) {
        let each = conditions
            .iter()
            .all(|c| matches(&record, std::slice::from_ref(c)));
        prop_assert_eq!(matches(&record, &conditions), each);
    }
}
