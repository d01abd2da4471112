use proptest::prelude::*;
use service_core::query_builder::QueryOptions;

/// camelCase identifiers as they arrive in query strings
pub fn camel_identifier_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9]{0,30}"
}

/// Arbitrary direction strings, mostly not `ASC`/`DESC`
pub fn order_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("ASC".to_string()),
        Just("DESC".to_string()),
        Just("asc".to_string()),
        "[a-zA-Z ;]{0,12}",
    ]
}

/// Options with any limit, offset and direction
pub fn query_options_strategy() -> impl Strategy<Value = QueryOptions> {
    (any::<i64>(), any::<i64>(), order_strategy()).prop_map(|(limit, offset, order)| {
        QueryOptions {
            limit,
            offset,
            order,
            ..Default::default()
        }
    })
}

/// Page size strings: numeric in and out of range, plus junk
pub fn row_count_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (-1000i64..5000).prop_map(|n| n.to_string()),
        "[a-z]{0,5}",
    ]
}
