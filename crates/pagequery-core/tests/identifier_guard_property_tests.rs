//! Property tests for the identifier guard and resolver

use pagequery_core::query_id::{to_number, validate};
use pagequery_core::{
    resolve, use_static_query, ContextRegistry, DataSnapshot, EnvironmentCapabilities, QueryError,
    QueryId, QueryResult,
};
use proptest::prelude::*;
use serde_json::json;
use std::sync::Arc;

proptest! {
    #[test]
    fn prop_integer_ids_always_validate(id in any::<u64>()) {
        let text = id.to_string();
        let validated = validate(&text).unwrap();
        prop_assert_eq!(validated.as_str(), text.as_str());
        prop_assert_eq!(validated, QueryId::from(id));
    }

    #[test]
    fn prop_text_with_letters_is_rejected(text in "[a-zA-Z_][a-zA-Z0-9_ {}]*") {
        prop_assume!(text.trim() != "Infinity");
        let err = validate(&text).unwrap_err();
        let is_not_compiled = matches!(err, QueryError::QueryNotCompiled { .. });
        prop_assert!(is_not_compiled);
    }

    #[test]
    fn prop_decimal_text_matches_f64_parse(value in -1.0e12f64..1.0e12f64) {
        let text = value.to_string();
        prop_assert_eq!(to_number(&text), value);
    }

    #[test]
    fn prop_nan_handle_never_reaches_lookup(text in "[g-z]{1,12}") {
        // A snapshot keyed by the raw text must still not be consulted
        let mut snapshot = DataSnapshot::new();
        snapshot.insert(QueryId::from(1u64), QueryResult::new(json!(1)));
        let registry = ContextRegistry::new(EnvironmentCapabilities::default(), Arc::new(snapshot));
        let scope = registry.client_scope();

        let err = use_static_query(&scope, &text).unwrap_err();
        let is_not_compiled = matches!(err, QueryError::QueryNotCompiled { .. });
        prop_assert!(is_not_compiled);
    }

    #[test]
    fn prop_present_payload_resolves_unchanged(id in any::<u32>(), n in any::<i64>()) {
        let snapshot = DataSnapshot::new().with_entry(id, QueryResult::new(json!({"n": n})));
        let payload = resolve(&QueryId::from(id), &snapshot).unwrap();
        prop_assert_eq!(payload, &json!({"n": n}));
    }

    #[test]
    fn prop_absent_id_is_unavailable(id in any::<u32>()) {
        let snapshot = DataSnapshot::new().with_entry(id.wrapping_add(1), QueryResult::new(json!(0)));
        let err = resolve(&QueryId::from(id), &snapshot).unwrap_err();
        prop_assert_eq!(err, QueryError::DataUnavailable { query_id: id.to_string() });
    }
}
