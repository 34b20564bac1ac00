//! Property-based tests for merging and resolution.

use super::environment::BuildEnvironment;
use super::merger::ConfigMerger;
use super::resolver::ConfigResolver;
use crate::record::ConfigRecord;
use proptest::prelude::*;
use serde_json::{Map, Value};

// Strategy for leaf values
fn leaf_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(Value::from),
        "[a-z/\\[\\]:.]{0,12}".prop_map(Value::String),
    ]
}

// Strategy for nested values; keys drawn from a small alphabet so that
// base and overlay collide often.
fn value_strategy() -> impl Strategy<Value = Value> {
    leaf_strategy().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-e]", inner, 0..6)
                .prop_map(|m| Value::Object(m.into_iter().collect::<Map<String, Value>>())),
        ]
    })
}

fn record_strategy() -> impl Strategy<Value = ConfigRecord> {
    prop::collection::btree_map("[a-e]", value_strategy(), 0..6)
        .prop_map(|m| m.into_iter().collect::<ConfigRecord>())
}

/// Every key in the overlay wins, recursively; every other key keeps the base value.
fn assert_overlay_wins(base: &Map<String, Value>, overlay: &Map<String, Value>, merged: &Map<String, Value>) {
    for (key, overlay_value) in overlay {
        let merged_value = merged.get(key).expect("overlay key present");
        match (base.get(key), overlay_value) {
            (Some(Value::Object(b)), Value::Object(o)) => {
                let m = merged_value.as_object().expect("nested records stay records");
                assert_overlay_wins(b, o, m);
            }
            _ => assert_eq!(merged_value, overlay_value),
        }
    }
    for (key, base_value) in base {
        if !overlay.contains_key(key) {
            assert_eq!(merged.get(key), Some(base_value));
        }
    }
    for key in merged.keys() {
        assert!(base.contains_key(key) || overlay.contains_key(key));
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Overlay values win, base values survive where the overlay is silent
    #[test]
    fn deep_merge_overlay_wins(base in record_strategy(), overlay in record_strategy()) {
        let merged = ConfigMerger::deep_merge(&base, &overlay);
        assert_overlay_wins(base.as_map(), overlay.as_map(), merged.as_map());
    }

    // Merging with an empty overlay is the identity
    #[test]
    fn empty_overlay_is_identity(base in record_strategy()) {
        prop_assert_eq!(ConfigMerger::deep_merge(&base, &ConfigRecord::new()), base);
    }

    // Merging into an empty base yields the overlay
    #[test]
    fn empty_base_yields_overlay(overlay in record_strategy()) {
        prop_assert_eq!(ConfigMerger::deep_merge(&ConfigRecord::new(), &overlay), overlay);
    }

    // Applying the same overlay twice changes nothing more
    #[test]
    fn overlay_application_is_idempotent(base in record_strategy(), overlay in record_strategy()) {
        let once = ConfigMerger::deep_merge(&base, &overlay);
        let twice = ConfigMerger::deep_merge(&once, &overlay);
        prop_assert_eq!(once, twice);
    }

    // Resolution selects exactly one overlay and is deterministic
    #[test]
    fn resolve_selects_matching_overlay(
        base in record_strategy(),
        dev in record_strategy(),
        prod in record_strategy(),
        indicator in prop_oneof![Just("development".to_string()), "[a-z]{0,12}"],
    ) {
        let resolver = ConfigResolver::new(base.clone(), dev.clone(), prod.clone());
        let env = BuildEnvironment::from_indicator(&indicator);
        let expected_overlay = if indicator == "development" { &dev } else { &prod };

        let first = resolver.resolve(env);
        let second = resolver.resolve(env);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first, ConfigMerger::deep_merge(&base, expected_overlay));
    }

    // merge_all over two layers is deep_merge
    #[test]
    fn merge_all_agrees_with_deep_merge(base in record_strategy(), overlay in record_strategy()) {
        prop_assert_eq!(
            ConfigMerger::merge_all(&[&base, &overlay]),
            ConfigMerger::deep_merge(&base, &overlay)
        );
    }
}
