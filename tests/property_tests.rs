//! Property-based tests for the document store and default merging.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated documents.

use proptest::prelude::*;
use tempfile::TempDir;

use nexus::core::merge::deep_merge;
use nexus::core::store::{resolve, MissingKeyPolicy, TomlStore};
use nexus::core::types::{Document, Value};

/// Strategy for generating table keys that are valid dotted-path segments.
fn segment() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,6}"
}

/// Strategy for generating leaf values.
fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::Integer),
        (-1.0e6..1.0e6f64).prop_map(Value::Float),
        any::<bool>().prop_map(Value::Boolean),
        "[a-zA-Z0-9 _.-]{0,12}".prop_map(Value::String),
        prop::collection::vec(any::<i64>().prop_map(Value::Integer), 0..4).prop_map(Value::Array),
    ]
}

/// Strategy for generating values, including nested tables.
fn value() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(3, 24, 4, |inner| {
        prop::collection::btree_map(segment(), inner, 0..4)
            .prop_map(|m| Value::Table(m.into_iter().collect()))
    })
}

/// Strategy for generating whole documents.
fn document() -> impl Strategy<Value = Document> {
    prop::collection::btree_map(segment(), value(), 0..6).prop_map(|m| m.into_iter().collect())
}

fn store_in(temp: &TempDir) -> TomlStore {
    TomlStore::open(temp.path().join("p.toml"), true, MissingKeyPolicy::Error).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Any document round-trips through the backing file.
    #[test]
    fn dump_load_roundtrip(doc in document()) {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);

        store.dump(&doc).unwrap();
        prop_assert_eq!(store.load().unwrap(), doc);
    }

    /// Every enumerated key reads back exactly what was stored, type included.
    #[test]
    fn every_key_reads_back(doc in document()) {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        store.dump(&doc).unwrap();

        for key in store.keys(false).unwrap() {
            let expected = resolve(&doc, &key).cloned();
            prop_assert!(expected.is_some());
            prop_assert_eq!(store.get(&key).unwrap(), expected);
        }
    }

    /// Setting a leaf over a leaf always reads back the new value.
    #[test]
    fn set_leaf_then_get(doc in document(), replacement in leaf()) {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        store.dump(&doc).unwrap();

        for key in store.keys(true).unwrap() {
            store.set(&key, Some(replacement.clone())).unwrap();
            prop_assert_eq!(store.get(&key).unwrap(), Some(replacement.clone()));
        }
    }

    /// Merging defaults a second time changes nothing.
    #[test]
    fn merge_idempotent(base in document(), overlay in document()) {
        let once = deep_merge(base.clone(), overlay);
        let twice = deep_merge(base, once.clone());
        prop_assert_eq!(once, twice);
    }

    /// Every overlay leaf survives a merge unchanged.
    #[test]
    fn merge_keeps_overlay_values(base in document(), overlay in document()) {
        let merged = deep_merge(base, overlay.clone());
        for (key, value) in &overlay {
            if !value.is_table() {
                prop_assert_eq!(merged.get(key), Some(value));
            }
        }
    }
}
