//! core::merge
//!
//! Layering of default documents under existing ones.
//!
//! # Precedence
//!
//! The overlay always wins. For every key of the base:
//! - absent from the overlay: copied from the base
//! - a table on both sides: merged recursively
//! - anything else: the overlay value is kept as-is, even if the base holds
//!   a table there or the overlay holds a table where the base has a leaf
//!
//! Keys only present in the overlay are kept untouched. Unlike
//! [`TomlStore::set`](crate::core::store::TomlStore::set), merging applies
//! no table/leaf consistency check.

use crate::core::types::{Document, Value};

/// Merge `base` underneath `overlay`.
///
/// The result keeps the base's key order, followed by overlay-only keys in
/// overlay order. A newly introduced default therefore lands where the
/// defaults declare it.
pub fn deep_merge(base: Document, overlay: Document) -> Document {
    let mut merged = base;

    for (key, overlay_value) in overlay {
        match overlay_value {
            Value::Table(overlay_table) => match merged.get_mut(&key) {
                Some(Value::Table(base_table)) => {
                    *base_table = deep_merge(std::mem::take(base_table), overlay_table);
                }
                _ => {
                    merged.insert(key, Value::Table(overlay_table));
                }
            },
            leaf => {
                merged.insert(key, leaf);
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(s: &str) -> Document {
        toml::from_str(s).unwrap()
    }

    #[test]
    fn existing_leaf_wins_and_siblings_survive() {
        let base = doc("a = 1\n[b]\nc = 2\n");
        let overlay = doc("[b]\nc = 99\nd = 3\n");

        let merged = deep_merge(base, overlay);
        assert_eq!(merged, doc("a = 1\n[b]\nc = 99\nd = 3\n"));
    }

    #[test]
    fn overlay_leaf_replaces_base_table() {
        let base = doc("[b]\nc = 2\n");
        let overlay = doc("b = \"flat\"\n");
        assert_eq!(deep_merge(base, overlay), doc("b = \"flat\"\n"));
    }

    #[test]
    fn overlay_table_replaces_base_leaf() {
        let base = doc("b = 1\n");
        let overlay = doc("[b]\nx = 1\n");
        assert_eq!(deep_merge(base, overlay), doc("[b]\nx = 1\n"));
    }

    #[test]
    fn empty_overlay_yields_base() {
        let base = doc("a = 1\n[b.c]\nd = [1, 2]\n");
        assert_eq!(deep_merge(base.clone(), Document::new()), base);
    }

    #[test]
    fn merge_is_idempotent() {
        let base = doc("a = 1\n[b]\nc = 2\n[b.e]\nf = true\n");
        let overlay = doc("z = 0\n[b]\nc = 5\n");

        let once = deep_merge(base.clone(), overlay);
        let twice = deep_merge(base, once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn base_order_is_kept_then_overlay_additions() {
        let base = doc("a = 1\nb = 2\n");
        let overlay = doc("z = 0\nb = 9\n");
        let merged = deep_merge(base, overlay);
        let keys: Vec<&str> = merged.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b", "z"]);
        assert_eq!(merged["b"], Value::Integer(9));
    }

    #[test]
    fn new_nested_default_lands_in_declared_position() {
        let base = doc("[cli]\ncolor_palette = \"latte\"\nnew_option = 1\nlast = 2\n");
        let overlay = doc("[cli]\nlast = 5\ncolor_palette = \"mocha\"\ncustom = true\n");
        let merged = deep_merge(base, overlay);

        let cli = merged["cli"].as_table().unwrap();
        let keys: Vec<&str> = cli.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["color_palette", "new_option", "last", "custom"]);
        assert_eq!(cli["color_palette"], Value::String("mocha".into()));
        assert_eq!(cli["last"], Value::Integer(5));
    }

    #[test]
    fn arrays_are_not_merged() {
        let base = doc("a = [1, 2, 3]\n");
        let overlay = doc("a = [9]\n");
        assert_eq!(deep_merge(base, overlay), doc("a = [9]\n"));
    }
}
