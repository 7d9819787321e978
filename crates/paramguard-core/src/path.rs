//! # Nested Path Resolution
//!
//! Resolves dotted paths such as `"body.item.name"` against nested JSON
//! values. Missing segments yield `None`; whether absence is an error is
//! the caller's decision.

use serde_json::Value;

/// Resolve a dotted `path` against `object`.
///
/// - `None` or an empty path returns `object` itself.
/// - Object segments are key lookups; array segments must be numeric
///   indices (`"items.0.name"`).
/// - Scalars and `null` have no children, so any further segment is absent.
pub fn resolve_path<'a>(object: &'a Value, path: Option<&str>) -> Option<&'a Value> {
    let path = match path {
        Some(p) if !p.is_empty() => p,
        _ => return Some(object),
    };

    path.split('.').try_fold(object, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_selects_nested_property() {
        let data = json!({"body": {"item": {"name": "Danny"}}});
        assert_eq!(resolve_path(&data, Some("body.item.name")), Some(&json!("Danny")));
    }

    #[test]
    fn test_missing_path_is_absent() {
        let data = json!({});
        assert_eq!(resolve_path(&data, Some("body.item.name")), None);
    }

    #[test]
    fn test_first_level_returns_subobject() {
        let data = json!({"body": {"name": "Danny"}});
        let body = resolve_path(&data, Some("body")).unwrap();
        assert_eq!(body["name"], "Danny");
    }

    #[test]
    fn test_empty_and_absent_path_are_identity() {
        let data = json!([{"name": "a"}]);
        assert_eq!(resolve_path(&data, Some("")), Some(&data));
        assert_eq!(resolve_path(&data, None), Some(&data));
    }

    #[test]
    fn test_array_index_segments() {
        let data = json!({"items": [{"name": "a"}, {"name": "b"}]});
        assert_eq!(resolve_path(&data, Some("items.1.name")), Some(&json!("b")));
        assert_eq!(resolve_path(&data, Some("items.2.name")), None);
        assert_eq!(resolve_path(&data, Some("items.first")), None);
    }

    #[test]
    fn test_null_and_scalars_have_no_children() {
        let data = json!({"body": null, "count": 3});
        assert_eq!(resolve_path(&data, Some("body")), Some(&Value::Null));
        assert_eq!(resolve_path(&data, Some("body.name")), None);
        assert_eq!(resolve_path(&data, Some("count.value")), None);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::Map;

    /// Build `{s0: {s1: {... leaf}}}` for the given segments.
    fn nest(segments: &[String], leaf: Value) -> Value {
        segments.iter().rev().fold(leaf, |inner, key| {
            let mut map = Map::new();
            map.insert(key.clone(), inner);
            Value::Object(map)
        })
    }

    proptest! {
        /// A path built from existing segments always resolves to its leaf.
        #[test]
        fn existing_path_resolves_to_leaf(
            segments in prop::collection::vec("[a-z]{1,8}", 1..8),
            leaf in "[a-zA-Z0-9]{0,16}",
        ) {
            let data = nest(&segments, Value::String(leaf.clone()));
            let path = segments.join(".");
            prop_assert_eq!(resolve_path(&data, Some(path.as_str())), Some(&Value::String(leaf)));
        }

        /// Any missing segment makes the whole path absent, whatever its length.
        #[test]
        fn missing_segment_is_absent(
            segments in prop::collection::vec("[a-z]{1,8}", 1..8),
            missing_at in any::<prop::sample::Index>(),
            tail in prop::collection::vec("[a-z]{1,8}", 0..4),
        ) {
            let data = nest(&segments, Value::Bool(true));
            let cut = missing_at.index(segments.len());
            let mut path: Vec<String> = segments[..cut].to_vec();
            // Uppercase never collides with the generated lowercase keys.
            path.push("MISSING".to_string());
            path.extend(tail);
            prop_assert_eq!(resolve_path(&data, Some(path.join(".").as_str())), None);
        }

        /// Empty path is the identity for arbitrary objects.
        #[test]
        fn empty_path_is_identity(
            keys in prop::collection::btree_map("[a-z]{1,6}", any::<i64>(), 0..6)
        ) {
            let data = Value::Object(
                keys.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            );
            prop_assert_eq!(resolve_path(&data, Some("")), Some(&data));
        }
    }
}
