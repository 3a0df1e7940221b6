//! Generators for synthetic feature attributes.
//!
//! The values follow simple patterns so tests can predict which features
//! resolve to identical styles.

use serde_json::{json, Map, Value};

/// Build an attribute map from a JSON object literal.
///
/// # Panics
///
/// Panics if `value` is not a JSON object.
pub fn feature(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("feature attributes must be a JSON object, got {}", other),
    }
}

/// Creates `count` point features cycling through `distinct` visual variants.
///
/// Feature `i` has:
/// - `name`: `"feature-{i % distinct}"`
/// - `population`: `(i % distinct) * 1000`
/// - `category`: `1` or `2`, alternating with `i % distinct`
///
/// so exactly `distinct` different styles result for `count >= distinct`.
///
/// # Example
///
/// ```
/// use test_utils::create_point_features;
///
/// let features = create_point_features(10, 3);
/// assert_eq!(features.len(), 10);
/// assert_eq!(features[0], features[3]);
/// ```
pub fn create_point_features(count: usize, distinct: usize) -> Vec<Map<String, Value>> {
    let distinct = distinct.max(1);
    (0..count)
        .map(|i| {
            let variant = i % distinct;
            feature(json!({
                "name": format!("feature-{}", variant),
                "population": variant * 1000,
                "category": variant % 2 + 1,
            }))
        })
        .collect()
}
