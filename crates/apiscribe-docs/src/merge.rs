//! Recursive merge of JSON values.

use serde_json::Value;

/// Merges `incoming` into `target`.
///
/// Objects merge key by key, recursing into keys present on both sides.
/// Arrays concatenate, `target` elements first. Every other combination is
/// replaced by `incoming`. Keys of `target` that `incoming` does not mention
/// are never touched.
///
/// # Example
///
/// ```rust
/// use apiscribe_docs::deep_merge;
/// use serde_json::json;
///
/// let mut doc = json!({"a": [1], "b": {"x": 1}, "c": "old"});
/// deep_merge(&mut doc, json!({"a": [2], "b": {"y": 2}, "c": "new"}));
/// assert_eq!(doc, json!({"a": [1, 2], "b": {"x": 1, "y": 2}, "c": "new"}));
/// ```
pub fn deep_merge(target: &mut Value, incoming: Value) {
    match (target, incoming) {
        (Value::Object(target), Value::Object(incoming)) => {
            for (key, value) in incoming {
                match target.get_mut(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (Value::Array(target), Value::Array(incoming)) => target.extend(incoming),
        (target, incoming) => *target = incoming,
    }
}
