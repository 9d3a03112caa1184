//! Depth-first traversal over arbitrary JSON values.

use serde_json::{Map, Value};

/// Walk `node` depth-first, calling `visitor` on every object it contains.
///
/// The root itself is visited if it is an object. Array elements and object
/// property values are descended into; scalars and nulls are skipped.
/// A parent object is always visited before its children, and siblings in
/// the order they appear in the source document.
pub fn walk<F>(node: &Value, visitor: &mut F)
where
    F: FnMut(&Map<String, Value>),
{
    match node {
        Value::Object(map) => {
            visitor(map);
            for child in map.values() {
                walk(child, visitor);
            }
        }
        Value::Array(items) => {
            for item in items {
                walk(item, visitor);
            }
        }
        _ => {}
    }
}
