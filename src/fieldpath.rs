//! Dotted-path access into JSON records.
//!
//! Page records are arbitrary JSON objects, and configuration refers to their
//! fields by dotted paths (`meta.keywords`, `author.name`). This module is the
//! single place that interprets those paths, for both reading (projection,
//! sorting, indexing) and writing (nested assignment into a projected item).
//!
//! ## Path Semantics
//!
//! - Segments are split on `.`; there is no escaping. A field name containing
//!   a literal dot cannot be addressed.
//! - Reading an absent segment, or descending through a non-container value,
//!   yields `None` — never an error.
//! - Numeric segments index into arrays: `tags.0` reads the first element.
//! - The empty path addresses nothing: `get` returns `None`, `set` is a no-op.
//! - Writing creates intermediate objects as needed; a non-object value in
//!   the middle of the path is replaced by an object.

use serde_json::{Map, Value};

/// Read the value at `path` inside `value`.
///
/// ```
/// use serde_json::json;
/// use pagedex::fieldpath::get;
///
/// let page = json!({ "meta": { "keywords": ["rust", "cli"] } });
/// assert_eq!(get(&page, "meta.keywords.0"), Some(&json!("rust")));
/// assert_eq!(get(&page, "meta.missing"), None);
/// ```
pub fn get<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }

    let mut current = value;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => {
                let index: usize = segment.parse().ok()?;
                items.get(index)?
            }
            _ => return None,
        };
    }
    Some(current)
}

/// Assign `new` at `path` inside `target`, creating intermediate objects.
///
/// `target` should be a JSON object; scalar values encountered along the path
/// are replaced with objects so the assignment always lands.
pub fn set(target: &mut Value, path: &str, new: Value) {
    if path.is_empty() {
        return;
    }

    let mut current = target;
    let mut segments = path.split('.').peekable();
    while let Some(segment) = segments.next() {
        if !current.is_object() {
            *current = Value::Object(Map::new());
        }
        let map = current.as_object_mut().unwrap();

        if segments.peek().is_none() {
            map.insert(segment.to_string(), new);
            return;
        }
        current = map
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }
}
