//! Secondary position indexes over summarized items.
//!
//! An index maps the string form of a field's value to the ordered positions
//! (0-based offsets into the final sorted item list) at which that value
//! occurs. Indexes are built only after the sort order is fixed, so the
//! positions are stable and can be used directly for lookup without scanning
//! the item list.
//!
//! A field whose value is an array is multi-valued: every element contributes
//! its own index entry under the shared position. Values are captured from
//! the original page record at accumulation time, so a projection resolver
//! that rewrites a field never affects its index, and indexed fields need not
//! be projected at all.

use serde_json::Value;
use std::collections::BTreeMap;

/// Inverted index: stringified field value → ascending item positions.
pub type PositionIndex = BTreeMap<String, Vec<usize>>;

/// Derive the summary key for an index over `field`.
///
/// The first letter and each letter following a `.` are upper-cased, dots
/// are dropped, and the result is prefixed with `by`:
/// `category` → `byCategory`, `meta.keywords` → `byMetaKeywords`.
pub fn index_name(field: &str) -> String {
    let mut name = String::with_capacity(field.len() + 2);
    name.push_str("by");
    let mut upper_next = true;
    for c in field.chars() {
        if c == '.' {
            upper_next = true;
        } else if upper_next {
            name.extend(c.to_uppercase());
            upper_next = false;
        } else {
            name.push(c);
        }
    }
    name
}

/// String form of a scalar index value.
///
/// Strings index as themselves (unquoted); everything else as its JSON text.
fn index_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Record `value` at `position` in `index`.
///
/// Array values fan out: each element gets its own entry. Position lists stay
/// strictly increasing — a value occurring twice in one item's array is
/// recorded once for that position.
pub fn update_index(index: &mut PositionIndex, value: &Value, position: usize) {
    let values = match value {
        Value::Array(items) => items.as_slice(),
        single => std::slice::from_ref(single),
    };

    for value in values {
        let positions = index.entry(index_key(value)).or_default();
        if positions.last() != Some(&position) {
            positions.push(position);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // =========================================================================
    // Index naming
    // =========================================================================

    #[test]
    fn simple_field_name() {
        assert_eq!(index_name("category"), "byCategory");
    }

    #[test]
    fn dotted_path_camel_cases_segments() {
        assert_eq!(index_name("meta.keywords"), "byMetaKeywords");
    }

    #[test]
    fn deep_path() {
        assert_eq!(index_name("a.b.c"), "byABC");
    }

    // =========================================================================
    // Index updates
    // =========================================================================

    #[test]
    fn scalar_value_records_one_entry() {
        let mut index = PositionIndex::new();
        update_index(&mut index, &json!("tech"), 0);
        update_index(&mut index, &json!("life"), 1);
        update_index(&mut index, &json!("tech"), 2);

        assert_eq!(index["tech"], vec![0, 2]);
        assert_eq!(index["life"], vec![1]);
    }

    #[test]
    fn array_value_fans_out() {
        let mut index = PositionIndex::new();
        update_index(&mut index, &json!(["rust", "cli"]), 3);

        assert_eq!(index["rust"], vec![3]);
        assert_eq!(index["cli"], vec![3]);
    }

    #[test]
    fn non_string_values_use_json_text() {
        let mut index = PositionIndex::new();
        update_index(&mut index, &json!(42), 0);
        update_index(&mut index, &json!(true), 1);
        update_index(&mut index, &json!(null), 2);

        assert_eq!(index["42"], vec![0]);
        assert_eq!(index["true"], vec![1]);
        assert_eq!(index["null"], vec![2]);
    }

    #[test]
    fn duplicate_value_in_one_array_records_position_once() {
        let mut index = PositionIndex::new();
        update_index(&mut index, &json!(["a", "a"]), 5);

        assert_eq!(index["a"], vec![5]);
    }

    #[test]
    fn positions_accumulate_in_ascending_order() {
        let mut index = PositionIndex::new();
        for position in 0..4 {
            update_index(&mut index, &json!("same"), position);
        }
        assert_eq!(index["same"], vec![0, 1, 2, 3]);
    }
}
