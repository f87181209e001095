//! Sort planning and value comparison.
//!
//! A sort specifier list like `["author", "-createdAt"]` is normalized once,
//! at [`Summarizer`](super::Summarizer) construction, into a [`SortPlan`]:
//! the field list with the descending marker stripped, the matching order
//! list, and the specifiers that are not part of the projected fields (those
//! must be retained on items purely for ordering). Specifier order is
//! tie-break precedence: the first field is the primary key.
//!
//! ## Value ordering
//!
//! Items hold arbitrary JSON, so the comparator defines a total order over
//! `Option<&Value>`:
//!
//! - A missing value sorts before any present value; ties fall through to
//!   the next sort key.
//! - Values of different types order by type: null < bool < number < string
//!   < array < object.
//! - Within a type: numbers numerically, strings lexicographically (which is
//!   chronological for the ISO-8601 timestamps content files carry), arrays
//!   and objects by their JSON text.

use super::SummaryItem;
use serde_json::Value;
use std::cmp::Ordering;

/// Direction of one sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Normalized sort plan: fields, per-field order, and the sort-only fields
/// absent from the projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortPlan {
    pub fields: Vec<String>,
    pub orders: Vec<SortOrder>,
    /// Sort fields not among the projected fields. Their values are retained
    /// on items out-of-band so ordering still sees them.
    pub missing_fields: Vec<String>,
}

impl SortPlan {
    /// Normalize `sort_by` specifiers against the projected `fields`.
    ///
    /// A leading `-` marks a descending key and is stripped. An empty
    /// specifier is kept as an ascending key on the empty field name, which
    /// resolves to an absent value on every item — a stable no-op, not an
    /// error.
    pub fn new(sort_by: &[String], fields: &[String]) -> Self {
        let mut plan = SortPlan {
            fields: Vec::with_capacity(sort_by.len()),
            orders: Vec::with_capacity(sort_by.len()),
            missing_fields: Vec::new(),
        };

        for specifier in sort_by {
            let (field, order) = match specifier.strip_prefix('-') {
                Some(rest) => (rest, SortOrder::Desc),
                None => (specifier.as_str(), SortOrder::Asc),
            };
            if !fields.iter().any(|f| f == field) {
                plan.missing_fields.push(field.to_string());
            }
            plan.fields.push(field.to_string());
            plan.orders.push(order);
        }

        plan
    }

    /// True when no sort keys are configured and items keep insertion order.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Compare two summarized items under this plan, key by key.
    pub fn compare(&self, a: &SummaryItem, b: &SummaryItem) -> Ordering {
        for (field, order) in self.fields.iter().zip(&self.orders) {
            let ordering = compare_values(a.get(field), b.get(field));
            let ordering = match order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Total order over optional JSON values. Missing sorts first.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let (a, b) = match (a, b) {
        (None, None) => return Ordering::Equal,
        (None, Some(_)) => return Ordering::Less,
        (Some(_), None) => return Ordering::Greater,
        (Some(a), Some(b)) => (a, b),
    };

    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.total_cmp(&y)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(_), Value::Array(_)) | (Value::Object(_), Value::Object(_)) => {
            a.to_string().cmp(&b.to_string())
        }
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}
