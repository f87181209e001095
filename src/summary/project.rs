//! Field projection: deriving a partial record from a page.
//!
//! Projection walks the configured field list in order and, for each field,
//! either invokes a registered resolver or reads the field from the page by
//! dotted path. Absent values are omitted entirely — the projected record
//! never carries a `null` standing in for "not there". The source page is
//! never mutated.

use super::SummaryError;
use crate::fieldpath;
use crate::types::ParsingContext;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Error type resolvers may fail with. Wrapped into
/// [`SummaryError::Resolver`] together with the field name.
pub type ResolverError = Box<dyn std::error::Error + Send + Sync>;

/// Compute a projected field's value from the full page record.
///
/// Returning `Ok(None)` omits the field from the projection, the same as an
/// absent dotted path. An error is fatal for the whole build pass.
pub type Resolver =
    Box<dyn Fn(&Value, &str, &ParsingContext) -> Result<Option<Value>, ResolverError> + Send + Sync>;

/// Project `item` onto `fields`, consulting `resolvers` per field.
///
/// Dotted fields land nested: projecting `meta.description` produces
/// `{ "meta": { "description": ... } }`. Projection is pure — same item,
/// same configuration, same context, same output.
pub fn project(
    item: &Value,
    fields: &[String],
    resolvers: &HashMap<String, Resolver>,
    ctx: &ParsingContext,
) -> Result<Value, SummaryError> {
    let mut projected = Value::Object(Map::new());

    for field in fields {
        let value = match resolvers.get(field) {
            Some(resolve) => {
                resolve(item, field, ctx).map_err(|source| SummaryError::Resolver {
                    field: field.clone(),
                    source,
                })?
            }
            None => fieldpath::get(item, field).cloned(),
        };

        if let Some(value) = value {
            fieldpath::set(&mut projected, field, value);
        }
    }

    Ok(projected)
}
