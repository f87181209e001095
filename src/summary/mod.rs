//! Per-language summarization and indexing engine.
//!
//! The engine accumulates page records one at a time, projects each onto a
//! configured subset of fields, and on finalization produces one [`Summary`]
//! per language: the projected items in a deterministic sort order, plus one
//! inverted position index per configured index field. Summaries let a site
//! list and browse content without fetching every page record.
//!
//! ```text
//! add(page, ctx)   — skip hidden → project fields → retain sort/index shadows
//! add(page, ctx)
//! ...
//! finalize()       — per language: stable multi-key sort → build indexes
//! ```
//!
//! The module is split into:
//! - **project**: field projection with per-field custom resolvers
//! - **sort**: sort-specifier normalization + JSON value comparator
//! - **index**: inverted position indexes over the sorted items
//!
//! ## Lifecycle
//!
//! A [`Summarizer`] goes empty → accumulating → finalized. [`Summarizer::add`]
//! may be called any number of times; [`Summarizer::finalize`] consumes the
//! engine, so a second finalization (and any add-after-finalize) is a compile
//! error rather than a silent misuse. One instance serves one build pass —
//! summaries are recomputed from scratch each run.
//!
//! `add` does no I/O and never suspends, but the engine provides no internal
//! locking: concurrent file processing must serialize `add` calls and must
//! complete them all before finalizing.
//!
//! ## Sort-only fields
//!
//! A `sort_by` field absent from the projected `fields` is still retained on
//! each item, in a shadow map the sort comparator reads through
//! [`SummaryItem::get`] but serialization never sees. Sorting can therefore
//! order public summaries by data that is not part of their public shape.

pub mod index;
pub mod project;
pub mod sort;

pub use index::{PositionIndex, index_name};
pub use project::{Resolver, ResolverError, project};
pub use sort::{SortOrder, SortPlan};

use crate::fieldpath;
use crate::slug::slugify;
use crate::types::ParsingContext;
use index::update_index;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("resolver for field \"{field}\" failed: {source}")]
    Resolver { field: String, source: ResolverError },
}

/// Engine configuration: what to project, how to resolve, sort, and index.
pub struct SummaryOptions {
    /// Field paths to project, in output order.
    pub fields: Vec<String>,
    /// Per-field custom resolvers, overriding the direct dotted-path read.
    pub resolve: HashMap<String, Resolver>,
    /// Sort specifiers; a leading `-` marks a descending key.
    pub sort_by: Vec<String>,
    /// Field paths to build position indexes over.
    pub index_by: Vec<String>,
}

impl Default for SummaryOptions {
    /// Stock projection: `title`, `author`, `createdAt`, `alias`,
    /// `categories`, with `alias` resolved via [`page_alias`]. No sorting or
    /// indexing unless configured.
    fn default() -> Self {
        let mut resolve: HashMap<String, Resolver> = HashMap::new();
        resolve.insert("alias".to_string(), Box::new(page_alias));

        Self {
            fields: ["title", "author", "createdAt", "alias", "categories"]
                .map(String::from)
                .to_vec(),
            resolve,
            sort_by: Vec::new(),
            index_by: Vec::new(),
        }
    }
}

/// Default `alias` resolver: the page's explicit non-empty `alias`, or a
/// slug derived from its title.
pub fn page_alias(
    item: &Value,
    _field: &str,
    _ctx: &ParsingContext,
) -> Result<Option<Value>, ResolverError> {
    if let Some(alias) = item.get("alias").and_then(Value::as_str)
        && !alias.is_empty()
    {
        return Ok(Some(Value::String(alias.to_string())));
    }

    match item.get("title").and_then(Value::as_str) {
        Some(title) => Ok(Some(Value::String(slugify(title)))),
        None => Ok(None),
    }
}

/// One projected item in a summary.
///
/// Serializes as the projected fields only. Sort-only shadow values are
/// reachable through [`SummaryItem::get`] (the comparator's view) but never
/// appear in serialized output.
#[derive(Debug, Clone)]
pub struct SummaryItem {
    public: Value,
    extra: Value,
}

impl SummaryItem {
    fn new(public: Value) -> Self {
        Self {
            public,
            extra: Value::Object(Map::new()),
        }
    }

    /// Read a field by dotted path: projected fields first, then retained
    /// sort-only shadows.
    pub fn get(&self, path: &str) -> Option<&Value> {
        fieldpath::get(&self.public, path).or_else(|| fieldpath::get(&self.extra, path))
    }

    /// The projected record — what serialization emits.
    pub fn as_value(&self) -> &Value {
        &self.public
    }
}

impl Serialize for SummaryItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.public.serialize(serializer)
    }
}

/// Per-language summary: sorted items plus `by<Field>` position indexes.
#[derive(Debug, Serialize)]
pub struct Summary {
    pub items: Vec<SummaryItem>,
    #[serde(flatten)]
    pub indexes: BTreeMap<String, PositionIndex>,
}

/// The engine's product: one [`Summary`] per language that received at least
/// one non-hidden page.
pub type Summaries = BTreeMap<String, Summary>;

struct PendingItem {
    item: SummaryItem,
    /// Original values of the `index_by` fields, captured at add time.
    index_values: Vec<Option<Value>>,
}

/// Accumulates page records and produces per-language summaries.
pub struct Summarizer {
    options: SummaryOptions,
    plan: SortPlan,
    pending: BTreeMap<String, Vec<PendingItem>>,
}

impl Summarizer {
    pub fn new(options: SummaryOptions) -> Self {
        let plan = SortPlan::new(&options.sort_by, &options.fields);
        Self {
            options,
            plan,
            pending: BTreeMap::new(),
        }
    }

    /// Accumulate one page under the context's language.
    ///
    /// Pages with a truthy `hidden` field are skipped entirely: they appear
    /// in no item list, contribute to no index, and occupy no position. A
    /// resolver failure aborts the pass.
    pub fn add(&mut self, item: &Value, ctx: &ParsingContext) -> Result<(), SummaryError> {
        if is_truthy(fieldpath::get(item, "hidden")) {
            return Ok(());
        }

        let public = project(item, &self.options.fields, &self.options.resolve, ctx)?;
        let mut summarized = SummaryItem::new(public);

        // Retain sort-only values; the full dotted path nests them under the
        // path's top-level segment in the shadow map.
        for field in &self.plan.missing_fields {
            if let Some(value) = fieldpath::get(item, field) {
                fieldpath::set(&mut summarized.extra, field, value.clone());
            }
        }

        let index_values = self
            .options
            .index_by
            .iter()
            .map(|field| fieldpath::get(item, field).cloned())
            .collect();

        self.pending.entry(ctx.lang.clone()).or_default().push(PendingItem {
            item: summarized,
            index_values,
        });
        Ok(())
    }

    /// Sort, index, and return every language's summary, consuming the
    /// engine.
    ///
    /// Without sort keys items keep insertion order. Indexes are built from
    /// the final order, so recorded positions are valid offsets into `items`.
    /// An index appears in a summary only once a value is recorded for it.
    pub fn finalize(self) -> Summaries {
        let Summarizer {
            options,
            plan,
            pending,
        } = self;

        let mut summaries = Summaries::new();
        for (lang, mut items) in pending {
            if !plan.is_empty() {
                items.sort_by(|a, b| plan.compare(&a.item, &b.item));
            }

            let mut indexes: BTreeMap<String, PositionIndex> = BTreeMap::new();
            for (position, pending_item) in items.iter().enumerate() {
                for (field, value) in options.index_by.iter().zip(&pending_item.index_values) {
                    if let Some(value) = value {
                        update_index(indexes.entry(index_name(field)).or_default(), value, position);
                    }
                }
            }

            let items = items.into_iter().map(|p| p.item).collect();
            summaries.insert(lang, Summary { items, indexes });
        }
        summaries
    }
}

/// JS-style truthiness for the `hidden` marker: absent, `null`, `false`,
/// `0`, and `""` are not hidden; any other present value is.
pub(crate) fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}
