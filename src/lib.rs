//! # pagedex
//!
//! A minimal content pipeline. Your filesystem is the data source: a tree of
//! per-language page files (`about.en.json`, `blog/post.uk.md`) becomes, per
//! build, one JSON record per page plus one aggregated, indexed, sorted
//! summary per language — everything a site needs to list and browse content
//! without fetching every page.
//!
//! # Architecture: Scan → Summarize → Emit
//!
//! ```text
//! 1. Scan       content/  →  pages + contexts   (discover, parse, validate)
//! 2. Summarize  pages     →  per-lang summaries (project, sort, index)
//! 3. Emit       both      →  dist/              (page records, summaries, manifest)
//! ```
//!
//! The stages are separate on purpose:
//!
//! - **Debuggability**: every artifact is human-readable JSON you can inspect.
//! - **Determinism**: discovery is path-sorted and all maps serialize in
//!   sorted order, so identical content produces byte-identical output.
//! - **Testability**: summarization is a pure accumulate→finalize engine
//!   exercised without touching the filesystem.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1 — walks the content tree, parses and validates pages, runs hooks |
//! | [`summary`] | Stage 2 — the summarization engine: projection, sorting, position indexes |
//! | [`emit`] | Stage 3 — writes page records, summary files, and the manifest |
//! | [`config`] | `config.toml` loading, validation, stock config generation |
//! | [`schema`] | Declarative structural page validation with readable errors |
//! | [`parse`] | Extension-keyed parsers: JSON, markdown + TOML front matter |
//! | [`plugins`] | Hook plugins: before/after parse, extra generated artifacts |
//! | [`fieldpath`] | Dotted-path get/set over JSON records |
//! | [`slug`] | Slug derivation for the default `alias` resolver |
//! | [`types`] | `ParsingContext` and friends shared across stages |
//! | [`output`] | CLI output formatting — content inventory and build reports |
//!
//! # Design Decisions
//!
//! ## Schemaless Pages, Dotted Paths
//!
//! Page records are `serde_json::Value`, not structs. Content shape belongs
//! to each site, so the pipeline addresses fields by dotted path
//! ([`fieldpath`]) and validates shape with data-driven rules ([`schema`])
//! instead of compiled-in types. The summary engine works for a recipe
//! collection and a blog alike, from config alone.
//!
//! ## Summaries Carry Their Own Indexes
//!
//! Each per-language summary embeds inverted position indexes
//! (`byCategories`, `byMetaKeywords`, …) built after the final sort, so a
//! consumer resolves "all tech posts" to item positions without scanning —
//! and without a second round trip to any page record.
//!
//! ## Hidden ≠ Deleted
//!
//! A page with `"hidden": true` is parsed, validated, and emitted like any
//! other — it just never enters a summary. Work-in-progress content stays
//! reachable by direct id while staying out of listings.
//!
//! ## Whole-Pass Failure
//!
//! A parse error, schema violation, resolver failure, or hook error aborts
//! the build. Content is deterministic input: a retry would fail identically,
//! and a partial summary is worse than a loud error.

pub mod config;
pub mod emit;
pub mod fieldpath;
pub mod output;
pub mod parse;
pub mod plugins;
pub mod scan;
pub mod schema;
pub mod slug;
pub mod summary;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
