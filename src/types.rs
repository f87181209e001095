//! Shared types carried through the pipeline.
//!
//! Every discovered content file travels with a [`ParsingContext`]: the
//! metadata the parser, id derivation, resolvers, and hook plugins all see.
//! Page records themselves are plain [`serde_json::Value`] objects — content
//! is schemaless by design, addressed through dotted paths
//! (see [`crate::fieldpath`]).

use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;

/// Location details of one discovered content file.
#[derive(Debug, Clone, Serialize)]
pub struct FileDetails {
    /// Absolute path of the file on disk.
    pub path: PathBuf,
    /// Bare file name, e.g. `post.en.json`.
    pub name: String,
}

/// Metadata accompanying one source file through the pipeline.
///
/// Supplied to parsers, page-id derivation, field resolvers, and hook
/// plugins. `ext` includes the leading dot (`.json`), matching what the
/// filename splits into.
#[derive(Debug, Clone, Serialize)]
pub struct ParsingContext {
    /// Path relative to the content root, e.g. `blog/post.en.json`.
    pub relative_path: String,
    /// File extension including the leading dot, e.g. `.json`.
    pub ext: String,
    /// Language tag extracted from the filename, e.g. `en`.
    pub lang: String,
    /// On-disk location of the source file.
    pub file: FileDetails,
}

/// Derive a page id from the page record and its parsing context.
///
/// The default is [`file_name_id`]; build setups can substitute their own.
pub type PageIdFn = fn(&Value, &ParsingContext) -> String;

/// Default page id: the relative path with the `.{lang}{ext}` suffix removed.
///
/// `blog/post.en.json` (lang `en`, ext `.json`) → `blog/post`. A file whose
/// name is nothing but the suffix gets the id `default`.
pub fn file_name_id(_page: &Value, ctx: &ParsingContext) -> String {
    let suffix_len = ctx.lang.len() + ctx.ext.len() + 1;
    let id = if ctx.relative_path.len() > suffix_len {
        &ctx.relative_path[..ctx.relative_path.len() - suffix_len]
    } else {
        ""
    };

    if id.is_empty() {
        "default".to_string()
    } else {
        id.to_string()
    }
}
