//! Hook plugins: observing and transforming pages as they flow through.
//!
//! A plugin sees every content file at two points — the raw source before
//! parsing and the assembled page record after id assignment — and may
//! contribute extra generated artifacts once the pass is complete. Hooks
//! have default empty implementations, so a plugin implements only the
//! points it cares about:
//!
//! ```text
//! before_parse(source, ctx)   raw file text, read-only
//! after_parse(page, ctx)      parsed + validated + id assigned; may mutate
//! generate(outcome)           whole pass done; return extra artifacts
//! ```
//!
//! Plugins run in registration order. A hook error aborts the build pass —
//! plugins are part of the pipeline, not observers that may silently fail.
//! `before_parse` and `after_parse` are invoked from parallel file
//! processing, so plugins must be `Send + Sync` and keep per-call state to
//! themselves.

use crate::scan::ScanOutcome;
use crate::types::ParsingContext;
use serde_json::Value;

/// Error type plugin hooks may fail with.
pub type PluginError = Box<dyn std::error::Error + Send + Sync>;

/// An extra file a plugin contributes to the output directory.
#[derive(Debug, Clone)]
pub struct Artifact {
    /// File name relative to the output directory.
    pub file_name: String,
    pub contents: String,
}

/// Pipeline extension hooks. All methods default to doing nothing.
pub trait ContentPlugin: Send + Sync {
    /// Called with the raw file source before parsing.
    fn before_parse(&self, _source: &str, _ctx: &ParsingContext) -> Result<(), PluginError> {
        Ok(())
    }

    /// Called after parsing, validation, and id assignment; the page may be
    /// mutated before it reaches summarization and emission.
    fn after_parse(&self, _page: &mut Value, _ctx: &ParsingContext) -> Result<(), PluginError> {
        Ok(())
    }

    /// Called once after the whole pass; returned artifacts are written to
    /// the output directory alongside pages and summaries.
    fn generate(&self, _outcome: &ScanOutcome) -> Result<Vec<Artifact>, PluginError> {
        Ok(Vec::new())
    }
}
