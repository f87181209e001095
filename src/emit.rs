//! Artifact emission.
//!
//! Final stage of the pagedex pipeline. Takes a [`ScanOutcome`] and writes
//! the output directory:
//!
//! ```text
//! dist/
//! ├── manifest.json                  # lang → page id → emitted file
//! ├── about.en.json                  # Full page records, one per page
//! ├── blog/
//! │   └── first-post.en.json         # Ids with "/" become subdirectories
//! ├── content_summaries.en.json      # Per-language summary
//! └── content_summaries.uk.json
//! ```
//!
//! Summary files are named `{name}_{export}.{lang}.json`, where `name` is
//! the content source directory's sanitized name and `export` comes from
//! config (`summaries` by default). The manifest is the machine-readable
//! entry point: loaders resolve a page id to its artifact through it
//! without globbing the output tree.
//!
//! Emission is deterministic — pages are written in (lang, id) order and all
//! manifest maps are sorted — so re-running a build over unchanged content
//! produces byte-identical output.

use crate::plugins::{ContentPlugin, PluginError};
use crate::scan::ScanOutcome;
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("generate hook failed: {source}")]
    Plugin { source: PluginError },
}

/// What a build pass wrote, for reporting and for the manifest.
#[derive(Debug, Serialize)]
pub struct EmitReport {
    /// lang → page id → emitted file, relative to the output directory.
    pub pages: BTreeMap<String, BTreeMap<String, String>>,
    /// lang → emitted summary file.
    pub summaries: BTreeMap<String, String>,
    /// Files contributed by plugin `generate` hooks.
    pub extra: Vec<String>,
}

/// Sanitize a content-source name for use in summary file names: runs of
/// non-alphanumeric characters collapse to `_`.
pub fn source_name(root: &Path) -> String {
    let name = root
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let mut sanitized = String::with_capacity(name.len());
    let mut prev_underscore = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            sanitized.push(c);
            prev_underscore = false;
        } else if !prev_underscore {
            sanitized.push('_');
            prev_underscore = true;
        }
    }

    if sanitized.is_empty() {
        "content".to_string()
    } else {
        sanitized
    }
}

/// Write all artifacts for `outcome` into `out_dir`.
///
/// `name` labels the summary files (see [`source_name`]); `export` is the
/// configured export name. Page ids repeat per language — the last write
/// wins, matching the manifest.
pub fn emit(
    outcome: &ScanOutcome,
    out_dir: &Path,
    name: &str,
    export: &str,
    plugins: &[Box<dyn ContentPlugin>],
) -> Result<EmitReport, EmitError> {
    fs::create_dir_all(out_dir)?;

    let mut report = EmitReport {
        pages: BTreeMap::new(),
        summaries: BTreeMap::new(),
        extra: Vec::new(),
    };

    // (lang, id)-sorted page records
    let mut pages: Vec<_> = outcome.pages.iter().collect();
    pages.sort_by(|a, b| (&a.ctx.lang, &a.id).cmp(&(&b.ctx.lang, &b.id)));
    for scanned in pages {
        let relative = format!("{}.{}.json", scanned.id, scanned.ctx.lang);
        write_json(out_dir, &relative, &scanned.page)?;
        report
            .pages
            .entry(scanned.ctx.lang.clone())
            .or_default()
            .insert(scanned.id.clone(), relative);
    }

    for (lang, summary) in &outcome.summaries {
        let relative = format!("{name}_{export}.{lang}.json");
        write_json(out_dir, &relative, summary)?;
        report.summaries.insert(lang.clone(), relative);
    }

    for plugin in plugins {
        let artifacts = plugin
            .generate(outcome)
            .map_err(|source| EmitError::Plugin { source })?;
        for artifact in artifacts {
            write_text(out_dir, &artifact.file_name, &artifact.contents)?;
            report.extra.push(artifact.file_name);
        }
    }

    let manifest = json!({
        "pages": report.pages,
        "summaries": report.summaries,
    });
    write_json(out_dir, "manifest.json", &manifest)?;

    Ok(report)
}

fn write_json<T: Serialize>(out_dir: &Path, relative: &str, value: &T) -> Result<(), EmitError> {
    write_text(out_dir, relative, &serde_json::to_string_pretty(value)?)
}

fn write_text(out_dir: &Path, relative: &str, contents: &str) -> Result<(), EmitError> {
    let path = out_dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(())
}
