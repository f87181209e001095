//! CLI output formatting for scan and build runs.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every page is its semantic identity — id and language — with
//! filesystem paths shown as secondary context via indented `Source:` lines.
//! This reads as a content inventory while still letting users trace data
//! back to specific files.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Pages
//! en (3)
//!     001 about
//!         Source: about.en.json
//!     002 blog/first-post (hidden)
//!         Source: blog/first-post.en.json
//!
//! Summaries
//! en: 2 items
//!     Indexes: byCategories, byMetaKeywords
//! ```
//!
//! ## Build
//!
//! ```text
//! en
//!     about → about.en.json
//!     blog/first-post → blog/first-post.en.json
//! Summaries
//!     en → content_summaries.en.json
//!
//! Wrote 2 pages, 1 summary, manifest.json
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::emit::EmitReport;
use crate::scan::ScanOutcome;
use crate::summary::is_truthy;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Content inventory for `pagedex scan`.
pub fn format_scan_output(outcome: &ScanOutcome) -> Vec<String> {
    let mut lines = vec!["Pages".to_string()];

    let mut langs: Vec<&str> = outcome
        .pages
        .iter()
        .map(|p| p.ctx.lang.as_str())
        .collect();
    langs.sort_unstable();
    langs.dedup();

    for lang in &langs {
        let pages: Vec<_> = outcome
            .pages
            .iter()
            .filter(|p| p.ctx.lang.as_str() == *lang)
            .collect();
        lines.push(format!("{lang} ({})", pages.len()));
        for (position, page) in pages.iter().enumerate() {
            let hidden = if is_truthy(page.page.get("hidden")) {
                " (hidden)"
            } else {
                ""
            };
            lines.push(format!(
                "    {} {}{hidden}",
                format_index(position + 1),
                page.id
            ));
            lines.push(format!("        Source: {}", page.ctx.relative_path));
        }
    }

    lines.push(String::new());
    lines.push("Summaries".to_string());
    for (lang, summary) in &outcome.summaries {
        lines.push(format!("{lang}: {}", plural(summary.items.len(), "item")));
        if !summary.indexes.is_empty() {
            let names: Vec<&str> = summary.indexes.keys().map(String::as_str).collect();
            lines.push(format!("    Indexes: {}", names.join(", ")));
        }
    }

    lines
}

/// Artifact listing for `pagedex build`.
pub fn format_build_output(report: &EmitReport) -> Vec<String> {
    let mut lines = Vec::new();

    for (lang, pages) in &report.pages {
        lines.push(lang.clone());
        for (id, file) in pages {
            lines.push(format!("    {id} → {file}"));
        }
    }

    if !report.summaries.is_empty() {
        lines.push("Summaries".to_string());
        for (lang, file) in &report.summaries {
            lines.push(format!("    {lang} → {file}"));
        }
    }

    for file in &report.extra {
        lines.push(format!("Extra: {file}"));
    }

    let page_count: usize = report.pages.values().map(|m| m.len()).sum();
    lines.push(String::new());
    lines.push(format!(
        "Wrote {}, {}, manifest.json",
        plural(page_count, "page"),
        plural(report.summaries.len(), "summary file"),
    ));

    lines
}

pub fn print_scan_output(outcome: &ScanOutcome) {
    for line in format_scan_output(outcome) {
        println!("{line}");
    }
}

pub fn print_build_output(report: &EmitReport) {
    for line in format_build_output(report) {
        println!("{line}");
    }
}
