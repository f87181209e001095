//! Shared test utilities for the pagedex test suite.
//!
//! Provides a [`ParsingContext`] builder for engine-level tests and content
//! tree writers for pipeline-level tests.

use crate::types::{FileDetails, ParsingContext};
use std::fs;
use std::path::{Path, PathBuf};

/// A parsing context for `rel` under a fictional content root.
///
/// The extension is taken from the path; the file name is its last segment.
pub fn context(lang: &str, rel: &str) -> ParsingContext {
    let name = rel.rsplit('/').next().unwrap().to_string();
    let ext = name
        .rfind('.')
        .map(|dot| name[dot..].to_string())
        .unwrap_or_default();

    ParsingContext {
        relative_path: rel.to_string(),
        ext,
        lang: lang.to_string(),
        file: FileDetails {
            path: PathBuf::from(format!("/content/{rel}")),
            name,
        },
    }
}

/// Write `contents` at `rel` under `root`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// A page record passing the stock schema, as JSON source.
pub fn valid_page_json(title: &str) -> String {
    format!(
        r#"{{
  "title": "{title}",
  "author": "ada",
  "createdAt": "2024-05-01T10:00:00Z",
  "content": "body of {title}",
  "categories": ["tech"]
}}"#
    )
}
