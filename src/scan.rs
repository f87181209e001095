//! Content discovery and page assembly.
//!
//! Stage 1 of the pagedex pipeline. Walks the content root, turns every
//! recognized file into a validated page record, and feeds the per-language
//! summarization engine, producing a [`ScanOutcome`] the emit stage writes
//! out.
//!
//! ## Content Layout
//!
//! Every content file carries its language as the suffix before the
//! extension:
//!
//! ```text
//! content/
//! ├── config.toml                # Build configuration (optional)
//! ├── about.en.json              # Page "about", language "en"
//! ├── about.uk.json              # Same page, Ukrainian
//! └── blog/
//!     ├── first-post.en.json     # Page "blog/first-post"
//!     └── second-post.en.md      # Markdown with TOML front matter
//! ```
//!
//! Directory structure is free-form — it only contributes to page ids
//! (the default id is the relative path minus the `.{lang}{ext}` suffix).
//! Dot-files, dot-directories, and `config.toml` are skipped; so is any file
//! whose extension has no registered parser. A recognized file with a lang
//! suffix outside the configured `langs` fails the pass: a typo'd suffix
//! silently dropping a page is worse than a loud error.
//!
//! ## Processing
//!
//! Files are read, parsed, and validated in parallel with rayon; results are
//! collected in discovery order (path-sorted, so runs are deterministic) and
//! then fed serially into the [`Summarizer`] — its `add` calls must not
//! interleave. Per file:
//!
//! ```text
//! read → before_parse hooks → parse → validate schema → assign id
//!      → after_parse hooks → accumulate into summarizer
//! ```
//!
//! Any failure — unreadable file, parse error, schema violation, resolver or
//! hook error — aborts the whole pass. Content is deterministic input; a
//! partial summary would be rebuilt identically broken on retry.

use crate::config::{self, BuildConfig, ConfigError};
use crate::parse::{PageParser, ParseError, parser_for};
use crate::plugins::{ContentPlugin, PluginError};
use crate::schema::Schema;
use crate::summary::{Summaries, Summarizer, SummaryError, SummaryOptions};
use crate::types::{FileDetails, PageIdFn, ParsingContext, file_name_id};
use rayon::prelude::*;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid lang suffix \"{lang}\" in {relative_path}; possible values: {available}")]
    InvalidLang {
        lang: String,
        relative_path: String,
        available: String,
    },
    #[error("cannot parse \"{relative_path}\": {source}")]
    Parse {
        relative_path: String,
        source: ParseError,
    },
    #[error("invalid content in \"{relative_path}\": {errors}")]
    InvalidContent {
        relative_path: String,
        errors: String,
    },
    #[error("{hook} hook failed for \"{relative_path}\": {source}")]
    Plugin {
        hook: &'static str,
        relative_path: String,
        source: PluginError,
    },
    #[error(transparent)]
    Summary(#[from] SummaryError),
}

/// One assembled page: the full record plus where it came from.
#[derive(Debug, Clone)]
pub struct ScannedPage {
    /// Page id, also written into the record under `id`.
    pub id: String,
    /// The full page record.
    pub page: Value,
    pub ctx: ParsingContext,
}

/// Everything one pass produces: the full page records and the finalized
/// per-language summaries.
#[derive(Debug)]
pub struct ScanOutcome {
    /// All assembled pages in discovery order, hidden ones included — they
    /// are excluded from summaries, not from individual emission.
    pub pages: Vec<ScannedPage>,
    pub summaries: Summaries,
}

/// Knobs beyond what `config.toml` can express (resolvers and functions).
pub struct ScanOptions {
    /// Summarization configuration, resolvers included.
    pub summary: SummaryOptions,
    /// Page id derivation; defaults to [`file_name_id`].
    pub page_id: PageIdFn,
    /// Page schema; `None` skips validation.
    pub schema: Option<Schema>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            summary: SummaryOptions::default(),
            page_id: file_name_id,
            schema: Some(Schema::default_page_schema()),
        }
    }
}

impl ScanOptions {
    /// Options driven by a loaded config: projection/sort/index lists from
    /// `[summary]`, schema per `[schema]`, stock resolvers.
    pub fn from_config(config: &BuildConfig) -> Self {
        let summary = SummaryOptions {
            fields: config.summary.fields.clone(),
            sort_by: config.summary.sort_by.clone(),
            index_by: config.summary.index_by.clone(),
            ..SummaryOptions::default()
        };

        Self {
            summary,
            page_id: file_name_id,
            schema: config.schema.to_schema(),
        }
    }
}

/// Scan with the content root's own `config.toml` (or defaults) and no
/// plugins.
pub fn scan(root: &Path) -> Result<ScanOutcome, ScanError> {
    let config = config::load_config(root)?;
    let options = ScanOptions::from_config(&config);
    scan_with(root, &config, options, &[])
}

/// Scan `root` with explicit configuration, options, and plugins.
pub fn scan_with(
    root: &Path,
    config: &BuildConfig,
    options: ScanOptions,
    plugins: &[Box<dyn ContentPlugin>],
) -> Result<ScanOutcome, ScanError> {
    let ScanOptions {
        summary,
        page_id,
        schema,
    } = options;

    let files = discover(root)?;

    let pages: Vec<ScannedPage> = files
        .par_iter()
        .map(|file| process_file(root, file, config, page_id, schema.as_ref(), plugins))
        .collect::<Result<_, _>>()?;

    let mut summarizer = Summarizer::new(summary);
    for scanned in &pages {
        summarizer.add(&scanned.page, &scanned.ctx)?;
    }

    Ok(ScanOutcome {
        pages,
        summaries: summarizer.finalize(),
    })
}

struct DiscoveredFile {
    path: PathBuf,
    name: String,
    /// Extension including the leading dot.
    ext: String,
    parser: PageParser,
}

/// Enumerate content files under `root` in deterministic (path-sorted)
/// order. Only files with a registered parser come back.
fn discover(root: &Path) -> Result<Vec<DiscoveredFile>, ScanError> {
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0 || !entry.file_name().to_string_lossy().starts_with('.')
        });

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if name == "config.toml" {
            continue;
        }
        let Some(dot) = name.rfind('.') else {
            continue;
        };
        let ext = name[dot..].to_string();
        let Some(parser) = parser_for(&ext) else {
            continue;
        };
        files.push(DiscoveredFile {
            path: entry.path().to_path_buf(),
            name,
            ext,
            parser,
        });
    }
    Ok(files)
}

fn process_file(
    root: &Path,
    file: &DiscoveredFile,
    config: &BuildConfig,
    page_id: PageIdFn,
    schema: Option<&Schema>,
    plugins: &[Box<dyn ContentPlugin>],
) -> Result<ScannedPage, ScanError> {
    let relative_path = file
        .path
        .strip_prefix(root)
        .unwrap_or(&file.path)
        .to_string_lossy()
        .to_string();

    // "post.en.json" → stem "post.en" → lang "en". A stem without a dot is
    // taken whole, so an unsuffixed file fails the lang check loudly.
    let stem = &file.name[..file.name.len() - file.ext.len()];
    let lang = match stem.rfind('.') {
        Some(dot) => &stem[dot + 1..],
        None => stem,
    };
    if !config.langs.iter().any(|l| l == lang) {
        return Err(ScanError::InvalidLang {
            lang: lang.to_string(),
            relative_path,
            available: config.langs.join(", "),
        });
    }

    let ctx = ParsingContext {
        relative_path: relative_path.clone(),
        ext: file.ext.clone(),
        lang: lang.to_string(),
        file: FileDetails {
            path: file.path.clone(),
            name: file.name.clone(),
        },
    };

    let source = std::fs::read_to_string(&file.path)?;

    for plugin in plugins {
        plugin
            .before_parse(&source, &ctx)
            .map_err(|source| ScanError::Plugin {
                hook: "before_parse",
                relative_path: relative_path.clone(),
                source,
            })?;
    }

    let mut page = (file.parser)(&source, &ctx).map_err(|source| ScanError::Parse {
        relative_path: relative_path.clone(),
        source,
    })?;

    if let Some(schema) = schema
        && let Some(errors) = schema.validate(&page)
    {
        return Err(ScanError::InvalidContent {
            relative_path,
            errors,
        });
    }

    let id = page_id(&page, &ctx);
    page["id"] = Value::String(id.clone());

    for plugin in plugins {
        plugin
            .after_parse(&mut page, &ctx)
            .map_err(|source| ScanError::Plugin {
                hook: "after_parse",
                relative_path: relative_path.clone(),
                source,
            })?;
    }

    Ok(ScannedPage { id, page, ctx })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{valid_page_json, write_file};
    use serde_json::json;
    use tempfile::TempDir;

    fn scan_tree(files: &[(&str, &str)]) -> Result<ScanOutcome, ScanError> {
        let tmp = TempDir::new().unwrap();
        for (rel, contents) in files {
            write_file(tmp.path(), rel, contents);
        }
        scan(tmp.path())
    }

    // =========================================================================
    // Discovery
    // =========================================================================

    #[test]
    fn finds_pages_in_nested_directories() {
        let outcome = scan_tree(&[
            ("about.en.json", &valid_page_json("About Us")),
            ("blog/first.en.json", &valid_page_json("First Post")),
            ("blog/nested/deep.en.json", &valid_page_json("Deep Post")),
        ])
        .unwrap();

        let ids: Vec<&str> = outcome.pages.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["about", "blog/first", "blog/nested/deep"]);
    }

    #[test]
    fn skips_dotfiles_config_and_unknown_extensions() {
        let outcome = scan_tree(&[
            ("about.en.json", &valid_page_json("About Us")),
            (".hidden.en.json", &valid_page_json("Dotfile")),
            (".drafts/wip.en.json", &valid_page_json("Draft")),
            ("photo.en.png", "not content"),
            ("notes.txt", "not content"),
        ])
        .unwrap();

        assert_eq!(outcome.pages.len(), 1);
        assert_eq!(outcome.pages[0].id, "about");
    }

    #[test]
    fn discovery_order_is_path_sorted() {
        let outcome = scan_tree(&[
            ("zebra.en.json", &valid_page_json("Zebra")),
            ("alpha.en.json", &valid_page_json("Alpha")),
            ("blog/post.en.json", &valid_page_json("Post")),
        ])
        .unwrap();

        let ids: Vec<&str> = outcome.pages.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["alpha", "blog/post", "zebra"]);
    }

    // =========================================================================
    // Language handling
    // =========================================================================

    #[test]
    fn lang_comes_from_the_filename_suffix() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "config.toml", "langs = [\"en\", \"uk\"]\n");
        write_file(tmp.path(), "about.en.json", &valid_page_json("About"));
        write_file(tmp.path(), "about.uk.json", &valid_page_json("Про нас"));

        let outcome = scan(tmp.path()).unwrap();
        assert_eq!(outcome.pages.len(), 2);
        assert_eq!(outcome.summaries["en"].items.len(), 1);
        assert_eq!(outcome.summaries["uk"].items.len(), 1);
    }

    #[test]
    fn unknown_lang_suffix_fails_the_pass() {
        let err = scan_tree(&[("about.de.json", &valid_page_json("Über"))]).unwrap_err();
        match err {
            ScanError::InvalidLang { lang, available, .. } => {
                assert_eq!(lang, "de");
                assert_eq!(available, "en");
            }
            other => panic!("expected InvalidLang, got {other}"),
        }
    }

    #[test]
    fn unsuffixed_file_fails_the_lang_check() {
        let err = scan_tree(&[("about.json", &valid_page_json("About"))]).unwrap_err();
        assert!(matches!(err, ScanError::InvalidLang { lang, .. } if lang == "about"));
    }

    // =========================================================================
    // Assembly
    // =========================================================================

    #[test]
    fn id_is_assigned_into_the_record() {
        let outcome =
            scan_tree(&[("blog/first.en.json", &valid_page_json("First"))]).unwrap();
        assert_eq!(outcome.pages[0].page["id"], json!("blog/first"));
    }

    #[test]
    fn markdown_pages_parse_with_front_matter() {
        let md = "+++\ntitle = \"From Markdown\"\nauthor = \"ada\"\ncreatedAt = 2024-05-01T10:00:00Z\n+++\n# Hello\n";
        let outcome = scan_tree(&[("post.en.md", md)]).unwrap();

        let page = &outcome.pages[0].page;
        assert_eq!(page["title"], json!("From Markdown"));
        assert!(page["content"].as_str().unwrap().contains("<h1>Hello</h1>"));
    }

    #[test]
    fn parse_error_names_the_file() {
        let err = scan_tree(&[("bad.en.json", "{ not json")]).unwrap_err();
        assert!(
            matches!(err, ScanError::Parse { ref relative_path, .. } if relative_path.as_str() == "bad.en.json")
        );
    }

    #[test]
    fn schema_violation_names_file_and_fields() {
        let err = scan_tree(&[("bad.en.json", "{ \"title\": \"No Author\" }")]).unwrap_err();
        match err {
            ScanError::InvalidContent {
                relative_path,
                errors,
            } => {
                assert_eq!(relative_path, "bad.en.json");
                assert!(errors.contains("author"));
            }
            other => panic!("expected InvalidContent, got {other}"),
        }
    }

    #[test]
    fn schema_off_accepts_anything_object_shaped() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "config.toml", "[schema]\nmode = \"off\"\n");
        write_file(tmp.path(), "free.en.json", "{ \"whatever\": 1 }");

        let outcome = scan(tmp.path()).unwrap();
        assert_eq!(outcome.pages.len(), 1);
    }

    // =========================================================================
    // Summarization wiring
    // =========================================================================

    #[test]
    fn summaries_follow_config() {
        let tmp = TempDir::new().unwrap();
        write_file(
            tmp.path(),
            "config.toml",
            "[summary]\nfields = [\"title\", \"createdAt\"]\nsort_by = [\"-createdAt\"]\nindex_by = [\"categories\"]\n",
        );
        write_file(
            tmp.path(),
            "one.en.json",
            "{ \"title\": \"One\", \"author\": \"ada\", \"createdAt\": \"2021-01-01\", \"content\": \"x\", \"categories\": [\"tech\"] }",
        );
        write_file(
            tmp.path(),
            "two.en.json",
            "{ \"title\": \"Two\", \"author\": \"ada\", \"createdAt\": \"2022-01-01\", \"content\": \"x\", \"categories\": [\"life\", \"tech\"] }",
        );

        let outcome = scan(tmp.path()).unwrap();
        let summary = &outcome.summaries["en"];
        assert_eq!(summary.items[0].get("title"), Some(&json!("Two")));
        assert_eq!(summary.indexes["byCategories"]["tech"], vec![0, 1]);
        assert_eq!(summary.indexes["byCategories"]["life"], vec![0]);
    }

    #[test]
    fn hidden_pages_are_kept_as_pages_but_not_summarized() {
        let hidden = "{ \"title\": \"Secret Page\", \"author\": \"ada\", \"createdAt\": \"2021-01-01\", \"content\": \"x\", \"hidden\": true }";
        let outcome = scan_tree(&[
            ("visible.en.json", &valid_page_json("Visible")),
            ("secret.en.json", hidden),
        ])
        .unwrap();

        assert_eq!(outcome.pages.len(), 2);
        assert_eq!(outcome.summaries["en"].items.len(), 1);
    }

    // =========================================================================
    // Plugins
    // =========================================================================

    struct Stamp;
    impl ContentPlugin for Stamp {
        fn after_parse(&self, page: &mut Value, ctx: &ParsingContext) -> Result<(), PluginError> {
            page["stampedFrom"] = json!(ctx.relative_path);
            Ok(())
        }
    }

    #[test]
    fn after_parse_hooks_see_assembled_pages() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "about.en.json", &valid_page_json("About"));

        let config = BuildConfig::default();
        let plugins: Vec<Box<dyn ContentPlugin>> = vec![Box::new(Stamp)];
        let outcome =
            scan_with(tmp.path(), &config, ScanOptions::default(), &plugins).unwrap();

        assert_eq!(outcome.pages[0].page["stampedFrom"], json!("about.en.json"));
        // id was already assigned when the hook ran
        assert_eq!(outcome.pages[0].page["id"], json!("about"));
    }

    struct Refuse;
    impl ContentPlugin for Refuse {
        fn before_parse(&self, _source: &str, _ctx: &ParsingContext) -> Result<(), PluginError> {
            Err("refused".into())
        }
    }

    #[test]
    fn plugin_error_aborts_the_pass() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "about.en.json", &valid_page_json("About"));

        let config = BuildConfig::default();
        let plugins: Vec<Box<dyn ContentPlugin>> = vec![Box::new(Refuse)];
        let err =
            scan_with(tmp.path(), &config, ScanOptions::default(), &plugins).unwrap_err();

        assert!(matches!(err, ScanError::Plugin { hook: "before_parse", .. }));
    }
}
