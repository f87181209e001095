//! Build configuration.
//!
//! A single optional `config.toml` at the content root configures the whole
//! pass. All values have working defaults — a content tree with no config at
//! all builds with English pages, the stock projection, and the stock page
//! schema.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! langs = ["en"]                 # Accepted language suffixes (post.en.json)
//!
//! [summary]
//! fields = ["title", "author", "createdAt", "alias", "categories"]
//! sort_by = []                   # e.g. ["-createdAt", "title"]; "-" = descending
//! index_by = []                  # e.g. ["categories", "meta.keywords"]
//! export = "summaries"           # Summary file name part: {name}_{export}.{lang}.json
//!
//! [schema]
//! mode = "default"               # "default" | "off" | "custom"
//! # For mode = "custom": required paths plus per-field rules
//! # required = ["title"]
//! # [[schema.rules]]
//! # path = "title"
//! # kind = "string"              # string | number | boolean | array | object
//! # min_length = 3
//! # one_of = ["a", "b"]
//! # item_kind = "string"         # element type for arrays
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::schema::{FieldRule, Schema};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Build configuration loaded from the content root's `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Accepted language suffixes. A content file whose suffix is not
    /// listed fails the pass.
    pub langs: Vec<String>,
    /// Summarization settings.
    pub summary: SummaryConfig,
    /// Page validation settings.
    pub schema: SchemaSettings,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            langs: vec!["en".to_string()],
            summary: SummaryConfig::default(),
            schema: SchemaSettings::default(),
        }
    }
}

/// What the per-language summaries project, sort by, and index.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SummaryConfig {
    /// Field paths projected into each summarized item.
    pub fields: Vec<String>,
    /// Sort specifiers; a leading `-` marks a descending key.
    pub sort_by: Vec<String>,
    /// Field paths to build `by<Field>` position indexes over.
    pub index_by: Vec<String>,
    /// Name part of emitted summary files: `{name}_{export}.{lang}.json`.
    pub export: String,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            fields: ["title", "author", "createdAt", "alias", "categories"]
                .map(String::from)
                .to_vec(),
            sort_by: Vec::new(),
            index_by: Vec::new(),
            export: "summaries".to_string(),
        }
    }
}

/// Which schema pages are validated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaMode {
    /// The stock page schema ([`Schema::default_page_schema`]).
    Default,
    /// No validation.
    Off,
    /// The `required`/`rules` defined alongside.
    Custom,
}

/// Page validation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchemaSettings {
    pub mode: SchemaMode,
    /// Custom mode: paths that must be present and non-null.
    pub required: Vec<String>,
    /// Custom mode: per-field constraints.
    pub rules: Vec<FieldRule>,
}

impl Default for SchemaSettings {
    fn default() -> Self {
        Self {
            mode: SchemaMode::Default,
            required: Vec::new(),
            rules: Vec::new(),
        }
    }
}

impl SchemaSettings {
    /// The schema to validate with, or `None` when validation is off.
    pub fn to_schema(&self) -> Option<Schema> {
        match self.mode {
            SchemaMode::Off => None,
            SchemaMode::Default => Some(Schema::default_page_schema()),
            SchemaMode::Custom => Some(Schema {
                required: self.required.clone(),
                rules: self.rules.clone(),
            }),
        }
    }
}

impl BuildConfig {
    /// Validate config values hang together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.langs.is_empty() {
            return Err(ConfigError::Validation("langs must not be empty".into()));
        }
        if let Some(bad) = self
            .langs
            .iter()
            .find(|lang| lang.is_empty() || lang.contains('.'))
        {
            return Err(ConfigError::Validation(format!(
                "invalid lang \"{bad}\": langs must be non-empty and dot-free"
            )));
        }
        if self.summary.fields.is_empty() {
            return Err(ConfigError::Validation(
                "summary.fields must not be empty".into(),
            ));
        }
        if self.summary.export.is_empty() {
            return Err(ConfigError::Validation(
                "summary.export must not be empty".into(),
            ));
        }
        if self.schema.mode == SchemaMode::Custom
            && self.schema.required.is_empty()
            && self.schema.rules.is_empty()
        {
            return Err(ConfigError::Validation(
                "schema.mode = \"custom\" needs required fields or rules".into(),
            ));
        }
        Ok(())
    }
}

/// Load `config.toml` from the content root, falling back to defaults when
/// the file doesn't exist.
pub fn load_config(root: &Path) -> Result<BuildConfig, ConfigError> {
    let path = root.join("config.toml");
    let config = if path.exists() {
        toml::from_str(&fs::read_to_string(&path)?)?
    } else {
        BuildConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// The stock config.toml printed by `pagedex gen-config`: every option with
/// its default value and a short explanation.
pub fn stock_config() -> &'static str {
    r#"# pagedex configuration. Every option is optional - the values below
# are the defaults. Place this file at the root of your content directory.

# Accepted language suffixes. Content files are named {page}.{lang}.{ext},
# e.g. blog/first-post.en.json; a suffix outside this list fails the build.
langs = ["en"]

[summary]
# Field paths projected into each per-language summary item.
fields = ["title", "author", "createdAt", "alias", "categories"]

# Sort specifiers applied to summary items, in precedence order.
# Prefix with "-" for descending: sort_by = ["-createdAt", "title"]
sort_by = []

# Field paths to build position indexes over. A field named meta.keywords
# produces an index named byMetaKeywords in the summary file.
index_by = []

# Name part of emitted summary files: {source}_{export}.{lang}.json
export = "summaries"

[schema]
# Page validation: "default" (title/author/createdAt/content required),
# "off", or "custom" (define required + rules below).
mode = "default"

# For mode = "custom":
# required = ["title", "createdAt"]
# [[schema.rules]]
# path = "title"
# kind = "string"        # string | number | boolean | array | object
# min_length = 3
# one_of = ["a", "b"]    # allowed values for strings / string elements
# item_kind = "string"   # element type for arrays
"#
}
