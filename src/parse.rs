//! Parsing raw content files into page records.
//!
//! Parsers are plain functions selected by file extension. Two ship with the
//! pipeline:
//!
//! - **JSON** (`.json`): the file is the page record.
//! - **Markdown** (`.md`, `.markdown`): an optional `+++`-delimited TOML
//!   front matter block supplies the page fields; the remaining body is
//!   rendered to HTML (via pulldown-cmark) into the `content` field. The
//!   rendered body wins over a `content` key in the front matter.
//!
//! Whatever the format, a page must parse to a JSON object — scalar or array
//! top levels are rejected here so downstream stages can assume field access
//! works.

use crate::types::ParsingContext;
use pulldown_cmark::{Parser, html};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("front matter error: {0}")]
    FrontMatter(#[from] toml::de::Error),
    #[error("unterminated front matter block")]
    UnterminatedFrontMatter,
    #[error("page must be an object, got {found}")]
    NotAnObject { found: &'static str },
}

/// Parse one source file into a page record.
pub type PageParser = fn(&str, &ParsingContext) -> Result<Value, ParseError>;

/// The parser registered for a file extension (leading dot included), if any.
/// Files with other extensions are not content and get skipped by discovery.
pub fn parser_for(ext: &str) -> Option<PageParser> {
    match ext {
        ".json" => Some(parse_json),
        ".md" | ".markdown" => Some(parse_markdown),
        _ => None,
    }
}

/// Default parser: the file is one JSON object.
pub fn parse_json(source: &str, _ctx: &ParsingContext) -> Result<Value, ParseError> {
    ensure_object(serde_json::from_str(source)?)
}

/// Markdown parser: TOML front matter between `+++` lines, body rendered to
/// HTML into `content`.
pub fn parse_markdown(source: &str, _ctx: &ParsingContext) -> Result<Value, ParseError> {
    let (front, body) = split_front_matter(source)?;

    let mut fields = match front {
        Some(text) => {
            let table: toml::Table = toml::from_str(text)?;
            match toml_to_json(toml::Value::Table(table)) {
                Value::Object(map) => map,
                _ => Map::new(),
            }
        }
        None => Map::new(),
    };

    let mut content = String::new();
    html::push_html(&mut content, Parser::new(body));
    fields.insert("content".to_string(), Value::String(content));

    Ok(Value::Object(fields))
}

/// Split `+++`-delimited front matter from the markdown body.
///
/// No opening marker means no front matter; an opening marker without a
/// closing one is an error (silently treating the whole file as body would
/// hide a typo'd delimiter).
fn split_front_matter(source: &str) -> Result<(Option<&str>, &str), ParseError> {
    let Some(after_open) = source.strip_prefix("+++") else {
        return Ok((None, source));
    };
    let Some(after_open) = after_open
        .strip_prefix("\r\n")
        .or_else(|| after_open.strip_prefix('\n'))
    else {
        return Ok((None, source));
    };

    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if line.trim_end() == "+++" {
            let front = &after_open[..offset];
            let body = &after_open[offset + line.len()..];
            return Ok((Some(front), body));
        }
        offset += line.len();
    }
    Err(ParseError::UnterminatedFrontMatter)
}

fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        toml::Value::Boolean(b) => Value::Bool(b),
        // TOML datetimes become ISO-8601 strings, which is what sorting and
        // schema checks expect of timestamps
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_json(value)))
                .collect(),
        ),
    }
}

fn ensure_object(page: Value) -> Result<Value, ParseError> {
    if page.is_object() {
        Ok(page)
    } else {
        let found = match page {
            Value::Null => "null",
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Array(_) => "an array",
            Value::Object(_) => unreachable!(),
        };
        Err(ParseError::NotAnObject { found })
    }
}
