//! Structural validation of parsed page records.
//!
//! Every page is checked against a [`Schema`] before it enters the pipeline:
//! a list of required field paths plus per-field rules (expected type,
//! minimum string length, allowed values, array element type). Validation
//! answers with `None` for a valid page or a single human-readable message
//! listing every violation — content authors fix their file from that one
//! message, so it names each offending field.
//!
//! Schemas are declarative data: the stock page schema ships in
//! [`Schema::default_page_schema`], and builds can define their own rules in
//! `config.toml` (the whole [`Schema`] type deserializes from the
//! `[schema]` table) or disable validation outright.
//!
//! Rules apply only when the field is present; `null` counts as absent, so
//! optional nullable fields need no special casing. Requiredness is a
//! separate list.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::fieldpath;

/// Expected JSON type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    String,
    Number,
    Boolean,
    Array,
    Object,
}

impl ValueKind {
    fn matches(self, value: &Value) -> bool {
        match self {
            ValueKind::String => value.is_string(),
            ValueKind::Number => value.is_number(),
            ValueKind::Boolean => value.is_boolean(),
            ValueKind::Array => value.is_array(),
            ValueKind::Object => value.is_object(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            ValueKind::String => "a string",
            ValueKind::Number => "a number",
            ValueKind::Boolean => "a boolean",
            ValueKind::Array => "an array",
            ValueKind::Object => "an object",
        }
    }
}

/// Constraints on one field, applied when the field is present and non-null.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldRule {
    /// Dotted path of the field this rule covers.
    pub path: String,
    /// Expected type.
    pub kind: Option<ValueKind>,
    /// Minimum length for string values.
    pub min_length: Option<usize>,
    /// Allowed values for strings (or string array elements).
    pub one_of: Vec<String>,
    /// Expected element type for array values.
    pub item_kind: Option<ValueKind>,
}

impl FieldRule {
    fn check(&self, value: &Value, violations: &mut Vec<String>) {
        if let Some(kind) = self.kind
            && !kind.matches(value)
        {
            violations.push(format!("\"{}\" must be {}", self.path, kind.name()));
            return;
        }

        if let Some(min) = self.min_length
            && let Some(s) = value.as_str()
            && s.chars().count() < min
        {
            violations.push(format!(
                "\"{}\" must be at least {min} characters",
                self.path
            ));
        }

        if !self.one_of.is_empty() {
            let scalars: Vec<&Value> = match value {
                Value::Array(items) => items.iter().collect(),
                single => vec![single],
            };
            for scalar in scalars {
                if let Some(s) = scalar.as_str()
                    && !self.one_of.iter().any(|allowed| allowed == s)
                {
                    violations.push(format!(
                        "\"{}\" value \"{s}\" is not one of: {}",
                        self.path,
                        self.one_of.join(", ")
                    ));
                }
            }
        }

        if let Some(item_kind) = self.item_kind
            && let Some(items) = value.as_array()
        {
            for (i, item) in items.iter().enumerate() {
                if !item.is_null() && !item_kind.matches(item) {
                    violations.push(format!(
                        "\"{}[{i}]\" must be {}",
                        self.path,
                        item_kind.name()
                    ));
                }
            }
        }
    }
}

/// Declarative page schema: required paths plus per-field rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Schema {
    /// Paths that must be present and non-null.
    pub required: Vec<String>,
    /// Per-field constraints.
    pub rules: Vec<FieldRule>,
}

impl Schema {
    /// The stock page schema: pages must carry a `title`, an `author`, a
    /// `createdAt` timestamp, and their `content`; common optional fields
    /// are type-checked when present.
    pub fn default_page_schema() -> Self {
        let string_field = |path: &str| FieldRule {
            path: path.to_string(),
            kind: Some(ValueKind::String),
            ..FieldRule::default()
        };

        Schema {
            required: ["title", "author", "createdAt", "content"]
                .map(String::from)
                .to_vec(),
            rules: vec![
                FieldRule {
                    min_length: Some(1),
                    ..string_field("title")
                },
                string_field("author"),
                string_field("createdAt"),
                string_field("content"),
                string_field("alias"),
                FieldRule {
                    path: "categories".to_string(),
                    kind: Some(ValueKind::Array),
                    item_kind: Some(ValueKind::String),
                    ..FieldRule::default()
                },
                FieldRule {
                    path: "meta".to_string(),
                    kind: Some(ValueKind::Object),
                    ..FieldRule::default()
                },
                FieldRule {
                    path: "hidden".to_string(),
                    kind: Some(ValueKind::Boolean),
                    ..FieldRule::default()
                },
            ],
        }
    }

    /// Validate a page. `None` means valid; otherwise one message listing
    /// every violation, separated by `; `.
    pub fn validate(&self, page: &Value) -> Option<String> {
        let mut violations = Vec::new();

        if !page.is_object() {
            return Some("page must be an object".to_string());
        }

        for path in &self.required {
            match fieldpath::get(page, path) {
                None | Some(Value::Null) => {
                    violations.push(format!("missing required field \"{path}\""));
                }
                Some(_) => {}
            }
        }

        for rule in &self.rules {
            if let Some(value) = fieldpath::get(page, &rule.path)
                && !value.is_null()
            {
                rule.check(value, &mut violations);
            }
        }

        if violations.is_empty() {
            None
        } else {
            Some(violations.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_page() -> Value {
        json!({
            "title": "A Valid Page",
            "author": "ada",
            "createdAt": "2024-05-01T10:00:00Z",
            "content": "body",
            "categories": ["tech"]
        })
    }

    #[test]
    fn stock_schema_accepts_valid_page() {
        assert_eq!(Schema::default_page_schema().validate(&valid_page()), None);
    }

    #[test]
    fn missing_required_fields_are_all_reported() {
        let errors = Schema::default_page_schema()
            .validate(&json!({ "title": "Only a Title" }))
            .unwrap();
        assert!(errors.contains("missing required field \"author\""));
        assert!(errors.contains("missing required field \"createdAt\""));
        assert!(errors.contains("missing required field \"content\""));
    }

    #[test]
    fn null_counts_as_missing_for_required() {
        let mut page = valid_page();
        page["author"] = json!(null);
        let errors = Schema::default_page_schema().validate(&page).unwrap();
        assert!(errors.contains("missing required field \"author\""));
    }

    #[test]
    fn wrong_type_is_reported_with_expected_kind() {
        let mut page = valid_page();
        page["categories"] = json!("tech");
        let errors = Schema::default_page_schema().validate(&page).unwrap();
        assert!(errors.contains("\"categories\" must be an array"));
    }

    #[test]
    fn array_elements_are_type_checked() {
        let mut page = valid_page();
        page["categories"] = json!(["tech", 7]);
        let errors = Schema::default_page_schema().validate(&page).unwrap();
        assert!(errors.contains("\"categories[1]\" must be a string"));
    }

    #[test]
    fn null_rule_fields_are_skipped() {
        let mut page = valid_page();
        page["alias"] = json!(null);
        assert_eq!(Schema::default_page_schema().validate(&page), None);
    }

    #[test]
    fn non_object_page_is_rejected() {
        assert!(
            Schema::default_page_schema()
                .validate(&json!(["not", "an", "object"]))
                .is_some()
        );
    }

    #[test]
    fn one_of_constrains_strings_and_array_elements() {
        let schema = Schema {
            required: vec![],
            rules: vec![FieldRule {
                path: "categories".to_string(),
                one_of: vec!["backend".to_string(), "frontend".to_string()],
                ..FieldRule::default()
            }],
        };

        assert_eq!(
            schema.validate(&json!({ "categories": ["backend"] })),
            None
        );
        let errors = schema
            .validate(&json!({ "categories": ["backend", "cooking"] }))
            .unwrap();
        assert!(errors.contains("\"categories\" value \"cooking\" is not one of"));
    }

    #[test]
    fn min_length_applies_to_strings() {
        let schema = Schema {
            required: vec![],
            rules: vec![FieldRule {
                path: "title".to_string(),
                kind: Some(ValueKind::String),
                min_length: Some(10),
                ..FieldRule::default()
            }],
        };
        assert!(schema.validate(&json!({ "title": "short" })).is_some());
        assert_eq!(schema.validate(&json!({ "title": "long enough title" })), None);
    }

    #[test]
    fn custom_schema_deserializes_from_toml() {
        let schema: Schema = toml::from_str(
            r#"
            required = ["title"]

            [[rules]]
            path = "title"
            kind = "string"
            min_length = 3
            "#,
        )
        .unwrap();

        assert!(schema.validate(&json!({ "title": "ab" })).is_some());
        assert_eq!(schema.validate(&json!({ "title": "abc" })), None);
    }
}
