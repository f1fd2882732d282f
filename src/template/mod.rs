/// Template domain layer: the remote template object, content parts, list rows.
pub mod content;
pub mod listing;

use serde_json::{Map, Value};

pub use content::write_content_parts;
pub use listing::{LIST_FIELDS, TemplateRow};

/// A template as returned by the API.
///
/// Holds the full JSON object so that a PUT sends back every field the
/// service returned, in the same order.
#[derive(Debug, Clone, PartialEq)]
pub struct Template(Map<String, Value>);

impl Template {
    /// Wrap a `results` payload. Non-object payloads are not templates.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Whether this is the published version.
    #[must_use]
    pub fn is_published(&self) -> bool {
        self.0.get("published").and_then(Value::as_bool).unwrap_or(false)
    }

    /// "Published" or "Draft".
    #[must_use]
    pub fn version_label(&self) -> &'static str {
        if self.is_published() {
            "Published"
        } else {
            "Draft"
        }
    }

    /// The `content` object, if present.
    #[must_use]
    pub fn content(&self) -> Option<&Map<String, Value>> {
        self.0.get("content").and_then(Value::as_object)
    }

    /// Current `content.headers`.
    #[must_use]
    pub fn headers(&self) -> Option<&Value> {
        self.content().and_then(|c| c.get("headers"))
    }

    /// Replace `content.headers` wholesale. Creates `content` if missing.
    pub fn set_headers(&mut self, headers: Value) {
        let content = self
            .0
            .entry("content")
            .or_insert_with(|| Value::Object(Map::new()));
        if !content.is_object() {
            *content = Value::Object(Map::new());
        }
        if let Value::Object(map) = content {
            map.insert("headers".to_owned(), headers);
        }
    }

    /// Convert back into a JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}
