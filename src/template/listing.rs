/// Projection of template list records onto the fixed list columns.
use serde_json::{Map, Value};

/// Columns of the `list` output, in order.
pub const LIST_FIELDS: [&str; 9] = [
    "id",
    "name",
    "published",
    "description",
    "has_draft",
    "has_published",
    "last_use",
    "last_update_time",
    "shared_with_subaccounts",
];

/// One record of the `list` output. Fields outside `LIST_FIELDS` are dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateRow {
    values: Vec<Option<Value>>,
}

impl TemplateRow {
    /// Project a JSON record. Non-object records yield an all-empty row.
    #[must_use]
    pub fn from_record(record: &Value) -> Self {
        let values = LIST_FIELDS
            .iter()
            .map(|f| record.get(f).filter(|v| !v.is_null()).cloned())
            .collect();
        Self { values }
    }

    /// Text cells; absent and null fields render empty.
    #[must_use]
    pub fn cells(&self) -> Vec<String> {
        self.values.iter().map(|v| v.as_ref().map_or_else(String::new, cell)).collect()
    }

    /// JSON object holding only the present list fields.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = LIST_FIELDS
            .iter()
            .zip(&self.values)
            .filter_map(|(k, v)| v.clone().map(|v| ((*k).to_owned(), v)))
            .collect();
        Value::Object(map)
    }
}

/// Render one value as a cell: strings verbatim, everything else as JSON.
fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
