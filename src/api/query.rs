/// Query objects sent to the templates API, and the builder that derives
/// them from parsed CLI options.
use std::io::Write;

use serde_json::{Map, Value};

use crate::cli::output::report;

/// Prefix marking an option that belongs in the nested `options` object.
const OPTIONS_PREFIX: &str = "options.";

/// A single query parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Str(String),
    Bool(bool),
    Json(Value),
}

impl QueryValue {
    /// Value as it appears in the URL query string.
    #[must_use]
    pub fn to_param(&self) -> String {
        match self {
            Self::Str(s) => s.clone(),
            Self::Bool(b) => b.to_string(),
            Self::Json(v) => v.to_string(),
        }
    }

    /// Value as a JSON node.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Str(s) => Value::String(s.clone()),
            Self::Bool(b) => Value::Bool(*b),
            Self::Json(v) => v.clone(),
        }
    }
}

impl From<bool> for QueryValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<String> for QueryValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<Value> for QueryValue {
    fn from(v: Value) -> Self {
        Self::Json(v)
    }
}

/// A declared CLI option: its name and the value the user gave, if any.
pub type QueryField = (&'static str, Option<QueryValue>);

/// Top-level fields plus the nested `options` object.
///
/// Field order is insertion order, which follows option declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    fields: Vec<(String, QueryValue)>,
    options: Vec<(String, QueryValue)>,
}

impl Query {
    /// A query holding exactly one top-level field and no options.
    #[must_use]
    pub fn single(name: &str, value: impl Into<QueryValue>) -> Self {
        Self {
            fields: vec![(name.to_owned(), value.into())],
            options: Vec::new(),
        }
    }

    fn set(entries: &mut Vec<(String, QueryValue)>, name: &str, value: QueryValue) {
        if let Some(slot) = entries.iter_mut().find(|(n, _)| n == name) {
            slot.1 = value;
        } else {
            entries.push((name.to_owned(), value));
        }
    }

    /// Nested JSON form: `{ field: value, ..., "options": { ... } }`, as shown
    /// in debug logs.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut obj: Map<String, Value> = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect();
        let options: Map<String, Value> = self
            .options
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect();
        obj.insert("options".to_owned(), Value::Object(options));
        Value::Object(obj)
    }

    /// Flat URL query pairs. Nested options are sent as `options.<name>`.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let top = self.fields.iter().map(|(k, v)| (k.clone(), v.to_param()));
        let nested = self
            .options
            .iter()
            .map(|(k, v)| (format!("{OPTIONS_PREFIX}{k}"), v.to_param()));
        top.chain(nested).collect()
    }
}

/// Build a query object from declared options.
///
/// Unset options and names listed in `exclude` are skipped. Names starting
/// with `options.` land in the nested object with the prefix stripped. Each
/// included field is echoed to `err`.
#[must_use]
pub fn build_query(fields: &[QueryField], exclude: &[&str], err: &mut dyn Write) -> Query {
    let mut query = Query::default();
    for (name, value) in fields {
        let Some(value) = value else { continue };
        if exclude.contains(name) {
            continue;
        }
        report(err, name, &value.to_json());
        match name.strip_prefix(OPTIONS_PREFIX) {
            Some(nested) => Query::set(&mut query.options, nested, value.clone()),
            None => Query::set(&mut query.fields, name, value.clone()),
        }
    }
    query
}
