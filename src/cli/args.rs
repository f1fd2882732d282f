/// CLI argument definitions via clap derive.
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;

use crate::api::{QueryField, QueryValue};

/// sparkytemplate — manage SparkPost templates.
#[derive(Debug, Parser)]
#[command(
    name = "sparkytemplate",
    about = "SparkPost template update utility",
    version
)]
pub struct Cli {
    /// Log request/response details to stderr.
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// All subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List all templates in this account.
    List(ListArgs),
    /// Retrieve a template.
    Retrieve(RetrieveArgs),
    /// Write headers to an existing template (overwriting any existing headers).
    #[command(name = "write_headers", alias = "write-headers")]
    WriteHeaders(WriteHeadersArgs),
}

/// Output format for `list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum ListFormat {
    /// Comma-separated values with a header row.
    #[default]
    Csv,
    /// Aligned table (human-readable).
    Table,
    /// JSON array of the listed fields.
    Json,
}

/// Arguments for `sparkytemplate list`.
#[derive(Debug, Parser)]
pub struct ListArgs {
    /// If true, returns the draft templates. If false, returns the published
    /// templates. When not provided, returns the most recently edited
    /// templates (draft or published).
    #[arg(long, value_name = "true|false", value_parser = parse_bool_token)]
    pub draft: Option<bool>,

    /// If true, returns only shared templates. If false, returns only
    /// non-shared templates.
    #[arg(
        long = "shared_with_subaccounts",
        value_name = "true|false",
        value_parser = parse_bool_token
    )]
    pub shared_with_subaccounts: Option<bool>,

    /// Output format.
    #[arg(long, value_name = "FORMAT", default_value = "csv")]
    pub format: ListFormat,
}

impl ListArgs {
    /// Options that map onto API query parameters.
    #[must_use]
    pub fn query_fields(&self) -> Vec<QueryField> {
        vec![
            ("draft", self.draft.map(QueryValue::Bool)),
            (
                "shared_with_subaccounts",
                self.shared_with_subaccounts.map(QueryValue::Bool),
            ),
        ]
    }
}

/// Arguments for `sparkytemplate retrieve`.
#[derive(Debug, Parser)]
pub struct RetrieveArgs {
    /// Identity of the template.
    pub id: String,

    /// If true, returns the draft template. If false, returns the published
    /// template. When not provided, returns the most recently edited template
    /// (draft or published).
    #[arg(long, value_name = "true|false", value_parser = parse_bool_token)]
    pub draft: Option<bool>,

    /// Instead of printing JSON (default), store each content part to files
    /// OUTFILE.txt, .html, .amp.html
    #[arg(long, value_name = "OUTFILE", help_heading = "Special options")]
    pub outfile: Option<String>,
}

impl RetrieveArgs {
    /// Every declared option, including those that never reach the query.
    #[must_use]
    pub fn query_fields(&self) -> Vec<QueryField> {
        vec![
            ("id", Some(QueryValue::Str(self.id.clone()))),
            ("draft", self.draft.map(QueryValue::Bool)),
            ("outfile", self.outfile.clone().map(QueryValue::Str)),
        ]
    }
}

/// Arguments for `sparkytemplate write_headers`.
#[derive(Debug, Parser)]
pub struct WriteHeadersArgs {
    /// Identity of the template.
    pub id: String,

    /// An existing published version can be overwritten directly by setting
    /// this to true. If not passed or set to false, the draft version is
    /// updated.
    #[arg(
        long = "update_published",
        value_name = "true|false",
        value_parser = parse_bool_token
    )]
    pub update_published: Option<bool>,

    /// JSON-formatted string with headers to add, e.g. {"CC": "{{my_cc}}"}
    #[arg(long, value_name = "JSON", value_parser = parse_json_object)]
    pub headers: Option<Value>,
}

/// Parse a case-insensitive `true`/`false` token.
///
/// # Errors
///
/// Returns a message for any other token.
pub fn parse_bool_token(s: &str) -> Result<bool, String> {
    match s.to_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(format!("expected 'true' or 'false', got '{s}'")),
    }
}

/// Parse a JSON document.
///
/// # Errors
///
/// Returns the parser message for invalid JSON.
pub fn parse_json(s: &str) -> Result<Value, String> {
    serde_json::from_str(s).map_err(|e| format!("invalid JSON: {e}"))
}

/// Parse a JSON document that must be an object.
///
/// # Errors
///
/// Returns the parser message for invalid JSON, or names the value kind
/// when the document is valid but not an object.
pub fn parse_json_object(s: &str) -> Result<Value, String> {
    let kind = match parse_json(s)? {
        value @ Value::Object(_) => return Ok(value),
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
    };
    Err(format!("expected a JSON object, got {kind}"))
}
