/// `list` command: list all templates in the account.
use std::io::Write;

use serde_json::Value;

use crate::api::{ApiClient, build_query};
use crate::cli::args::ListArgs;
use crate::cli::output::write_template_rows;
use crate::errors::AppError;
use crate::template::TemplateRow;

/// Run `sparkytemplate list`.
///
/// # Errors
///
/// Returns `AppError` only if writing to stdout fails.
pub fn run(args: &ListArgs, client: &ApiClient) -> Result<(), AppError> {
    let mut out = std::io::stdout().lock();
    let mut err = std::io::stderr().lock();
    list_templates(args, client, &mut out, &mut err)
}

/// Fetch the template list and write it to `out`; diagnostics go to `err`.
///
/// Nothing is written to `out` when the request fails or the list is empty.
///
/// # Errors
///
/// Returns `AppError` if writing to `out` fails.
pub fn list_templates<W: Write>(
    args: &ListArgs,
    client: &ApiClient,
    out: &mut W,
    err: &mut dyn Write,
) -> Result<(), AppError> {
    let query = build_query(&args.query_fields(), &[], err);
    let Some(response) = client.get(client.templates_url(), &query, err) else {
        return Ok(());
    };
    if !response.is_ok() {
        response.report_failure(err);
        return Ok(());
    }

    let rows: Vec<TemplateRow> = match response.results() {
        Some(Value::Array(records)) => records.iter().map(TemplateRow::from_record).collect(),
        _ => Vec::new(),
    };
    if rows.is_empty() {
        return Ok(());
    }
    write_template_rows(&rows, args.format, out)
}
