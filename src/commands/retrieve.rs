/// `retrieve` command: fetch one template as JSON or as per-part files.
use std::io::Write;

use crate::api::{ApiClient, build_query};
use crate::cli::args::RetrieveArgs;
use crate::errors::AppError;
use crate::template::{Template, write_content_parts};

/// Options consumed locally or in the URL path, never sent as query params.
const NON_QUERY_OPTIONS: &[&str] = &["id", "outfile"];

/// Run `sparkytemplate retrieve`.
///
/// # Errors
///
/// Returns `AppError` if a content file or stdout cannot be written.
pub fn run(args: &RetrieveArgs, client: &ApiClient) -> Result<(), AppError> {
    let mut out = std::io::stdout().lock();
    let mut err = std::io::stderr().lock();
    retrieve_template(args, client, &mut out, &mut err)
}

/// Fetch a template; print it as one JSON line, or split it into files when
/// `--outfile` is given. Diagnostics go to `err`.
///
/// # Errors
///
/// Returns `AppError` if a content file or `out` cannot be written.
pub fn retrieve_template<W: Write>(
    args: &RetrieveArgs,
    client: &ApiClient,
    out: &mut W,
    err: &mut dyn Write,
) -> Result<(), AppError> {
    let query = build_query(&args.query_fields(), NON_QUERY_OPTIONS, err);
    let url = client.template_url(&args.id)?;
    let Some(response) = client.get(&url, &query, err) else {
        return Ok(());
    };
    if !response.is_ok() {
        response.report_failure(err);
        return Ok(());
    }
    let Some(results) = response.results() else {
        return Ok(());
    };

    match &args.outfile {
        None => {
            serde_json::to_writer(&mut *out, &results)?;
            writeln!(out)?;
        }
        Some(base) => {
            let template = Template::from_value(results);
            if let Some(content) = template.as_ref().and_then(Template::content) {
                write_content_parts(content, base, err)?;
            }
        }
    }
    Ok(())
}
