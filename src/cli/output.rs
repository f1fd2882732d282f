/// Output formatting: diagnostics (stderr in the binary) and the `list`
/// writers (CSV, table, JSON).
use std::io::Write;

use comfy_table::{Table, presets::UTF8_BORDERS_ONLY};
use serde_json::Value;

use super::args::ListFormat;
use crate::errors::AppError;
use crate::template::{LIST_FIELDS, TemplateRow};

/// Width of the key column in diagnostic report lines.
const REPORT_KEY_WIDTH: usize = 24;

// --- Diagnostics (stderr) ---

/// Format a `key: value` diagnostic line.
///
/// Strings print verbatim; objects, arrays and scalars print as JSON.
#[must_use]
pub fn format_report(key: &str, value: &Value) -> String {
    let vstr = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    format!("{:width$} {vstr}", format!("{key}:"), width = REPORT_KEY_WIDTH)
}

/// Write a `key: value` diagnostic line.
///
/// Diagnostics are best-effort; a failed write is ignored.
pub fn report(err: &mut dyn Write, key: &str, value: &Value) {
    let _ = writeln!(err, "{}", format_report(key, value));
}

/// Report a non-success HTTP response: `<status> <body>`.
pub fn report_failure(err: &mut dyn Write, status: u16, body: &str) {
    let _ = writeln!(err, "{status} {body}");
}

/// Report a transport-level failure.
pub fn report_transport_error(err: &mut dyn Write, source: &reqwest::Error) {
    let kind = if source.is_timeout() {
        "timeout"
    } else if source.is_connect() {
        "connection error"
    } else {
        "request error"
    };
    let _ = writeln!(err, "error: {kind}: {source}");
}

/// Report an operator-facing error that does not stop the process.
pub fn report_error(err: &mut dyn Write, message: &str) {
    let _ = writeln!(err, "{message}");
}

/// Write a fatal error to stderr.
pub fn write_error(err: &AppError) {
    eprintln!("Error: {err}");
}

// --- Template list (stdout) ---

/// Write template list rows in the chosen format.
///
/// # Errors
///
/// Returns `AppError` if writing to `out` fails.
pub fn write_template_rows<W: Write>(
    rows: &[TemplateRow],
    format: ListFormat,
    out: &mut W,
) -> Result<(), AppError> {
    match format {
        ListFormat::Csv => write_csv(rows, out),
        ListFormat::Table => write_table(rows, out),
        ListFormat::Json => {
            let values: Vec<Value> = rows.iter().map(TemplateRow::to_json).collect();
            serde_json::to_writer_pretty(&mut *out, &values)?;
            writeln!(out)?;
            Ok(())
        }
    }
}

fn write_csv<W: Write>(rows: &[TemplateRow], out: &mut W) -> Result<(), AppError> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(LIST_FIELDS)?;
    for row in rows {
        wtr.write_record(row.cells())?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_table<W: Write>(rows: &[TemplateRow], out: &mut W) -> Result<(), AppError> {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(LIST_FIELDS.iter().map(|f| f.to_uppercase()));
    for row in rows {
        table.add_row(row.cells());
    }
    writeln!(out, "{table}")?;
    Ok(())
}
