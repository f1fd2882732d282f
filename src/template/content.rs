/// Content parts and the split-to-files writer used by `retrieve --outfile`.
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use serde_json::{Map, Value};

use crate::cli::output::report;
use crate::errors::AppError;

/// A content part that is stored in its own file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentPart {
    Text,
    Html,
    AmpHtml,
}

impl ContentPart {
    /// Map a `content` key to a file-backed part. Other keys have no file.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "text" => Some(Self::Text),
            "html" => Some(Self::Html),
            "amp_html" => Some(Self::AmpHtml),
            _ => None,
        }
    }

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Html => "html",
            Self::AmpHtml => "amp_html",
        }
    }

    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Text => ".txt",
            Self::Html => ".html",
            Self::AmpHtml => ".amp.html",
        }
    }

    /// `<base><extension>`; the base is used as given, not as a stem.
    #[must_use]
    pub fn file_path(self, base: &str) -> PathBuf {
        PathBuf::from(format!("{base}{}", self.extension()))
    }
}

/// Write each file-backed part of `content` to `<base><extension>`.
///
/// Existing files are overwritten. Keys without a file (headers, subject,
/// from, ...) are reported to `err` only. Returns the paths written, in
/// content order.
///
/// # Errors
///
/// Returns `AppError::Io` on the first failed write; earlier files remain.
pub fn write_content_parts(
    content: &Map<String, Value>,
    base: &str,
    err: &mut dyn Write,
) -> Result<Vec<PathBuf>, AppError> {
    let mut written = Vec::new();
    for (key, value) in content {
        let part = ContentPart::from_key(key);
        match (part, value.as_str()) {
            (Some(part), Some(text)) => {
                let path = part.file_path(base);
                report(
                    err,
                    &format!("Writing {} file", part.key()),
                    &Value::String(path.display().to_string()),
                );
                fs::write(&path, text).map_err(|source| AppError::Io {
                    path: path.clone(),
                    source,
                })?;
                written.push(path);
            }
            _ => report(err, key, value),
        }
    }
    Ok(written)
}
