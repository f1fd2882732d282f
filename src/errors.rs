/// Top-level errors: everything that stops the process with a non-zero status.
///
/// API-level failures (non-2xx responses, transport errors) are reported
/// where they happen and never surface here.
use std::io::ErrorKind;
use std::path::PathBuf;

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or invalid environment configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    /// A content part could not be written.
    #[error("Failed to write '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing to stdout failed (e.g. closed pipe).
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
}

impl AppError {
    /// True when stdout was closed by the reader, however the write reached it.
    #[must_use]
    pub fn is_broken_pipe(&self) -> bool {
        let kind = match self {
            Self::Output(e) => Some(e.kind()),
            Self::Json(e) => e.io_error_kind(),
            Self::Csv(e) => match e.kind() {
                csv::ErrorKind::Io(io) => Some(io.kind()),
                _ => None,
            },
            Self::Config(_) | Self::Api(_) | Self::Io { .. } => None,
        };
        kind == Some(ErrorKind::BrokenPipe)
    }

    /// Return the CLI exit code for this error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        i32::from(!self.is_broken_pipe())
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn test_exit_codes() {
        let missing = AppError::from(ConfigError::MissingVar { name: "API_KEY" });
        assert_eq!(missing.exit_code(), 1);

        let denied = AppError::Io {
            path: PathBuf::from("out.txt"),
            source: io::Error::from(ErrorKind::PermissionDenied),
        };
        assert_eq!(denied.exit_code(), 1);

        let pipe = AppError::from(io::Error::from(ErrorKind::BrokenPipe));
        assert!(pipe.is_broken_pipe());
        assert_eq!(pipe.exit_code(), 0);

        let full = AppError::from(io::Error::from(ErrorKind::Other));
        assert_eq!(full.exit_code(), 1);
    }

    #[test]
    fn test_broken_pipe_through_serializer() {
        let syntax = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(AppError::from(syntax).exit_code(), 1);

        let csv = csv::Error::from(io::Error::from(ErrorKind::BrokenPipe));
        assert_eq!(AppError::from(csv).exit_code(), 0);
    }
}
