/// Command dispatch: routes `Command` enum variants to their implementations.
pub mod list;
pub mod retrieve;
pub mod write_headers;

use crate::api::ApiClient;
use crate::cli::args::Command;
use crate::errors::AppError;

/// Dispatch a parsed `Command` to its handler.
///
/// # Errors
///
/// Returns `AppError` on local failures (file or stdout writes, URL building).
/// API failures are reported by the handlers and are not errors.
pub fn dispatch(command: &Command, client: &ApiClient) -> Result<(), AppError> {
    match command {
        Command::List(args) => list::run(args, client),
        Command::Retrieve(args) => retrieve::run(args, client),
        Command::WriteHeaders(args) => write_headers::run(args, client),
    }
}
