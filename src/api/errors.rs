/// Errors from the HTTP API layer.
///
/// Transport failures are not represented here: the client reports them
/// and hands back no response.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The blocking HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// A template id could not be appended to the collection URL.
    #[error("Cannot build a template URL from '{base}'")]
    InvalidUrl {
        /// The collection URL that rejected the path segment.
        base: String,
    },
}
