/// HTTP API layer: query construction and the blocking client.
pub mod client;
pub mod errors;
pub mod query;

pub use client::{ApiClient, ClientConfig};
pub use errors::ApiError;
pub use query::{Query, QueryField, QueryValue, build_query};
