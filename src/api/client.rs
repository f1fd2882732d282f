/// Blocking client for the templates endpoint.
use std::io::Write;
use std::time::{Duration, Instant};

use reqwest::{Method, Url};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;

use super::errors::ApiError;
use super::query::Query;
use crate::cli::output::{report_failure, report_transport_error};

const JSON_MIME: &str = "application/json";

/// Everything the client needs; passed in explicitly at construction.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Sent verbatim in the `Authorization` header, no scheme prefix.
    pub api_key: String,
    /// Collection URL, ending in `/api/v1/templates/`.
    pub templates_url: Url,
    pub timeout: Duration,
}

/// Status and raw body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    /// Only 200 counts as success for the templates endpoints.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Body parsed as JSON, or `None` if it is not JSON.
    #[must_use]
    pub fn json(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }

    /// The top-level `results` field, if present and non-null.
    #[must_use]
    pub fn results(&self) -> Option<Value> {
        match self.json()? {
            Value::Object(mut map) => map.remove("results").filter(|v| !v.is_null()),
            _ => None,
        }
    }

    /// Write `<status> <body>` to the diagnostics stream.
    pub fn report_failure(&self, err: &mut dyn Write) {
        report_failure(err, self.status, &self.body);
    }
}

/// Thin wrapper over `reqwest::blocking::Client` with the API's fixed headers.
pub struct ApiClient {
    http: Client,
    config: ClientConfig,
}

impl ApiClient {
    /// Build a client honoring the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::ClientBuild` if the TLS backend cannot initialise.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ApiError::ClientBuild)?;
        Ok(Self { http, config })
    }

    /// URL of the templates collection.
    #[must_use]
    pub fn templates_url(&self) -> &Url {
        &self.config.templates_url
    }

    /// URL of a single template; `id` becomes one percent-encoded path segment.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidUrl` if the collection URL cannot take path segments.
    pub fn template_url(&self, id: &str) -> Result<Url, ApiError> {
        let mut url = self.config.templates_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl {
                base: self.config.templates_url.to_string(),
            })?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    /// Issue a GET. Transport failures are reported and yield `None`.
    pub fn get(&self, url: &Url, query: &Query, err: &mut dyn Write) -> Option<ApiResponse> {
        let req = self.request(Method::GET, url);
        self.send(req, url, query, err)
    }

    /// Issue a PUT with a JSON body. Transport failures are reported and yield `None`.
    pub fn put(
        &self,
        url: &Url,
        query: &Query,
        body: &Value,
        err: &mut dyn Write,
    ) -> Option<ApiResponse> {
        let req = self.request(Method::PUT, url).json(body);
        self.send(req, url, query, err)
    }

    fn request(&self, method: Method, url: &Url) -> RequestBuilder {
        log::debug!("{method} {url}");
        self.http
            .request(method, url.clone())
            .header(AUTHORIZATION, self.config.api_key.as_str())
            .header(ACCEPT, JSON_MIME)
            .header(CONTENT_TYPE, JSON_MIME)
    }

    fn send(
        &self,
        req: RequestBuilder,
        url: &Url,
        query: &Query,
        err: &mut dyn Write,
    ) -> Option<ApiResponse> {
        let pairs = query.to_pairs();
        log::debug!("query {}", query.to_json());
        let start = Instant::now();

        let result = req
            .query(&pairs)
            .send()
            .and_then(|resp| {
                let status = resp.status().as_u16();
                resp.text().map(|body| ApiResponse { status, body })
            });

        let ms = start.elapsed().as_secs_f64() * 1000.0;
        match result {
            Ok(resp) => {
                log::debug!("{url} -> {} in {ms:.2}ms", resp.status);
                Some(resp)
            }
            Err(source) => {
                log::debug!("{url} failed after {ms:.2}ms");
                report_transport_error(err, &source);
                None
            }
        }
    }
}
