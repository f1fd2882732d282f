/// Environment configuration: API key, API host, request timeout.
use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

use crate::api::ClientConfig;

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "API_KEY";
/// Environment variable holding the API host.
pub const API_HOST_VAR: &str = "API_HOST";
/// Older variable names, consulted when the primary ones are unset.
const LEGACY_API_KEY_VAR: &str = "SPARKPOST_API_KEY";
const LEGACY_API_HOST_VAR: &str = "SPARKPOST_HOST";

/// Host used when no host variable is set.
pub const DEFAULT_HOST: &str = "api.sparkpost.com";

/// Timeout applied to every API request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Path of the templates collection, relative to the host.
const TEMPLATES_PATH: &str = "/api/v1/templates/";

/// Errors while resolving configuration. All of them are fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("{name} environment variable not set - stopping.")]
    MissingVar {
        /// Name of the missing variable.
        name: &'static str,
    },

    /// The configured host does not form a valid URL.
    #[error("Invalid API host '{host}': {reason}")]
    InvalidHost {
        /// The normalized host.
        host: String,
        /// Parser message.
        reason: String,
    },
}

/// Resolved configuration. Built once in `main`, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Sent verbatim as the `Authorization` header.
    pub api_key: String,
    /// Normalized host, e.g. `https://api.sparkpost.com`.
    pub host: String,
    pub timeout: Duration,
}

impl Config {
    /// Resolve configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingVar` when no API key is set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingVar` when no API key is set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .or_else(|| lookup(LEGACY_API_KEY_VAR))
            .ok_or(ConfigError::MissingVar { name: API_KEY_VAR })?;

        let raw_host = lookup(API_HOST_VAR)
            .or_else(|| lookup(LEGACY_API_HOST_VAR))
            .unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let host = host_cleanup(&raw_host);
        log::debug!("resolved API host {host}");

        Ok(Self {
            api_key,
            host,
            timeout: REQUEST_TIMEOUT,
        })
    }

    /// Full URL of the templates collection (always ends in `/`).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidHost` if the host cannot be parsed.
    pub fn templates_url(&self) -> Result<Url, ConfigError> {
        let raw = format!("{}{TEMPLATES_PATH}", self.host);
        Url::parse(&raw).map_err(|e| ConfigError::InvalidHost {
            host: self.host.clone(),
            reason: e.to_string(),
        })
    }

    /// Build the explicit configuration handed to the HTTP wrapper.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidHost` if the host cannot be parsed.
    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        Ok(ClientConfig {
            api_key: self.api_key.clone(),
            templates_url: self.templates_url()?,
            timeout: self.timeout,
        })
    }
}

/// Condense a host into `https://<host>` with no trailing slash or `/api/v1`.
///
/// Exactly one `/api/v1` suffix is removed, so the result is a fixed point
/// for every host that does not end in a repeated `/api/v1/api/v1`. Such a
/// host loses one more suffix on each further pass.
#[must_use]
pub fn host_cleanup(host: &str) -> String {
    let mut h = if host.starts_with("https://") {
        host.to_owned()
    } else if let Some(rest) = host.strip_prefix("http://") {
        format!("https://{rest}")
    } else {
        format!("https://{host}")
    };
    strip_end(&mut h, "/");
    strip_end(&mut h, "/api/v1");
    strip_end(&mut h, "/");
    h
}

fn strip_end(h: &mut String, suffix: &str) {
    if h.ends_with(suffix) {
        h.truncate(h.len() - suffix.len());
    }
}
