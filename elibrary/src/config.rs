//! Configuration for the eLibrary client.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::errors::ConfigError;

/// Root of the GSA eLibrary site.
pub const DEFAULT_BASE_URL: &str = "https://www.gsaelibrary.gsa.gov";

/// Path of the catalog search endpoint.
pub const DEFAULT_SEARCH_PATH: &str = "/ElibMain/searchResults.do";

/// Search mode requesting an exact phrase match.
pub const DEFAULT_SEARCH_TYPE: &str = "exactWords";

/// Relative path prefix that identifies contractor detail links.
pub const DEFAULT_DETAIL_LINK_PREFIX: &str = "contractorInfo.do";

/// Configuration for HTTP requests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FetchConfig {
    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout in seconds. `None` leaves requests unbounded.
    #[serde(default)]
    pub timeout_seconds: Option<f64>,
}

fn default_user_agent() -> String {
    format!("elibrary/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_seconds: None,
        }
    }
}

impl FetchConfig {
    /// Creates a new fetch configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the timeout.
    #[must_use]
    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Gets timeout as Duration.
    ///
    /// Negative, NaN and out-of-range values are rejected.
    pub fn timeout(&self) -> Result<Option<Duration>, ConfigError> {
        self.timeout_seconds
            .map(|seconds| {
                Duration::try_from_secs_f64(seconds).map_err(|e| {
                    ConfigError::InvalidTimeout(format!("{seconds} seconds: {e}"))
                })
            })
            .transpose()
    }
}

/// Certificate handling for the catalog host.
///
/// The catalog has served certificates that fail verification. Relaxing
/// verification applies only to requests whose host is the catalog host;
/// every other request keeps full verification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TlsConfig {
    /// Accept invalid certificates from the catalog host.
    #[serde(default = "default_true")]
    pub accept_invalid_certs_for_catalog: bool,
}

fn default_true() -> bool {
    true
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            accept_invalid_certs_for_catalog: true,
        }
    }
}

/// Combined configuration for the eLibrary client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElibraryConfig {
    /// Scheme and host of the catalog.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path of the search endpoint, relative to `base_url`.
    #[serde(default = "default_search_path")]
    pub search_path: String,
    /// Value sent as the `searchType` query parameter.
    #[serde(default = "default_search_type")]
    pub search_type: String,
    /// `href` prefix that marks a contractor detail link.
    #[serde(default = "default_detail_link_prefix")]
    pub detail_link_prefix: String,
    /// HTTP settings.
    #[serde(default)]
    pub fetch: FetchConfig,
    /// Certificate handling.
    #[serde(default)]
    pub tls: TlsConfig,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_search_path() -> String {
    DEFAULT_SEARCH_PATH.to_string()
}

fn default_search_type() -> String {
    DEFAULT_SEARCH_TYPE.to_string()
}

fn default_detail_link_prefix() -> String {
    DEFAULT_DETAIL_LINK_PREFIX.to_string()
}

impl Default for ElibraryConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            search_path: default_search_path(),
            search_type: default_search_type(),
            detail_link_prefix: default_detail_link_prefix(),
            fetch: FetchConfig::default(),
            tls: TlsConfig::default(),
        }
    }
}

impl ElibraryConfig {
    /// Creates a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Points the client at a different catalog root, e.g. a local mock server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the search endpoint path.
    #[must_use]
    pub fn with_search_path(mut self, path: impl Into<String>) -> Self {
        self.search_path = path.into();
        self
    }

    /// Sets the detail link prefix.
    #[must_use]
    pub fn with_detail_link_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.detail_link_prefix = prefix.into();
        self
    }

    /// Replaces the HTTP settings.
    #[must_use]
    pub fn with_fetch(mut self, fetch: FetchConfig) -> Self {
        self.fetch = fetch;
        self
    }

    /// Disables the certificate relaxation for the catalog host.
    #[must_use]
    pub fn with_strict_tls(mut self) -> Self {
        self.tls.accept_invalid_certs_for_catalog = false;
        self
    }

    /// Absolute URL of the search endpoint.
    ///
    /// Detail links found in search results are resolved against this URL.
    pub fn search_url(&self) -> Result<Url, ConfigError> {
        let base = Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(ConfigError::InvalidUrl {
                url: self.base_url.clone(),
                reason: "URL cannot be used as a base".to_string(),
            });
        }
        base.join(&self.search_path)
            .map_err(|e| ConfigError::InvalidUrl {
                url: format!("{}{}", self.base_url, self.search_path),
                reason: e.to_string(),
            })
    }

    /// Host name of the catalog, used to scope the TLS relaxation.
    pub fn catalog_host(&self) -> Result<String, ConfigError> {
        let url = self.search_url()?;
        url.host_str()
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| ConfigError::InvalidUrl {
                url: self.base_url.clone(),
                reason: "URL has no host".to_string(),
            })
    }

    /// Checks that the configuration can produce a working client.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.detail_link_prefix.is_empty() {
            return Err(ConfigError::EmptyDetailPrefix);
        }
        self.fetch.timeout()?;
        self.catalog_host().map(|_| ())
    }

    /// Parses a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Load(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Load(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&contents)
    }
}
