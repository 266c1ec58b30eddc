//! Error types for eLibrary lookups.
//!
//! A lookup call can fail in exactly two ways: the transport reports a
//! network-level failure, or the catalog search does not resolve to a single
//! contractor. Configuration errors only surface from constructors.

use std::collections::HashMap;
use thiserror::Error;

/// Boxed error produced by a transport implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The main error type for eLibrary operations.
#[derive(Debug, Error)]
pub enum ElibraryError {
    /// The search did not match exactly one contractor.
    #[error("{0}")]
    InvalidContract(#[from] InvalidContractError),

    /// A network-level failure while talking to the catalog.
    #[error("{0}")]
    Transport(#[from] TransportError),

    /// The client could not be built from its configuration.
    #[error("{0}")]
    Config(#[from] ConfigError),
}

impl ElibraryError {
    /// Whether this is a failed contractor resolution.
    #[must_use]
    pub const fn is_invalid_contract(&self) -> bool {
        matches!(self, Self::InvalidContract(_))
    }

    /// Whether this is a transport failure.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = match self {
            Self::InvalidContract(err) => err.to_dict(),
            Self::Transport(err) => {
                let mut map = HashMap::new();
                map.insert("type".to_string(), serde_json::json!("TransportError"));
                map.insert("url".to_string(), serde_json::json!(err.url));
                map
            }
            Self::Config(_) => {
                let mut map = HashMap::new();
                map.insert("type".to_string(), serde_json::json!("ConfigError"));
                map
            }
        };
        map.insert("message".to_string(), serde_json::json!(self.to_string()));
        map
    }
}

/// Raised when a catalog search returns zero or several detail links.
///
/// Both cases produce the same error. Callers only learn that the contract
/// number did not resolve to a single contractor.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct InvalidContractError {
    /// The identifier that was searched for.
    pub contract: String,
    /// Human readable description.
    pub message: String,
}

impl InvalidContractError {
    /// Creates the standard "no results" error for a contract number.
    #[must_use]
    pub fn new(contract: impl Into<String>) -> Self {
        let contract = contract.into();
        let message = format!("GSA eLibrary has no results for {contract}");
        Self { contract, message }
    }

    /// Creates an error with a custom message.
    #[must_use]
    pub fn with_message(contract: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            contract: contract.into(),
            message: message.into(),
        }
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("type".to_string(), serde_json::json!("InvalidContractError"));
        map.insert("contract".to_string(), serde_json::json!(self.contract));
        map.insert("message".to_string(), serde_json::json!(self.message));
        map
    }
}

/// A network-level failure reported by the transport.
///
/// The underlying error is kept as the source so callers can downcast it
/// (to `reqwest::Error` for the default transport).
#[derive(Debug, Error)]
#[error("request to {url} failed: {source}")]
pub struct TransportError {
    /// The URL that was being requested.
    pub url: String,
    /// The error reported by the transport.
    #[source]
    pub source: BoxError,
}

impl TransportError {
    /// Wraps a transport failure for the given URL.
    #[must_use]
    pub fn new(url: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            url: url.into(),
            source: source.into(),
        }
    }

    /// Wraps a `reqwest` failure.
    #[cfg(feature = "http")]
    #[must_use]
    pub fn from_reqwest(url: impl Into<String>, err: reqwest::Error) -> Self {
        Self::new(url, err)
    }

    /// Whether the transport gave up because of a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        reqwest_timeout(&self.source)
            || self
                .source
                .downcast_ref::<std::io::Error>()
                .is_some_and(|err| err.kind() == std::io::ErrorKind::TimedOut)
    }
}

#[cfg(feature = "http")]
fn reqwest_timeout(err: &BoxError) -> bool {
    err.downcast_ref::<reqwest::Error>()
        .is_some_and(reqwest::Error::is_timeout)
}

#[cfg(not(feature = "http"))]
fn reqwest_timeout(_err: &BoxError) -> bool {
    false
}

/// Errors raised while turning configuration into a working client.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The base URL or search path did not form a valid absolute URL.
    #[error("Invalid catalog URL '{url}': {reason}")]
    InvalidUrl {
        /// The offending URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The detail link prefix was empty.
    #[error("Detail link prefix must not be empty")]
    EmptyDetailPrefix,

    /// The detail link selector could not be compiled.
    #[error("Invalid detail link selector '{selector}': {reason}")]
    InvalidSelector {
        /// The generated selector.
        selector: String,
        /// Parser message.
        reason: String,
    },

    /// The request timeout cannot be represented as a duration.
    #[error("Invalid request timeout: {0}")]
    InvalidTimeout(String),

    /// The configuration file could not be read or parsed.
    #[error("Failed to load configuration: {0}")]
    Load(String),

    /// The HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}
