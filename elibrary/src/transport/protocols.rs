//! Protocol trait for the HTTP seam.
//!
//! The resolver and fetcher only ever issue plain GET requests, so the
//! transport contract is a single method. Implementations must report
//! network-level failures as [`TransportError`] and hand back every other
//! response, whatever its status code.

use async_trait::async_trait;

use crate::errors::TransportError;

/// A GET request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransportRequest {
    /// Target URL, passed to the transport unvalidated.
    pub url: String,
    /// Query parameters appended to the URL, in order.
    pub query: Vec<(String, String)>,
}

impl TransportRequest {
    /// Creates a request without query parameters.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
        }
    }

    /// Sets the query parameters.
    #[must_use]
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// Looks up a query parameter by name.
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Result of a GET request.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status_code: u16,
    /// Response body as text.
    pub text: String,
    /// Final URL after redirects.
    pub final_url: String,
    /// Time taken to fetch in milliseconds.
    pub duration_ms: f64,
}

impl TransportResponse {
    /// Creates a response with a status and body.
    #[must_use]
    pub fn new(status_code: u16, text: impl Into<String>, final_url: impl Into<String>) -> Self {
        Self {
            status_code,
            text: text.into(),
            final_url: final_url.into(),
            duration_ms: 0.0,
        }
    }

    /// Creates a 200 response carrying `text`.
    #[must_use]
    pub fn html(text: impl Into<String>, final_url: impl Into<String>) -> Self {
        Self::new(200, text, final_url)
    }

    /// Whether the request was successful (2xx status).
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Protocol for issuing GET requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues the request and returns the response body.
    async fn get(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}
