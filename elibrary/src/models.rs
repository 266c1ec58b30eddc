//! Data models for catalog lookups.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use url::Url;

/// Query parameters sent to the catalog search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    /// The contractor identifier, sent as-is.
    #[serde(rename = "searchText")]
    pub search_text: String,
    /// The search mode.
    #[serde(rename = "searchType")]
    pub search_type: String,
}

impl SearchQuery {
    /// Creates a query for a contract number.
    #[must_use]
    pub fn new(search_text: impl Into<String>, search_type: impl Into<String>) -> Self {
        Self {
            search_text: search_text.into(),
            search_type: search_type.into(),
        }
    }

    /// Returns the query as ordered key/value pairs.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("searchText".to_string(), self.search_text.clone()),
            ("searchType".to_string(), self.search_type.clone()),
        ]
    }
}

/// How many detail links a search response contained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// No detail link.
    NoMatch,
    /// Exactly one detail link, with its raw `href`.
    Unique(String),
    /// More than one detail link.
    Ambiguous(usize),
}

impl SearchOutcome {
    /// Classifies the `href` values collected from a search response.
    #[must_use]
    pub fn from_matches(mut hrefs: Vec<String>) -> Self {
        match hrefs.len() {
            0 => Self::NoMatch,
            1 => hrefs.pop().map_or(Self::NoMatch, Self::Unique),
            n => Self::Ambiguous(n),
        }
    }

    /// Number of detail links found.
    #[must_use]
    pub const fn match_count(&self) -> usize {
        match self {
            Self::NoMatch => 0,
            Self::Unique(_) => 1,
            Self::Ambiguous(n) => *n,
        }
    }

    /// Stable label for logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NoMatch => "no_match",
            Self::Unique(_) => "unique",
            Self::Ambiguous(_) => "ambiguous",
        }
    }
}

/// Absolute URL of a contractor detail page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResolvedLink(Url);

impl ResolvedLink {
    /// Wraps an absolute URL.
    #[must_use]
    pub const fn new(url: Url) -> Self {
        Self(url)
    }

    /// Returns the URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the underlying URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.0
    }

    /// Consumes the link, returning the URL string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0.into()
    }
}

impl fmt::Display for ResolvedLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ResolvedLink> for String {
    fn from(link: ResolvedLink) -> Self {
        link.into_string()
    }
}

impl AsRef<str> for ResolvedLink {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// A fetched contractor detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractorPage {
    /// The URL that was fetched.
    pub url: String,
    /// Where the request ended up after redirects.
    pub final_url: String,
    /// Raw response body.
    pub html: String,
    /// HTTP status code of the response.
    pub status_code: u16,
    /// When the body was received.
    pub fetched_at: DateTime<Utc>,
}

impl ContractorPage {
    /// Creates a page record stamped with the current time.
    #[must_use]
    pub fn new(url: impl Into<String>, html: impl Into<String>, status_code: u16) -> Self {
        let url = url.into();
        Self {
            final_url: url.clone(),
            url,
            html: html.into(),
            status_code,
            fetched_at: Utc::now(),
        }
    }

    /// Records the post-redirect URL.
    #[must_use]
    pub fn with_final_url(mut self, final_url: impl Into<String>) -> Self {
        self.final_url = final_url.into();
        self
    }

    /// Whether the server redirected away from the requested URL.
    #[must_use]
    pub fn was_redirected(&self) -> bool {
        self.final_url != self.url
    }

    /// Whether the server answered with a 2xx status.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Converts to dictionary.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut dict = HashMap::new();
        dict.insert("url".to_string(), serde_json::json!(self.url));
        dict.insert("final_url".to_string(), serde_json::json!(self.final_url));
        dict.insert("html_length".to_string(), serde_json::json!(self.html.len()));
        dict.insert("status_code".to_string(), serde_json::json!(self.status_code));
        dict.insert(
            "fetched_at".to_string(),
            serde_json::json!(self.fetched_at.to_rfc3339()),
        );
        dict
    }
}
