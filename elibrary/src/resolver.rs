//! Contract number to detail page resolution.
//!
//! The resolver runs an exact-phrase catalog search and accepts the result
//! only when the response holds exactly one contractor detail link. No match
//! and several matches are reported with the same [`InvalidContractError`].

use scraper::{Html, Selector};
use std::fmt;
use std::sync::Arc;
use url::Url;

use crate::config::ElibraryConfig;
use crate::errors::{ConfigError, ElibraryError, InvalidContractError};
use crate::models::{ResolvedLink, SearchOutcome, SearchQuery};
use crate::observability::{new_request_id, LoggingLookupObserver, LookupObserver};
use crate::transport::{observed_get, Transport, TransportRequest};

/// Compiled `a[href^="<prefix>"]` selector for detail links.
#[derive(Debug, Clone)]
pub struct DetailLinkSelector {
    prefix: String,
    selector: Selector,
}

impl DetailLinkSelector {
    /// Compiles a selector matching anchors whose `href` starts with `prefix`.
    pub fn new(prefix: &str) -> Result<Self, ConfigError> {
        if prefix.is_empty() {
            return Err(ConfigError::EmptyDetailPrefix);
        }
        let escaped = prefix.replace('\\', "\\\\").replace('"', "\\\"");
        let css = format!("a[href^=\"{escaped}\"]");
        let selector = Selector::parse(&css).map_err(|e| ConfigError::InvalidSelector {
            selector: css.clone(),
            reason: format!("{e:?}"),
        })?;

        Ok(Self {
            prefix: prefix.to_string(),
            selector,
        })
    }

    /// The `href` prefix this selector matches.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the raw `href` of every matching anchor, in document order.
    #[must_use]
    pub fn select(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        document
            .select(&self.selector)
            .filter_map(|a| a.value().attr("href"))
            .map(String::from)
            .collect()
    }

    /// Selects and classifies the detail links of a search response.
    #[must_use]
    pub fn classify(&self, html: &str) -> SearchOutcome {
        SearchOutcome::from_matches(self.select(html))
    }
}

/// Resolves contract numbers to contractor detail page URLs.
#[derive(Clone)]
pub struct ContractorResolver {
    transport: Arc<dyn Transport>,
    observer: Arc<dyn LookupObserver>,
    search_url: Url,
    search_type: String,
    selector: DetailLinkSelector,
}

impl fmt::Debug for ContractorResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractorResolver")
            .field("search_url", &self.search_url.as_str())
            .field("search_type", &self.search_type)
            .field("selector", &self.selector.prefix())
            .finish_non_exhaustive()
    }
}

impl ContractorResolver {
    /// Creates a resolver for the configured catalog.
    pub fn new(config: &ElibraryConfig, transport: Arc<dyn Transport>) -> Result<Self, ConfigError> {
        Ok(Self {
            transport,
            observer: Arc::new(LoggingLookupObserver),
            search_url: config.search_url()?,
            search_type: config.search_type.clone(),
            selector: DetailLinkSelector::new(&config.detail_link_prefix)?,
        })
    }

    /// Replaces the observer.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn LookupObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// The search endpoint, also the base for resolving detail links.
    #[must_use]
    pub const fn search_url(&self) -> &Url {
        &self.search_url
    }

    /// Builds the query sent for a contract number.
    #[must_use]
    pub fn search_query(&self, contract: &str) -> SearchQuery {
        SearchQuery::new(contract, self.search_type.as_str())
    }

    /// Searches the catalog and returns the single matching detail page URL.
    ///
    /// The response body is parsed whatever its status code. A transport
    /// failure is returned as [`ElibraryError::Transport`]; zero or several
    /// detail links as [`ElibraryError::InvalidContract`].
    pub async fn resolve(&self, contract: &str) -> Result<ResolvedLink, ElibraryError> {
        let request_id = new_request_id();
        let request = TransportRequest::get(self.search_url.as_str())
            .with_query(self.search_query(contract).to_pairs());

        let response = observed_get(
            self.transport.as_ref(),
            self.observer.as_ref(),
            request,
            &request_id,
        )
        .await?;

        let outcome = self.selector.classify(&response.text);
        self.observer
            .on_resolve_complete(contract, &request_id, &outcome);

        match outcome {
            SearchOutcome::Unique(href) => self.resolve_href(contract, &href),
            SearchOutcome::NoMatch | SearchOutcome::Ambiguous(_) => {
                Err(InvalidContractError::new(contract).into())
            }
        }
    }

    /// Joins a detail link onto the search endpoint URL.
    pub fn resolve_href(&self, contract: &str, href: &str) -> Result<ResolvedLink, ElibraryError> {
        self.search_url
            .join(href)
            .map(ResolvedLink::new)
            .map_err(|e| {
                InvalidContractError::with_message(
                    contract,
                    format!("GSA eLibrary returned an unusable link for {contract}: {e}"),
                )
                .into()
            })
    }
}
