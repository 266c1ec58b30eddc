//! Client bundling a resolver and a fetcher.

use std::sync::Arc;

use crate::config::ElibraryConfig;
use crate::errors::ElibraryError;
use crate::fetcher::ContractorFetcher;
use crate::models::{ContractorPage, ResolvedLink};
use crate::observability::LookupObserver;
use crate::resolver::ContractorResolver;
use crate::transport::Transport;

/// Entry point for contractor lookups.
///
/// The resolver and fetcher share one transport. The client holds no state
/// that changes between calls, so it can be cloned or shared across tasks.
#[derive(Debug, Clone)]
pub struct ElibraryClient {
    config: ElibraryConfig,
    resolver: ContractorResolver,
    fetcher: ContractorFetcher,
}

impl ElibraryClient {
    /// Creates a client for the live catalog with default settings.
    #[cfg(feature = "http")]
    pub fn new() -> Result<Self, ElibraryError> {
        Self::from_config(ElibraryConfig::default())
    }

    /// Creates a client backed by [`HttpTransport`](crate::transport::HttpTransport).
    #[cfg(feature = "http")]
    pub fn from_config(config: ElibraryConfig) -> Result<Self, ElibraryError> {
        config.validate()?;
        let transport = crate::transport::HttpTransport::new(&config)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Creates a client over a custom transport.
    pub fn with_transport(
        config: ElibraryConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ElibraryError> {
        config.validate()?;
        let resolver = ContractorResolver::new(&config, Arc::clone(&transport))?;
        let fetcher = ContractorFetcher::new(transport);
        Ok(Self {
            config,
            resolver,
            fetcher,
        })
    }

    /// Routes resolver and fetcher callbacks to `observer`.
    #[must_use]
    pub fn with_observer(self, observer: Arc<dyn LookupObserver>) -> Self {
        Self {
            resolver: self.resolver.with_observer(Arc::clone(&observer)),
            fetcher: self.fetcher.with_observer(observer),
            config: self.config,
        }
    }

    /// The configuration the client was built from.
    #[must_use]
    pub const fn config(&self) -> &ElibraryConfig {
        &self.config
    }

    /// The resolver component.
    #[must_use]
    pub const fn resolver(&self) -> &ContractorResolver {
        &self.resolver
    }

    /// The fetcher component.
    #[must_use]
    pub const fn fetcher(&self) -> &ContractorFetcher {
        &self.fetcher
    }

    /// Resolves a contract number to its detail page URL.
    pub async fn resolve(&self, contract: &str) -> Result<ResolvedLink, ElibraryError> {
        self.resolver.resolve(contract).await
    }

    /// Resolves a contract number to its detail page URL, as a string.
    pub async fn contractor_info_url(&self, contract: &str) -> Result<String, ElibraryError> {
        self.resolver.resolve(contract).await.map(String::from)
    }

    /// Fetches the raw HTML of a detail page.
    pub async fn contractor_info_html(&self, url: &str) -> Result<String, ElibraryError> {
        self.fetcher.fetch(url).await
    }

    /// Resolves a contract number and fetches its detail page.
    pub async fn lookup(&self, contract: &str) -> Result<ContractorPage, ElibraryError> {
        let link = self.resolver.resolve(contract).await?;
        self.fetcher.fetch_page(link.as_str()).await
    }
}

/// Resolves a contract number to its detail page URL on the live catalog.
///
/// Builds a fresh client per call; hold an [`ElibraryClient`] to reuse
/// connections.
#[cfg(feature = "http")]
pub async fn get_contractor_info_url(contract: &str) -> Result<String, ElibraryError> {
    ElibraryClient::new()?.contractor_info_url(contract).await
}

/// Fetches the raw HTML at `url`.
#[cfg(feature = "http")]
pub async fn get_contractor_info_html(url: &str) -> Result<String, ElibraryError> {
    ElibraryClient::new()?.contractor_info_html(url).await
}
