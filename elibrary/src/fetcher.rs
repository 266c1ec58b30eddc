//! Contractor detail page retrieval.

use std::fmt;
use std::sync::Arc;

use crate::errors::ElibraryError;
use crate::models::ContractorPage;
use crate::observability::{new_request_id, LoggingLookupObserver, LookupObserver};
use crate::transport::{observed_get, Transport, TransportRequest};

/// Fetches pages verbatim.
///
/// The fetcher issues one GET per call, with no query parameters, and hands
/// back the body without inspecting it.
#[derive(Clone)]
pub struct ContractorFetcher {
    transport: Arc<dyn Transport>,
    observer: Arc<dyn LookupObserver>,
}

impl fmt::Debug for ContractorFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractorFetcher").finish_non_exhaustive()
    }
}

impl ContractorFetcher {
    /// Creates a fetcher over the given transport.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            observer: Arc::new(LoggingLookupObserver),
        }
    }

    /// Replaces the observer.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn LookupObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Returns the raw body of `page_url`.
    pub async fn fetch(&self, page_url: &str) -> Result<String, ElibraryError> {
        Ok(self.fetch_page(page_url).await?.html)
    }

    /// Returns the body of `page_url` together with its status and timestamp.
    pub async fn fetch_page(&self, page_url: &str) -> Result<ContractorPage, ElibraryError> {
        let request_id = new_request_id();
        let response = observed_get(
            self.transport.as_ref(),
            self.observer.as_ref(),
            TransportRequest::get(page_url),
            &request_id,
        )
        .await?;

        Ok(
            ContractorPage::new(page_url, response.text, response.status_code)
                .with_final_url(response.final_url),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TransportError;
    use crate::observability::NoOpLookupObserver;
    use crate::transport::{MockTransport, TransportResponse};
    use pretty_assertions::assert_eq;

    const DETAIL_URL: &str = "https://www.gsaelibrary.gsa.gov/ElibMain/contractorInfo.do?id=42";

    fn fetcher_with(mock: MockTransport) -> ContractorFetcher {
        ContractorFetcher::new(Arc::new(mock)).with_observer(Arc::new(NoOpLookupObserver))
    }

    #[tokio::test]
    async fn test_fetch_returns_body_verbatim() {
        let mut mock = MockTransport::new();
        mock.expect_get()
            .withf(|req| req.url == DETAIL_URL && req.query.is_empty())
            .times(1)
            .returning(|req| Ok(TransportResponse::html("<html>...</html>", req.url)));

        let html = fetcher_with(mock).fetch(DETAIL_URL).await.unwrap();
        assert_eq!(html, "<html>...</html>");
    }

    #[tokio::test]
    async fn test_fetch_page_keeps_status() {
        let mut mock = MockTransport::new();
        mock.expect_get()
            .times(1)
            .returning(|req| Ok(TransportResponse::new(404, "missing", req.url)));

        let page = fetcher_with(mock).fetch_page(DETAIL_URL).await.unwrap();
        assert_eq!(page.url, DETAIL_URL);
        assert_eq!(page.html, "missing");
        assert_eq!(page.status_code, 404);
        assert!(!page.is_success());
    }

    #[tokio::test]
    async fn test_fetch_page_records_final_url() {
        let mut mock = MockTransport::new();
        mock.expect_get().times(1).returning(|_| {
            Ok(TransportResponse::html(
                "<html>moved</html>",
                "https://www.gsaelibrary.gsa.gov/ElibMain/contractorInfo.do?id=43",
            ))
        });

        let page = fetcher_with(mock).fetch_page(DETAIL_URL).await.unwrap();
        assert_eq!(page.url, DETAIL_URL);
        assert_eq!(
            page.final_url,
            "https://www.gsaelibrary.gsa.gov/ElibMain/contractorInfo.do?id=43"
        );
        assert!(page.was_redirected());
    }

    #[tokio::test]
    async fn test_fetch_propagates_transport_error() {
        let mut mock = MockTransport::new();
        mock.expect_get().times(1).returning(|req| {
            Err(TransportError::new(
                req.url,
                std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out"),
            ))
        });

        let err = fetcher_with(mock).fetch(DETAIL_URL).await.unwrap_err();
        match err {
            ElibraryError::Transport(err) => {
                assert_eq!(err.url, DETAIL_URL);
                assert!(err.is_timeout());
            }
            other => panic!("expected Transport, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_passes_any_string_to_transport() {
        let mut mock = MockTransport::new();
        mock.expect_get()
            .withf(|req| req.url == "relative/page.do")
            .times(1)
            .returning(|req| {
                Err(TransportError::new(
                    req.url,
                    std::io::Error::new(std::io::ErrorKind::InvalidInput, "relative URL"),
                ))
            });

        let err = fetcher_with(mock).fetch("relative/page.do").await.unwrap_err();
        assert!(err.is_transport());
    }
}
