//! End-to-end tests against a local HTTP server.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::client::ElibraryClient;
    use crate::config::ElibraryConfig;
    use crate::errors::ElibraryError;
    use crate::observability::NoOpLookupObserver;
    use crate::testing::{contractor_page_html, search_results_html};

    const SEARCH_PATH: &str = "/ElibMain/searchResults.do";
    const DETAIL_PATH: &str = "/ElibMain/contractorInfo.do";

    fn client_for(server: &MockServer) -> ElibraryClient {
        let config = ElibraryConfig::new().with_base_url(server.uri());
        ElibraryClient::from_config(config)
            .unwrap()
            .with_observer(Arc::new(NoOpLookupObserver))
    }

    fn html(body: String) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=utf-8")
    }

    #[tokio::test]
    async fn test_single_match_resolves_against_search_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(SEARCH_PATH))
            .and(query_param("searchText", "GS-35F-0119Y"))
            .and(query_param("searchType", "exactWords"))
            .respond_with(html(search_results_html(&["contractorInfo.do?id=42"])))
            .expect(1)
            .mount(&server)
            .await;

        let url = client_for(&server)
            .contractor_info_url("GS-35F-0119Y")
            .await
            .unwrap();

        assert_eq!(url, format!("{}{DETAIL_PATH}?id=42", server.uri()));
    }

    #[tokio::test]
    async fn test_zero_matches_is_invalid_contract() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(SEARCH_PATH))
            .respond_with(html(search_results_html(&[])))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .contractor_info_url("NOT-A-REAL-CONTRACT")
            .await
            .unwrap_err();

        assert!(err.is_invalid_contract());
        assert!(err.to_string().contains("NOT-A-REAL-CONTRACT"));
    }

    #[tokio::test]
    async fn test_many_matches_is_invalid_contract() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(SEARCH_PATH))
            .respond_with(html(search_results_html(&[
                "contractorInfo.do?id=1",
                "contractorInfo.do?id=2",
            ])))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .contractor_info_url("GS-35F")
            .await
            .unwrap_err();

        assert!(matches!(err, ElibraryError::InvalidContract(_)));
    }

    #[tokio::test]
    async fn test_server_error_page_is_parsed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(SEARCH_PATH))
            .respond_with(
                ResponseTemplate::new(500).set_body_string("<html><body>Server Error</body></html>"),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .contractor_info_url("GS-35F-0119Y")
            .await
            .unwrap_err();

        assert!(err.is_invalid_contract());
    }

    #[tokio::test]
    async fn test_fetch_returns_body_and_skips_search() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(SEARCH_PATH))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(DETAIL_PATH))
            .and(query_param("id", "42"))
            .respond_with(html("<html>...</html>".to_string()))
            .expect(2)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let url = format!("{}{DETAIL_PATH}?id=42", server.uri());

        let first = client.contractor_info_html(&url).await.unwrap();
        let second = client.contractor_info_html(&url).await.unwrap();
        assert_eq!(first, "<html>...</html>");
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_lookup_end_to_end() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(SEARCH_PATH))
            .and(query_param("searchText", "GS-35F-0119Y"))
            .respond_with(html(search_results_html(&["contractorInfo.do?id=42"])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(DETAIL_PATH))
            .respond_with(html(contractor_page_html("Acme Federal Services")))
            .mount(&server)
            .await;

        let page = client_for(&server).lookup("GS-35F-0119Y").await.unwrap();

        assert_eq!(page.status_code, 200);
        assert!(page.html.contains("<h1>Acme Federal Services</h1>"));
        assert_eq!(page.url, format!("{}{DETAIL_PATH}?id=42", server.uri()));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Nothing listens on port 1.
        let config = ElibraryConfig::new().with_base_url("http://127.0.0.1:1");
        let client = ElibraryClient::from_config(config)
            .unwrap()
            .with_observer(Arc::new(NoOpLookupObserver));

        let err = client.contractor_info_url("GS-35F-0119Y").await.unwrap_err();
        assert!(err.is_transport());
    }
}
