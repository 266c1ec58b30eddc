//! `reqwest`-backed transport.

use async_trait::async_trait;
use reqwest::redirect::Policy;
use reqwest::{Client, ClientBuilder};
use url::Url;

use super::protocols::{Transport, TransportRequest, TransportResponse};
use crate::config::{ElibraryConfig, FetchConfig};
use crate::errors::{ConfigError, TransportError};
use crate::observability::SpanTimer;

/// HTTP transport with certificate relaxation scoped to the catalog host.
///
/// Two clients are kept. Requests to the catalog host go through the relaxed
/// client when [`TlsConfig::accept_invalid_certs_for_catalog`] is set; all
/// other requests use a client with default verification. The relaxed client
/// does not follow redirects that leave the catalog host; the redirect
/// response itself is returned instead.
///
/// [`TlsConfig::accept_invalid_certs_for_catalog`]: crate::config::TlsConfig
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    catalog_client: Option<Client>,
    catalog_host: String,
}

impl HttpTransport {
    /// Builds the transport from a validated configuration.
    pub fn new(config: &ElibraryConfig) -> Result<Self, ConfigError> {
        let catalog_host = config.catalog_host()?;
        let client = client_builder(&config.fetch)?
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        let catalog_client = if config.tls.accept_invalid_certs_for_catalog {
            let relaxed = client_builder(&config.fetch)?
                .danger_accept_invalid_certs(true)
                .redirect(same_host_redirects(catalog_host.clone()))
                .build()
                .map_err(|e| ConfigError::Client(e.to_string()))?;
            Some(relaxed)
        } else {
            None
        };

        Ok(Self {
            client,
            catalog_client,
            catalog_host,
        })
    }

    /// Whether a request to `url` would skip certificate verification.
    #[must_use]
    pub fn uses_relaxed_tls(&self, url: &str) -> bool {
        self.catalog_client.is_some() && self.is_catalog_url(url)
    }

    fn is_catalog_url(&self, url: &str) -> bool {
        Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_ascii_lowercase))
            .is_some_and(|host| host == self.catalog_host)
    }

    fn client_for(&self, url: &str) -> &Client {
        match &self.catalog_client {
            Some(relaxed) if self.is_catalog_url(url) => relaxed,
            _ => &self.client,
        }
    }
}

fn client_builder(fetch: &FetchConfig) -> Result<ClientBuilder, ConfigError> {
    let builder = Client::builder().user_agent(fetch.user_agent.clone());
    Ok(match fetch.timeout()? {
        Some(timeout) => builder.timeout(timeout),
        None => builder,
    })
}

/// Maximum redirect hops, same as reqwest's default policy.
const MAX_REDIRECTS: usize = 10;

/// Follows redirects only while they stay on `host`.
fn same_host_redirects(host: String) -> Policy {
    Policy::custom(move |attempt| {
        let same_host = attempt
            .url()
            .host_str()
            .is_some_and(|h| h.eq_ignore_ascii_case(&host));
        if !same_host {
            attempt.stop()
        } else if attempt.previous().len() >= MAX_REDIRECTS {
            attempt.error("too many redirects")
        } else {
            attempt.follow()
        }
    })
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let timer = SpanTimer::start("http.get");

        let mut builder = self.client_for(&request.url).get(request.url.as_str());
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(&request.url, e))?;

        let status_code = response.status().as_u16();
        let final_url = response.url().to_string();

        let text = response
            .text()
            .await
            .map_err(|e| TransportError::from_reqwest(&request.url, e))?;

        Ok(TransportResponse {
            status_code,
            text,
            final_url,
            duration_ms: timer.finish(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_relaxed_tls_only_for_catalog_host() {
        let transport = HttpTransport::new(&ElibraryConfig::default()).unwrap();

        assert!(transport.uses_relaxed_tls(
            "https://www.gsaelibrary.gsa.gov/ElibMain/contractorInfo.do?id=42"
        ));
        assert!(transport.uses_relaxed_tls("https://WWW.GSAELIBRARY.GSA.GOV/ElibMain/"));
        assert!(!transport.uses_relaxed_tls("https://www.gsa.gov/"));
        assert!(!transport.uses_relaxed_tls("https://gsaelibrary.gsa.gov.example.com/"));
        assert!(!transport.uses_relaxed_tls("not a url"));
    }

    #[test]
    fn test_strict_tls_never_relaxes() {
        let transport = HttpTransport::new(&ElibraryConfig::new().with_strict_tls()).unwrap();
        assert!(!transport.uses_relaxed_tls(
            "https://www.gsaelibrary.gsa.gov/ElibMain/searchResults.do"
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = HttpTransport::new(&ElibraryConfig::new().with_base_url("::")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn test_negative_timeout_rejected() {
        let config = ElibraryConfig::new().with_fetch(FetchConfig::new().with_timeout(-1.0));
        let err = HttpTransport::new(&config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout(_)));
    }

    #[tokio::test]
    async fn test_catalog_redirect_to_other_host_is_not_followed() {
        let server = MockServer::start().await;
        let port = server.address().port();
        Mock::given(method("GET"))
            .and(path("/ElibMain/moved"))
            .respond_with(
                ResponseTemplate::new(302)
                    .insert_header("Location", format!("http://localhost:{port}/elsewhere")),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/elsewhere"))
            .respond_with(ResponseTemplate::new(200).set_body_string("elsewhere"))
            .expect(0)
            .mount(&server)
            .await;

        let transport =
            HttpTransport::new(&ElibraryConfig::new().with_base_url(server.uri())).unwrap();
        let url = format!("{}/ElibMain/moved", server.uri());
        assert!(transport.uses_relaxed_tls(&url));

        let response = transport.get(TransportRequest::get(url.as_str())).await.unwrap();
        assert_eq!(response.status_code, 302);
        assert_eq!(response.final_url, url);
    }

    #[tokio::test]
    async fn test_catalog_redirect_on_same_host_is_followed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ElibMain/moved"))
            .respond_with(
                ResponseTemplate::new(302)
                    .insert_header("Location", format!("{}/ElibMain/landing", server.uri())),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/ElibMain/landing"))
            .respond_with(ResponseTemplate::new(200).set_body_string("landed"))
            .mount(&server)
            .await;

        let transport =
            HttpTransport::new(&ElibraryConfig::new().with_base_url(server.uri())).unwrap();
        let response = transport
            .get(TransportRequest::get(format!("{}/ElibMain/moved", server.uri())))
            .await
            .unwrap();

        assert_eq!(response.status_code, 200);
        assert_eq!(response.text, "landed");
        assert_eq!(response.final_url, format!("{}/ElibMain/landing", server.uri()));
    }

    #[tokio::test]
    async fn test_unparseable_url_is_transport_error() {
        let transport = HttpTransport::new(&ElibraryConfig::default()).unwrap();
        let err = transport
            .get(TransportRequest::get("not a url"))
            .await
            .unwrap_err();
        assert_eq!(err.url, "not a url");
    }
}
