//! Mock transports for testing.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;

use crate::errors::TransportError;
use crate::transport::{Transport, TransportRequest, TransportResponse};

#[derive(Debug, Clone)]
enum Reply {
    Response(TransportResponse),
    Error(std::io::ErrorKind, String),
}

/// A transport that answers from a fixed URL table and records every call.
///
/// Routes match on the request URL without its query parameters. Requests to
/// unknown URLs fail with a connection-refused transport error.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    routes: Mutex<HashMap<String, Reply>>,
    requests: Mutex<Vec<TransportRequest>>,
}

impl ScriptedTransport {
    /// Creates a transport with no routes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `url` with `response`.
    #[must_use]
    pub fn with_response(self, url: impl Into<String>, response: TransportResponse) -> Self {
        self.routes.lock().insert(url.into(), Reply::Response(response));
        self
    }

    /// Answers `url` with a 200 HTML body.
    #[must_use]
    pub fn with_html(self, url: impl Into<String>, html: impl Into<String>) -> Self {
        let url = url.into();
        let response = TransportResponse::html(html, url.clone());
        self.with_response(url, response)
    }

    /// Fails requests to `url` with a transport error.
    #[must_use]
    pub fn with_error(self, url: impl Into<String>, message: impl Into<String>) -> Self {
        self.routes.lock().insert(
            url.into(),
            Reply::Error(std::io::ErrorKind::ConnectionReset, message.into()),
        );
        self
    }

    /// Returns every request received, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().clone()
    }

    /// Returns the number of requests received.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Returns the number of requests sent to `url`.
    #[must_use]
    pub fn calls_to(&self, url: &str) -> usize {
        self.requests.lock().iter().filter(|r| r.url == url).count()
    }

    /// Resets call tracking.
    pub fn reset(&self) {
        self.requests.lock().clear();
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        self.requests.lock().push(request.clone());
        let reply = self.routes.lock().get(&request.url).cloned();

        match reply {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Error(kind, message)) => Err(TransportError::new(
                request.url,
                std::io::Error::new(kind, message),
            )),
            None => Err(TransportError::new(
                request.url,
                std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "no route scripted"),
            )),
        }
    }
}
