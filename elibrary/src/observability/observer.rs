//! Lookup lifecycle callbacks.

use tracing::{debug, error, info, warn};

use crate::models::SearchOutcome;

/// Observability callbacks for catalog requests.
pub trait LookupObserver: Send + Sync {
    /// Called before a request is sent.
    fn on_request_start(&self, url: &str, request_id: &str);

    /// Called when a response arrives, whatever its status.
    fn on_request_complete(&self, url: &str, request_id: &str, duration_ms: f64, status_code: u16);

    /// Called when the transport fails.
    fn on_request_error(&self, url: &str, request_id: &str, error: &str);

    /// Called once the resolver has classified a search response.
    fn on_resolve_complete(&self, contract: &str, request_id: &str, outcome: &SearchOutcome);
}

/// No-op implementation of `LookupObserver`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLookupObserver;

impl LookupObserver for NoOpLookupObserver {
    fn on_request_start(&self, _url: &str, _request_id: &str) {}
    fn on_request_complete(&self, _url: &str, _request_id: &str, _duration_ms: f64, _status_code: u16) {}
    fn on_request_error(&self, _url: &str, _request_id: &str, _error: &str) {}
    fn on_resolve_complete(&self, _contract: &str, _request_id: &str, _outcome: &SearchOutcome) {}
}

/// Observer that reports through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingLookupObserver;

impl LookupObserver for LoggingLookupObserver {
    fn on_request_start(&self, url: &str, request_id: &str) {
        debug!(url, request_id, "Request started");
    }

    fn on_request_complete(&self, url: &str, request_id: &str, duration_ms: f64, status_code: u16) {
        if (200..300).contains(&status_code) {
            debug!(url, request_id, duration_ms, status_code, "Request completed");
        } else {
            // The body is still handed on; only the status is unusual.
            warn!(url, request_id, duration_ms, status_code, "Request completed with non-success status");
        }
    }

    fn on_request_error(&self, url: &str, request_id: &str, error: &str) {
        error!(url, request_id, error, "Request failed");
    }

    fn on_resolve_complete(&self, contract: &str, request_id: &str, outcome: &SearchOutcome) {
        let match_count = outcome.match_count();
        match outcome {
            SearchOutcome::Unique(href) => {
                info!(contract, request_id, href = href.as_str(), "Contract resolved");
            }
            _ => {
                warn!(
                    contract,
                    request_id,
                    match_count,
                    outcome = outcome.as_str(),
                    "Contract did not resolve to a single contractor"
                );
            }
        }
    }
}
