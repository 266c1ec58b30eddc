use super::protocols::{Transport, TransportRequest, TransportResponse};
use crate::errors::TransportError;
use crate::observability::{LookupObserver, SpanTimer};

/// Sends one request, reporting its lifecycle to `observer`.
///
/// Errors are returned untouched.
pub async fn observed_get(
    transport: &dyn Transport,
    observer: &dyn LookupObserver,
    request: TransportRequest,
    request_id: &str,
) -> Result<TransportResponse, TransportError> {
    let url = request.url.clone();
    let timer = SpanTimer::start("transport.get");
    observer.on_request_start(&url, request_id);

    match transport.get(request).await {
        Ok(response) => {
            observer.on_request_complete(&url, request_id, timer.finish(), response.status_code);
            Ok(response)
        }
        Err(err) => {
            observer.on_request_error(&url, request_id, &err.to_string());
            Err(err)
        }
    }
}
