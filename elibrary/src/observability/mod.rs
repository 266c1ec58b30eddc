//! Observability utilities.

mod observer;
mod tracing;

pub use observer::{LoggingLookupObserver, LookupObserver, NoOpLookupObserver};
pub use self::tracing::{init_json_tracing, init_tracing, SpanTimer};

/// Generates a fresh request id.
#[must_use]
pub fn new_request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
