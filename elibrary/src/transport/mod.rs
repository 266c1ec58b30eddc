//! HTTP transport seam.
//!
//! This module provides:
//! - The [`Transport`] protocol trait used by the resolver and fetcher
//! - Request and response records
//! - [`observed_get`], which wraps a request with observer callbacks
//! - [`HttpTransport`], the `reqwest` implementation (feature `http`)

#[cfg(feature = "http")]
mod http;
mod observed;
mod protocols;

#[cfg(feature = "http")]
pub use http::HttpTransport;
pub use observed::observed_get;
pub use protocols::{Transport, TransportRequest, TransportResponse};

#[cfg(test)]
pub use protocols::MockTransport;
