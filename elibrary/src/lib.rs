//! # eLibrary
//!
//! A lookup client for the GSA eLibrary contractor catalog.
//!
//! A lookup is two independent steps:
//!
//! - **Resolve**: run an exact-phrase search for a contract number and accept
//!   the result only if it holds exactly one contractor detail link
//! - **Fetch**: download the detail page and return its HTML untouched
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use elibrary::prelude::*;
//!
//! # async fn run() -> Result<(), ElibraryError> {
//! let client = ElibraryClient::new()?;
//!
//! let url = client.contractor_info_url("GS-35F-0119Y").await?;
//! let html = client.contractor_info_html(&url).await?;
//! # let _ = html;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod client;
pub mod config;
pub mod errors;
pub mod fetcher;
pub mod models;
pub mod observability;
pub mod resolver;
pub mod testing;
pub mod transport;

#[cfg(all(test, feature = "http"))]
mod integration_tests;

#[cfg(feature = "http")]
pub use client::{get_contractor_info_html, get_contractor_info_url};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::client::ElibraryClient;
    pub use crate::config::{ElibraryConfig, FetchConfig, TlsConfig};
    pub use crate::errors::{
        ConfigError, ElibraryError, InvalidContractError, TransportError,
    };
    pub use crate::fetcher::ContractorFetcher;
    pub use crate::models::{ContractorPage, ResolvedLink, SearchOutcome, SearchQuery};
    pub use crate::observability::{
        LoggingLookupObserver, LookupObserver, NoOpLookupObserver,
    };
    pub use crate::resolver::{ContractorResolver, DetailLinkSelector};
    #[cfg(feature = "http")]
    pub use crate::transport::HttpTransport;
    pub use crate::transport::{Transport, TransportRequest, TransportResponse};
}
