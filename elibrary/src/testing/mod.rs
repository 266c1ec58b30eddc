//! Testing utilities for eLibrary lookups.
//!
//! This module provides:
//! - A scripted, call-recording transport
//! - HTML fixtures shaped like catalog pages

mod fixtures;
mod mocks;

pub use fixtures::{contractor_page_html, search_results_html, SEARCH_URL};
pub use mocks::ScriptedTransport;
