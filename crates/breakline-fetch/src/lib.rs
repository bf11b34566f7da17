//! Egress strategies and upstream forecast client for breakline.
//!
//! This crate provides the resilient-fetch layer:
//!
//! - [`EgressStrategy`] - One outbound request under a chosen network path
//! - [`build_strategy`] - Builds the strategy selected by an [`EgressConfig`]
//! - [`ForecastClient`] - Concurrent per-domain fetch into a bundle
//! - [`url::Upstream`] - Upstream endpoint and forecast window
//! - [`parse::decode`] - Upstream envelope decoding
//! - [`classify`] - Mapping of statuses and failures to `ForecastError`

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/breakline-surf/breakline/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod classify;
mod client;
mod egress;
pub mod parse;
pub mod url;

pub use client::ForecastClient;
pub use egress::{
    DEFAULT_SITE_ORIGIN, EgressConfig, EgressError, EgressKind, EgressStrategy, HttpEgress,
    ProxyEndpoint, RawResponse, ScrapingEgress, ScrapingService, build_strategy,
    identity_headers,
};
pub use parse::ParseError;
pub use url::Upstream;
