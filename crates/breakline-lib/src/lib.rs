//! Surf report pipeline for breakline.
//!
//! This is a facade crate that re-exports the workspace crates and provides
//! the end-to-end [`surf_report`] operation.
//!
//! # Quick Start
//!
//! ```ignore
//! use breakline_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let strategy = build_strategy(&EgressConfig::default())?;
//!     let client = ForecastClient::new(strategy, Upstream::default());
//!
//!     let report = surf_report(&client, "5842041f4e65fad6a7708890").await?;
//!     println!("{}: {}", report.location, report.surf_height);
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/breakline-surf/breakline/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use breakline_types::*;

// Re-export fetch functionality
pub use breakline_fetch::{
    EgressConfig, EgressError, EgressKind, EgressStrategy, ForecastClient, ProxyEndpoint,
    RawResponse, ScrapingService, Upstream, build_strategy,
};

// Re-export report assembly
pub use breakline_report::{adjust_time, assemble, select_tides};

/// Produces the surf report for a raw, unvalidated spot identifier.
///
/// The identifier is validated before any request is made. All upstream
/// requests go through the client's egress strategy.
///
/// # Errors
///
/// Returns [`ForecastError::InvalidInput`] for a malformed identifier, the
/// classified upstream failure, or [`ForecastError::IncompleteData`] when the
/// upstream data cannot form a full report.
pub async fn surf_report(client: &ForecastClient, raw_spot_id: &str) -> Result<SurfReport> {
    let spot = SpotId::parse(raw_spot_id)?;
    tracing::debug!(spot = %spot, egress = %client.strategy().kind(), "fetching forecast");

    let bundle = client.fetch_bundle(&spot).await?;
    let report = assemble(&bundle)?;

    tracing::info!(spot = %spot, location = %report.location, "surf report ready");
    Ok(report)
}

/// Prelude module for convenient imports.
///
/// ```
/// use breakline_lib::prelude::*;
/// ```
pub mod prelude {
    pub use breakline_types::{
        ErrorKind, ForecastError, RawForecastBundle, Result, SpotId, SurfReport, TideEvent,
        TideSlot, TideType,
    };

    pub use breakline_fetch::{
        EgressConfig, EgressKind, EgressStrategy, ForecastClient, Upstream, build_strategy,
    };

    pub use breakline_report::assemble;

    pub use crate::surf_report;
}
