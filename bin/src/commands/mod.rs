//! CLI command implementations.

pub(crate) mod check_proxy;
pub(crate) mod report;
pub(crate) mod serve;

use anyhow::{Context, Result};
use breakline_lib::ForecastClient;

use crate::config::AppConfig;

/// Builds a forecast client from the configured egress and upstream.
pub(crate) fn forecast_client(config: &AppConfig) -> Result<ForecastClient> {
    let strategy = breakline_lib::build_strategy(&config.egress)
        .with_context(|| format!("Failed to set up {} egress", config.egress.kind))?;
    Ok(ForecastClient::new(strategy, config.upstream.clone()))
}
