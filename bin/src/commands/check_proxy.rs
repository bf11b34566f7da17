//! Check-proxy command implementation.

use anyhow::{Context, Result, bail};

use crate::config::AppConfig;

/// Geo-echo endpoint that reports the caller's apparent location.
pub(crate) const DEFAULT_CHECK_URL: &str = "https://geo.brdtest.com/mygeo.json";

const BODY_PREVIEW_CHARS: usize = 2000;

/// Fetches `url` through the configured egress and prints what came back.
pub(crate) async fn check_proxy(config: &AppConfig, url: &str) -> Result<()> {
    let strategy = breakline_lib::build_strategy(&config.egress)
        .with_context(|| format!("Failed to set up {} egress", config.egress.kind))?;

    println!("Egress:  {}", strategy.kind());
    if let Some(proxy) = &config.egress.proxy {
        println!("Proxy:   {}:{}", proxy.host, proxy.port);
    }
    println!("Target:  {url}");

    let response = strategy
        .fetch(url, &[])
        .await
        .with_context(|| format!("Request to {url} failed"))?;

    println!("Status:  {}", response.status);
    println!("{}", response.snippet(BODY_PREVIEW_CHARS));

    if !response.is_success() {
        bail!("Proxy check returned HTTP {}", response.status);
    }
    Ok(())
}
