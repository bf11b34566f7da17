//! Report command implementation.
//!
//! Runs the pipeline once and prints the same envelope the HTTP API returns.

use std::process::ExitCode;

use anyhow::Result;
use breakline_lib::{SurfReport, surf_report};

use crate::api::Envelope;
use crate::config::AppConfig;

/// Fetches and prints the report for one spot.
///
/// The envelope goes to stdout in both cases and carries the only copy of
/// the error message; a failed report exits with status 1.
pub(crate) async fn report(config: &AppConfig, spot_id: &str, pretty: bool) -> Result<ExitCode> {
    let client = super::forecast_client(config)?;
    let (json, ok) = render(surf_report(&client, spot_id).await, pretty)?;
    println!("{json}");

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Serializes a pipeline outcome and reports whether it succeeded.
fn render(result: breakline_lib::Result<SurfReport>, pretty: bool) -> Result<(String, bool)> {
    let ok = result.is_ok();
    let envelope = Envelope::from_result(result);
    let json = if pretty {
        serde_json::to_string_pretty(&envelope)?
    } else {
        serde_json::to_string(&envelope)?
    };
    Ok((json, ok))
}
