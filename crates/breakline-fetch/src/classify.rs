//! Failure classification for upstream requests.

use breakline_types::{Domain, ForecastError, SpotId};

use crate::{EgressError, ParseError, RawResponse};

/// Longest body excerpt carried into an error message.
const SNIPPET_LEN: usize = 120;

/// Classifies a response status.
///
/// Returns `None` for 2xx statuses.
#[must_use]
pub fn classify_response(
    spot: &SpotId,
    domain: Domain,
    response: &RawResponse,
) -> Option<ForecastError> {
    if response.is_success() {
        return None;
    }
    let err = match response.status {
        404 => ForecastError::SpotNotFound(spot.to_string()),
        401 | 403 => ForecastError::Authentication {
            status: response.status,
        },
        429 => ForecastError::RateLimited,
        status => {
            let snippet = response.snippet(SNIPPET_LEN);
            let message = if snippet.trim().is_empty() {
                format!("{domain} request returned HTTP {status}")
            } else {
                format!("{domain} request returned HTTP {status}: {}", snippet.trim())
            };
            ForecastError::Transport {
                status: Some(status),
                message,
            }
        }
    };
    Some(err)
}

/// Classifies a failure below HTTP as a transport error.
#[must_use]
pub fn classify_egress(domain: Domain, err: &EgressError) -> ForecastError {
    ForecastError::transport(format!("{domain} request failed: {err}"))
}

/// Classifies an undecodable body.
///
/// A blocked request often answers 200 with an HTML challenge page, so a
/// body that is not the expected JSON envelope is a transport failure. An
/// envelope whose readings have the wrong shape is incomplete data.
#[must_use]
pub fn classify_parse(err: &ParseError) -> ForecastError {
    match err {
        ParseError::Envelope { .. } => ForecastError::transport(err.to_string()),
        ParseError::Readings { domain, source } => {
            tracing::debug!(%domain, "malformed readings: {source}");
            ForecastError::incomplete(format!("{domain} readings"))
        }
    }
}
