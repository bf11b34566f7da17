//! Upstream payload decoding.
//!
//! Every forecast endpoint answers with the same envelope:
//!
//! ```json
//! {
//!   "associated": { "location": { "name": "Ocean Beach" } },
//!   "data": { "<domain>": [ ... ] }
//! }
//! ```
//!
//! `associated` is optional. A missing domain key decodes as an empty
//! sequence so that completeness is judged in one place.

use breakline_types::Domain;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors that can occur while decoding a payload.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The body is not the expected JSON envelope.
    #[error("Invalid {domain} payload: {source}")]
    Envelope {
        /// Domain being decoded.
        domain: Domain,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The domain entries do not have the expected shape.
    #[error("Invalid {domain} readings: {source}")]
    Readings {
        /// Domain being decoded.
        domain: Domain,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

impl ParseError {
    /// Returns the domain whose payload failed to decode.
    #[must_use]
    pub const fn domain(&self) -> Domain {
        match self {
            Self::Envelope { domain, .. } | Self::Readings { domain, .. } => *domain,
        }
    }
}

/// Readings of one domain plus the spot name, when the payload carries it.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    /// Readings in upstream order.
    pub readings: Vec<T>,
    /// Spot display name from the `associated` block.
    pub location: Option<String>,
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    associated: Option<Associated>,
    #[serde(default)]
    data: Map<String, Value>,
}

#[derive(Deserialize)]
struct Associated {
    #[serde(default)]
    location: Option<Location>,
}

#[derive(Deserialize)]
struct Location {
    #[serde(default)]
    name: Option<String>,
}

/// Decodes the body of a `domain` response.
///
/// # Errors
///
/// Returns an error if the body is not the JSON envelope or the readings
/// cannot be decoded as `T`.
pub fn decode<T: DeserializeOwned>(domain: Domain, body: &[u8]) -> Result<Decoded<T>, ParseError> {
    let mut envelope: Envelope =
        serde_json::from_slice(body).map_err(|source| ParseError::Envelope { domain, source })?;

    let readings = match envelope.data.remove(domain.as_str()) {
        Some(Value::Null) | None => Vec::new(),
        Some(value) => serde_json::from_value(value)
            .map_err(|source| ParseError::Readings { domain, source })?,
    };

    let location = envelope
        .associated
        .and_then(|a| a.location)
        .and_then(|l| l.name)
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty());

    Ok(Decoded { readings, location })
}
