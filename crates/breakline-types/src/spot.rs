//! Spot identifier validation.

use derive_more::Display;
use serde::Serialize;

use crate::ForecastError;

/// A syntactically valid spot identifier.
///
/// Spot identifiers are opaque hexadecimal strings assigned by the upstream
/// provider. The only way to obtain a `SpotId` is [`SpotId::parse`], so holding
/// one guarantees the value is non-empty and purely hexadecimal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(transparent)]
pub struct SpotId(String);

impl SpotId {
    /// Validates a raw identifier.
    ///
    /// Surrounding whitespace is trimmed before checking.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::InvalidInput`] if the trimmed string is empty
    /// or contains a character outside `[0-9a-fA-F]`.
    ///
    /// # Example
    ///
    /// ```
    /// use breakline_types::SpotId;
    ///
    /// assert!(SpotId::parse("5842041f4e65fad6a7708890").is_ok());
    /// assert!(SpotId::parse("zz123").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, ForecastError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ForecastError::InvalidInput);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SpotId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for SpotId {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_hex() {
        for raw in ["0", "abcdef", "ABCDEF", "5842041f4e65fad6a7708890", "DeadBeef"] {
            let id = SpotId::parse(raw).unwrap();
            assert_eq!(id.as_str(), raw);
        }
    }

    #[test]
    fn test_trims_whitespace() {
        let id = SpotId::parse("  5842041f \n").unwrap();
        assert_eq!(id.as_str(), "5842041f");
        assert_eq!(id.to_string(), "5842041f");
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(SpotId::parse(""), Err(ForecastError::InvalidInput));
        assert_eq!(SpotId::parse("   "), Err(ForecastError::InvalidInput));
    }

    #[test]
    fn test_rejects_non_hex() {
        for raw in ["zz123", "abc-def", "12 34", "g", "0x1f", "ñ", "5842041f/../"] {
            assert_eq!(
                SpotId::parse(raw),
                Err(ForecastError::InvalidInput),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_from_str() {
        let id: SpotId = "a1b2".parse().unwrap();
        assert_eq!(id.as_ref(), "a1b2");
    }

    #[test]
    fn test_serializes_as_string() {
        let id = SpotId::parse("a1b2").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"a1b2\"");
    }
}
