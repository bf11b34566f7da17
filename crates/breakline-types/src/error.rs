//! Error taxonomy for breakline.

use std::fmt;

use thiserror::Error;

/// Result type alias for breakline operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// The closed set of failure categories.
///
/// Variants are declared in detection priority order: when several failures
/// are observed for one request, the smallest kind wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorKind {
    /// The spot identifier is syntactically invalid.
    InvalidInput,
    /// The upstream does not know the spot.
    SpotNotFound,
    /// The upstream rejected our credentials or identity.
    AuthenticationError,
    /// The upstream asked us to slow down.
    RateLimited,
    /// Network, proxy or non-success upstream failure.
    TransportError,
    /// The upstream answered but required data is missing.
    IncompleteData,
    /// Anything not covered above.
    UnexpectedError,
}

impl ErrorKind {
    /// Returns the HTTP status code exposed for this kind.
    #[must_use]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::InvalidInput => 400,
            Self::SpotNotFound => 404,
            Self::AuthenticationError => 401,
            Self::RateLimited => 429,
            Self::TransportError | Self::IncompleteData | Self::UnexpectedError => 500,
        }
    }

    /// Returns a stable snake_case name, used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::SpotNotFound => "spot_not_found",
            Self::AuthenticationError => "authentication_error",
            Self::RateLimited => "rate_limited",
            Self::TransportError => "transport_error",
            Self::IncompleteData => "incomplete_data",
            Self::UnexpectedError => "unexpected_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while producing a surf report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ForecastError {
    /// The spot identifier failed validation.
    #[error("Invalid spot ID format")]
    InvalidInput,

    /// The upstream returned 404 for the spot.
    #[error("Spot ID {0} not found")]
    SpotNotFound(String),

    /// The upstream returned 401 or 403.
    #[error("API authentication error")]
    Authentication {
        /// HTTP status returned by the upstream.
        status: u16,
    },

    /// The upstream returned 429.
    #[error("Rate limit exceeded. Please try again later")]
    RateLimited,

    /// Network failure, proxy failure, timeout or other non-success status.
    #[error("Error fetching surf data: {message}")]
    Transport {
        /// HTTP status, when the failure came from a response.
        status: Option<u16>,
        /// Description of the failure.
        message: String,
    },

    /// Required domains were missing from the upstream data.
    #[error("Incomplete data received from surf API")]
    IncompleteData {
        /// What was missing.
        missing: String,
    },

    /// Uncategorized failure.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl ForecastError {
    /// Creates a transport error without a status code.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            status: None,
            message: message.into(),
        }
    }

    /// Creates an incomplete-data error describing what is missing.
    pub fn incomplete(missing: impl Into<String>) -> Self {
        Self::IncompleteData {
            missing: missing.into(),
        }
    }

    /// Returns the category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput => ErrorKind::InvalidInput,
            Self::SpotNotFound(_) => ErrorKind::SpotNotFound,
            Self::Authentication { .. } => ErrorKind::AuthenticationError,
            Self::RateLimited => ErrorKind::RateLimited,
            Self::Transport { .. } => ErrorKind::TransportError,
            Self::IncompleteData { .. } => ErrorKind::IncompleteData,
            Self::Unexpected(_) => ErrorKind::UnexpectedError,
        }
    }

    /// Returns the HTTP status code exposed for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    /// Picks the error that should be reported when several occurred.
    ///
    /// The highest-priority kind wins; on a tie the earlier error is kept, so
    /// the result depends only on the order of `errors`, never on timing.
    pub fn most_significant<I>(errors: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        errors.into_iter().fold(None, |best, err| match best {
            Some(best) if best.kind() <= err.kind() => Some(best),
            _ => Some(err),
        })
    }
}
