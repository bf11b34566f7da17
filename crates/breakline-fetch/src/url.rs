//! Upstream forecast URL construction.

use breakline_types::{Domain, SpotId};
use serde::Deserialize;

/// Default upstream host.
pub const DEFAULT_BASE_URL: &str = "https://services.surfline.com";

/// Path under which the per-domain forecast endpoints live.
pub const FORECAST_PATH: &str = "kbyg/spots/forecasts";

/// Upstream location and forecast window.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Upstream {
    /// Scheme and host of the forecast provider.
    pub base_url: String,
    /// Forecast window length in days.
    pub days: u32,
    /// Sampling interval in hours.
    pub interval_hours: u32,
}

impl Default for Upstream {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            days: 1,
            interval_hours: 1,
        }
    }
}

impl Upstream {
    /// Builds the endpoint URL for one domain.
    ///
    /// URL format: `{base_url}/kbyg/spots/forecasts/{domain}`
    ///
    /// # Example
    ///
    /// ```
    /// use breakline_fetch::url::Upstream;
    /// use breakline_types::Domain;
    ///
    /// let url = Upstream::default().forecast_url(Domain::Tides);
    /// assert_eq!(url, "https://services.surfline.com/kbyg/spots/forecasts/tides");
    /// ```
    #[must_use]
    pub fn forecast_url(&self, domain: Domain) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            FORECAST_PATH,
            domain.as_str()
        )
    }

    /// Builds the query parameters shared by every domain request.
    #[must_use]
    pub fn forecast_query(&self, spot: &SpotId) -> Vec<(&'static str, String)> {
        vec![
            ("spotId", spot.to_string()),
            ("days", self.days.to_string()),
            ("intervalHours", self.interval_hours.to_string()),
        ]
    }
}
