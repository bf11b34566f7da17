//! Forecast client: fans out the per-domain requests for one spot.

use std::sync::Arc;

use breakline_types::{
    Domain, ForecastError, RawForecastBundle, SpotId, SunlightTimes, TideEvent, WaveReading,
    WeatherReading, WindReading,
};
use serde::de::DeserializeOwned;

use crate::classify::{classify_egress, classify_parse, classify_response};
use crate::parse::{Decoded, decode};
use crate::url::Upstream;
use crate::EgressStrategy;

/// Fetches and decodes all forecast domains for a spot.
///
/// The client holds no per-request state: every call builds its own requests,
/// and the injected strategy is shared read-only.
#[derive(Debug, Clone)]
pub struct ForecastClient {
    strategy: Arc<dyn EgressStrategy>,
    upstream: Upstream,
}

impl ForecastClient {
    /// Creates a client that sends every request through `strategy`.
    #[must_use]
    pub fn new(strategy: Arc<dyn EgressStrategy>, upstream: Upstream) -> Self {
        Self { strategy, upstream }
    }

    /// Returns the egress strategy in use.
    #[must_use]
    pub fn strategy(&self) -> &Arc<dyn EgressStrategy> {
        &self.strategy
    }

    /// Returns the upstream configuration.
    #[must_use]
    pub const fn upstream(&self) -> &Upstream {
        &self.upstream
    }

    /// Fetches the wave, wind, tide, weather and sunlight data for `spot`.
    ///
    /// The five requests run concurrently and are all awaited. When several
    /// fail, the highest-priority failure is reported (see
    /// [`ForecastError::most_significant`]), so the outcome does not depend on
    /// which request finished first. Dropping the returned future cancels the
    /// requests still in flight.
    ///
    /// # Errors
    ///
    /// Returns the classified failure of any sub-request, or
    /// [`ForecastError::IncompleteData`] if a required domain came back empty.
    pub async fn fetch_bundle(&self, spot: &SpotId) -> Result<RawForecastBundle, ForecastError> {
        let (wave, wind, tides, weather, sunlight) = tokio::join!(
            self.fetch_domain::<WaveReading>(spot, Domain::Wave),
            self.fetch_domain::<WindReading>(spot, Domain::Wind),
            self.fetch_domain::<TideEvent>(spot, Domain::Tides),
            self.fetch_domain::<WeatherReading>(spot, Domain::Weather),
            self.fetch_domain::<SunlightTimes>(spot, Domain::Sunlight),
        );

        let (wave, wind, tides, weather, sunlight) = match (wave, wind, tides, weather, sunlight) {
            (Ok(wave), Ok(wind), Ok(tides), Ok(weather), Ok(sunlight)) => {
                (wave, wind, tides, weather, sunlight)
            }
            (wave, wind, tides, weather, sunlight) => {
                let errors = [
                    wave.err(),
                    wind.err(),
                    tides.err(),
                    weather.err(),
                    sunlight.err(),
                ];
                let err = ForecastError::most_significant(errors.into_iter().flatten())
                    .unwrap_or_else(|| ForecastError::Unexpected("no failure recorded".into()));
                tracing::warn!(spot = %spot, kind = %err.kind(), "forecast fetch failed: {err}");
                return Err(err);
            }
        };

        let location = [
            wave.location,
            wind.location,
            tides.location,
            weather.location,
            sunlight.location,
        ]
        .into_iter()
        .flatten()
        .next()
        .unwrap_or_else(|| spot.to_string());

        let bundle = RawForecastBundle {
            location,
            waves: wave.readings,
            wind: wind.readings,
            tides: tides.readings,
            weather: weather.readings,
            sunlight: sunlight.readings,
        };

        if let Err(err) = bundle.ensure_complete() {
            tracing::warn!(spot = %spot, "upstream data incomplete: {err:?}");
            return Err(err);
        }
        Ok(bundle)
    }

    /// Fetches and decodes a single domain.
    async fn fetch_domain<T: DeserializeOwned>(
        &self,
        spot: &SpotId,
        domain: Domain,
    ) -> Result<Decoded<T>, ForecastError> {
        let url = self.upstream.forecast_url(domain);
        let query = self.upstream.forecast_query(spot);
        tracing::debug!(%domain, egress = %self.strategy.kind(), "requesting {url}");

        let response = self
            .strategy
            .fetch(&url, &query)
            .await
            .map_err(|e| classify_egress(domain, &e))?;

        if let Some(err) = classify_response(spot, domain, &response) {
            tracing::debug!(%domain, status = response.status, "upstream rejected request");
            return Err(err);
        }

        let decoded = decode(domain, &response.body).map_err(|e| classify_parse(&e))?;
        tracing::debug!(%domain, readings = decoded.readings.len(), "decoded response");
        Ok(decoded)
    }
}
