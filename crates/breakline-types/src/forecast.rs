//! Raw forecast data as decoded from the upstream provider.
//!
//! Every reading carries an absolute timestamp (epoch seconds on the wire)
//! and the UTC offset, in hours, of the spot at that instant. Sequences are
//! ordered by forecast time and index 0 is the current reading.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ForecastError;

/// The upstream data domains fetched for one report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    /// Surf and swell readings.
    Wave,
    /// Wind readings.
    Wind,
    /// Tide events.
    Tides,
    /// Weather readings.
    Weather,
    /// Sunrise and sunset times.
    Sunlight,
}

impl Domain {
    /// All domains in fetch order.
    pub const ALL: [Self; 5] = [
        Self::Wave,
        Self::Wind,
        Self::Tides,
        Self::Weather,
        Self::Sunlight,
    ];

    /// Returns the upstream path segment and payload key for this domain.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wave => "wave",
            Self::Wind => "wind",
            Self::Tides => "tides",
            Self::Weather => "weather",
            Self::Sunlight => "sunlight",
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate surf height band with its human description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfRange {
    /// Lower bound of the surf height.
    pub min: f64,
    /// Upper bound of the surf height.
    pub max: f64,
    /// Human-readable relation, e.g. "Waist to chest".
    #[serde(default)]
    pub human_relation: String,
}

/// A single swell component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Swell {
    /// Swell height.
    pub height: f64,
    /// Swell period in seconds.
    pub period: f64,
    /// Direction the swell comes from, in degrees.
    pub direction: f64,
}

/// One wave forecast reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaveReading {
    /// Forecast instant.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    /// Spot UTC offset in hours.
    pub utc_offset: f64,
    /// Aggregate surf height.
    pub surf: SurfRange,
    /// Swell components, dominant first.
    #[serde(default)]
    pub swells: Vec<Swell>,
}

/// One wind forecast reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindReading {
    /// Forecast instant.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    /// Spot UTC offset in hours.
    pub utc_offset: f64,
    /// Wind speed.
    pub speed: f64,
    /// Direction the wind comes from, in degrees.
    pub direction: f64,
    /// Relation to the coastline, e.g. "Offshore".
    #[serde(default)]
    pub direction_type: String,
}

/// One weather forecast reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReading {
    /// Forecast instant.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    /// Spot UTC offset in hours.
    pub utc_offset: f64,
    /// Air temperature.
    pub temperature: f64,
    /// Condition code, e.g. "CLEAR".
    #[serde(default)]
    pub condition: String,
}

/// Sunrise and sunset for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunlightTimes {
    /// Sunrise instant.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub sunrise: DateTime<Utc>,
    /// UTC offset in effect at sunrise.
    #[serde(rename = "sunriseUTCOffset")]
    pub sunrise_utc_offset: f64,
    /// Sunset instant.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub sunset: DateTime<Utc>,
    /// UTC offset in effect at sunset.
    #[serde(rename = "sunsetUTCOffset")]
    pub sunset_utc_offset: f64,
}

/// Tide event classification.
///
/// Unknown upstream labels decode as [`TideType::Normal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", from = "String")]
pub enum TideType {
    /// High water.
    High,
    /// Low water.
    Low,
    /// Intermediate reading.
    Normal,
}

impl TideType {
    /// Returns the upstream label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Low => "LOW",
            Self::Normal => "NORMAL",
        }
    }

    /// Returns true for high or low water.
    #[must_use]
    pub const fn is_extreme(self) -> bool {
        matches!(self, Self::High | Self::Low)
    }
}

impl From<String> for TideType {
    fn from(label: String) -> Self {
        match label.to_ascii_uppercase().as_str() {
            "HIGH" => Self::High,
            "LOW" => Self::Low,
            _ => Self::Normal,
        }
    }
}

impl std::fmt::Display for TideType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One tide reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TideEvent {
    /// Instant of the reading.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    /// Spot UTC offset in hours.
    pub utc_offset: f64,
    /// Water height, in upstream units.
    pub height: f64,
    /// Event classification.
    #[serde(rename = "type")]
    pub kind: TideType,
}

impl TideEvent {
    /// Creates a new tide event.
    #[must_use]
    pub const fn new(timestamp: DateTime<Utc>, utc_offset: f64, height: f64, kind: TideType) -> Self {
        Self {
            timestamp,
            utc_offset,
            height,
            kind,
        }
    }
}

/// Everything fetched from the upstream for one spot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawForecastBundle {
    /// Display name of the spot.
    pub location: String,
    /// Wave readings, current first.
    pub waves: Vec<WaveReading>,
    /// Wind readings, current first.
    pub wind: Vec<WindReading>,
    /// Tide events in chronological order. May be empty.
    pub tides: Vec<TideEvent>,
    /// Weather readings, current first.
    pub weather: Vec<WeatherReading>,
    /// Sunlight times, today first.
    pub sunlight: Vec<SunlightTimes>,
}

impl RawForecastBundle {
    /// Returns the required domains that have no data.
    ///
    /// Tides are not required: a spot without tide data still yields a report
    /// with empty tide slots.
    #[must_use]
    pub fn missing_domains(&self) -> Vec<Domain> {
        let mut missing = Vec::new();
        if self.waves.is_empty() {
            missing.push(Domain::Wave);
        }
        if self.wind.is_empty() {
            missing.push(Domain::Wind);
        }
        if self.weather.is_empty() {
            missing.push(Domain::Weather);
        }
        if self.sunlight.is_empty() {
            missing.push(Domain::Sunlight);
        }
        missing
    }

    /// Checks that every required domain is present.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::IncompleteData`] naming the empty domains.
    pub fn ensure_complete(&self) -> Result<(), ForecastError> {
        let missing = self.missing_domains();
        if missing.is_empty() {
            return Ok(());
        }
        let names: Vec<&str> = missing.iter().map(|d| d.as_str()).collect();
        Err(ForecastError::incomplete(names.join(", ")))
    }
}
