//! Core types for the breakline surf report service.
//!
//! This crate provides the data structures shared by every stage of the
//! report pipeline:
//!
//! - [`SpotId`] - A validated hexadecimal spot identifier
//! - [`RawForecastBundle`] - Decoded upstream data for the wave, wind, tide,
//!   weather and sunlight domains
//! - [`TideEvent`] - A single tide reading with its type
//! - [`SurfReport`] - The canonical, flat report returned to callers
//! - [`ForecastError`] - The closed error taxonomy and its status mapping

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/breakline-surf/breakline/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod forecast;
mod report;
mod spot;

pub use error::{ErrorKind, ForecastError, Result};
pub use forecast::{
    Domain, RawForecastBundle, SunlightTimes, SurfRange, Swell, TideEvent, TideType,
    WaveReading, WeatherReading, WindReading,
};
pub use report::{SurfReport, TIDE_SLOT_COUNT, TideSlot, TideSlots};
pub use spot::SpotId;
