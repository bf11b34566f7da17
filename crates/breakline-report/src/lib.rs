//! Forecast normalization and surf report assembly for breakline.
//!
//! This crate converts decoded upstream data into the canonical report:
//!
//! - [`adjust_time`] - Local 12-hour display time from a timestamp and offset
//! - [`select_tides`] - Extreme tides packed into four fixed slots
//! - [`assemble`] - Full [`SurfReport`](breakline_types::SurfReport) assembly

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/breakline-surf/breakline/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod assemble;
mod tides;
mod time;

pub use assemble::{assemble, round_to_tenth};
pub use tides::select_tides;
pub use time::adjust_time;
