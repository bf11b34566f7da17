//! Local display time.

use breakline_types::ForecastError;
use chrono::{DateTime, TimeDelta, Utc};

/// Seconds in one hour.
const SECONDS_PER_HOUR: f64 = 3600.0;

/// Largest UTC offset accepted, in hours either side of UTC.
pub const MAX_UTC_OFFSET_HOURS: f64 = 24.0;

/// Shifts `timestamp` by `utc_offset_hours` and formats it as a 12-hour
/// clock time without a leading zero, e.g. `"6:32 AM"`.
///
/// Fractional offsets shift by whole minutes (`9.5` is +9h30m). The result
/// does not depend on the host time zone or locale.
///
/// # Errors
///
/// Returns [`ForecastError::IncompleteData`] when the offset is not finite or
/// lies beyond [`MAX_UTC_OFFSET_HOURS`].
///
/// # Example
///
/// ```
/// use breakline_report::adjust_time;
/// use chrono::{TimeZone, Utc};
///
/// let ts = Utc.with_ymd_and_hms(2024, 6, 1, 14, 0, 0).unwrap();
/// assert_eq!(adjust_time(ts, -4.0).unwrap(), "10:00 AM");
/// ```
pub fn adjust_time(
    timestamp: DateTime<Utc>,
    utc_offset_hours: f64,
) -> Result<String, ForecastError> {
    if !utc_offset_hours.is_finite() || utc_offset_hours.abs() > MAX_UTC_OFFSET_HOURS {
        return Err(invalid_offset(utc_offset_hours));
    }
    let seconds = (utc_offset_hours * SECONDS_PER_HOUR).round() as i64;
    let local = TimeDelta::try_seconds(seconds)
        .and_then(|offset| timestamp.naive_utc().checked_add_signed(offset))
        .ok_or_else(|| invalid_offset(utc_offset_hours))?;
    Ok(local.format("%-I:%M %p").to_string())
}

fn invalid_offset(utc_offset_hours: f64) -> ForecastError {
    tracing::warn!(utc_offset_hours, "rejecting out-of-range UTC offset");
    ForecastError::incomplete("utc offset")
}
