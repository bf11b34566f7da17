//! Surf report assembly.

use breakline_types::{ForecastError, RawForecastBundle, SurfReport};

use crate::{adjust_time, select_tides};

/// Rounds to one decimal place, half away from zero.
#[must_use]
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Rounds to the nearest whole number, half away from zero.
fn round_whole(value: f64) -> i64 {
    value.round() as i64
}

/// Builds the canonical report from the current readings of `bundle`.
///
/// Current conditions are taken from index 0 of each sequence. Tides are
/// optional: an empty tide sequence yields four empty slots.
///
/// # Errors
///
/// Returns [`ForecastError::IncompleteData`] when waves, wind, weather or
/// sunlight is empty, when the current wave has no swell, or when a displayed
/// time carries an impossible UTC offset.
pub fn assemble(bundle: &RawForecastBundle) -> Result<SurfReport, ForecastError> {
    bundle.ensure_complete()?;

    let (Some(wave), Some(wind), Some(weather), Some(sun)) = (
        bundle.waves.first(),
        bundle.wind.first(),
        bundle.weather.first(),
        bundle.sunlight.first(),
    ) else {
        return Err(ForecastError::incomplete("current readings"));
    };
    let swell = wave
        .swells
        .first()
        .ok_or_else(|| ForecastError::incomplete("swell"))?;

    let report = SurfReport {
        surf_height: format!("{}-{}", wave.surf.min, wave.surf.max),
        surf_condition: wave.surf.human_relation.clone(),
        swell_height: round_to_tenth(swell.height),
        swell_period: swell.period,
        swell_direction: round_whole(swell.direction),
        wind_speed: round_whole(wind.speed),
        wind_direction: round_whole(wind.direction),
        wind_type: wind.direction_type.clone(),
        temperature: round_whole(weather.temperature),
        location: bundle.location.clone(),
        sunrise: adjust_time(sun.sunrise, sun.sunrise_utc_offset)?,
        sunset: adjust_time(sun.sunset, sun.sunset_utc_offset)?,
        tides: select_tides(&bundle.tides)?,
    };

    tracing::debug!(
        location = %report.location,
        tides = report.tides.filled(),
        "assembled surf report"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use breakline_types::{
        SunlightTimes, SurfRange, Swell, TideEvent, TideSlot, TideType, WaveReading,
        WeatherReading, WindReading,
    };
    use chrono::{DateTime, TimeZone, Utc};

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, h, m, 0).unwrap()
    }

    fn full_bundle() -> RawForecastBundle {
        RawForecastBundle {
            location: "Ocean Beach".into(),
            waves: vec![WaveReading {
                timestamp: at(14, 0),
                utc_offset: -7.0,
                surf: SurfRange {
                    min: 2.0,
                    max: 3.0,
                    human_relation: "Thigh to waist".into(),
                },
                swells: vec![
                    Swell {
                        height: 3.28,
                        period: 14.0,
                        direction: 272.6,
                    },
                    Swell {
                        height: 1.0,
                        period: 8.0,
                        direction: 180.0,
                    },
                ],
            }],
            wind: vec![WindReading {
                timestamp: at(14, 0),
                utc_offset: -7.0,
                speed: 5.49,
                direction: 89.5,
                direction_type: "Offshore".into(),
            }],
            tides: vec![
                TideEvent::new(at(10, 12), -7.0, 5.26, TideType::High),
                TideEvent::new(at(13, 0), -7.0, 3.0, TideType::Normal),
                TideEvent::new(at(16, 40), -7.0, 0.44, TideType::Low),
            ],
            weather: vec![WeatherReading {
                timestamp: at(14, 0),
                utc_offset: -7.0,
                temperature: 60.6,
                condition: "CLEAR".into(),
            }],
            sunlight: vec![SunlightTimes {
                sunrise: at(12, 48),
                sunrise_utc_offset: -7.0,
                sunset: at(3, 32),
                sunset_utc_offset: -7.0,
            }],
        }
    }

    #[test]
    fn test_full_report() {
        let report = assemble(&full_bundle()).unwrap();

        assert_eq!(report.surf_height, "2-3");
        assert_eq!(report.surf_condition, "Thigh to waist");
        assert_relative_eq!(report.swell_height, 3.3);
        assert_relative_eq!(report.swell_period, 14.0);
        assert_eq!(report.swell_direction, 273);
        assert_eq!(report.wind_speed, 5);
        assert_eq!(report.wind_direction, 90);
        assert_eq!(report.wind_type, "Offshore");
        assert_eq!(report.temperature, 61);
        assert_eq!(report.location, "Ocean Beach");
        assert_eq!(report.sunrise, "5:48 AM");
        assert_eq!(report.sunset, "8:32 PM");

        assert_eq!(report.tides.filled(), 2);
        assert_eq!(report.tides.0[0].time(), "3:12 AM");
        assert_eq!(report.tides.0[1].time(), "9:40 AM");
        assert_eq!(report.tides.0[2], TideSlot::Empty);
        assert_eq!(report.tides.0[3], TideSlot::Empty);
    }

    #[test]
    fn test_fractional_surf_band() {
        let mut bundle = full_bundle();
        bundle.waves[0].surf.min = 1.5;
        bundle.waves[0].surf.max = 2.5;
        assert_eq!(assemble(&bundle).unwrap().surf_height, "1.5-2.5");
    }

    #[test]
    fn test_empty_tides_is_not_a_failure() {
        let mut bundle = full_bundle();
        bundle.tides.clear();
        let report = assemble(&bundle).unwrap();
        assert_eq!(report.tides.filled(), 0);
    }

    #[test]
    fn test_only_normal_tides_gives_empty_slots() {
        let mut bundle = full_bundle();
        bundle.tides.retain(|t| t.kind == TideType::Normal);
        let report = assemble(&bundle).unwrap();
        assert!(report.tides.as_slice().iter().all(TideSlot::is_empty));
    }

    #[test]
    fn test_missing_required_domain_fails() {
        let cases: [fn(&mut RawForecastBundle); 4] = [
            |b| b.waves.clear(),
            |b| b.wind.clear(),
            |b| b.weather.clear(),
            |b| b.sunlight.clear(),
        ];
        for clear in cases {
            let mut bundle = full_bundle();
            clear(&mut bundle);
            let err = assemble(&bundle).unwrap_err();
            assert!(matches!(err, ForecastError::IncompleteData { .. }));
        }
    }

    #[test]
    fn test_missing_swell_fails() {
        let mut bundle = full_bundle();
        bundle.waves[0].swells.clear();
        assert_eq!(
            assemble(&bundle).unwrap_err(),
            ForecastError::incomplete("swell")
        );
    }

    #[test]
    fn test_impossible_sunrise_offset_fails() {
        let mut bundle = full_bundle();
        bundle.sunlight[0].sunrise_utc_offset = 1.0e16;
        assert_eq!(
            assemble(&bundle).unwrap_err(),
            ForecastError::incomplete("utc offset")
        );
    }

    #[test]
    fn test_round_to_tenth() {
        assert_relative_eq!(round_to_tenth(3.28), 3.3);
        assert_relative_eq!(round_to_tenth(3.24), 3.2);
        assert_relative_eq!(round_to_tenth(-0.34), -0.3);
        assert_relative_eq!(round_to_tenth(0.0), 0.0);
    }
}
