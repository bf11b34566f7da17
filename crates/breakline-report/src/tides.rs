//! Extreme tide selection.

use breakline_types::{ForecastError, TIDE_SLOT_COUNT, TideEvent, TideSlot, TideSlots};

use crate::{adjust_time, round_to_tenth};

/// Packs the first four high or low tides of `events` into report slots.
///
/// Events keep their input order; `NORMAL` readings are skipped wherever they
/// appear. Slots without a qualifying event are left as [`TideSlot::Empty`].
///
/// # Errors
///
/// Returns [`ForecastError::IncompleteData`] when a selected event carries an
/// impossible UTC offset.
pub fn select_tides(events: &[TideEvent]) -> Result<TideSlots, ForecastError> {
    let mut slots = TideSlots::default();
    let extremes = events.iter().filter(|event| event.kind.is_extreme());

    for (slot, event) in slots.0.iter_mut().zip(extremes.take(TIDE_SLOT_COUNT)) {
        *slot = TideSlot::Filled {
            time: adjust_time(event.timestamp, event.utc_offset)?,
            height: round_to_tenth(event.height),
            kind: event.kind,
        };
    }

    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use breakline_types::TideType;
    use chrono::{TimeDelta, TimeZone, Utc};

    fn event(hours_after_midnight: i64, height: f64, kind: TideType) -> TideEvent {
        let midnight = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        TideEvent::new(
            midnight + TimeDelta::hours(hours_after_midnight),
            0.0,
            height,
            kind,
        )
    }

    fn alternating(count: usize) -> Vec<TideEvent> {
        (0..count)
            .map(|i| {
                let kind = if i % 2 == 0 { TideType::High } else { TideType::Low };
                event(i as i64, i as f64, kind)
            })
            .collect()
    }

    #[test]
    fn test_always_four_slots() {
        for count in [0, 1, 4, 10, 25] {
            let slots = select_tides(&alternating(count)).unwrap();
            assert_eq!(slots.as_slice().len(), 4);
            assert_eq!(slots.filled(), count.min(4));
        }
    }

    #[test]
    fn test_trailing_slots_empty() {
        let slots = select_tides(&alternating(2)).unwrap();
        assert!(!slots.0[0].is_empty());
        assert!(!slots.0[1].is_empty());
        assert_eq!(slots.0[2], TideSlot::Empty);
        assert_eq!(slots.0[3], TideSlot::Empty);
    }

    #[test]
    fn test_skips_normal_events() {
        let events = vec![
            event(0, 3.0, TideType::Normal),
            event(1, 3.1, TideType::Normal),
            event(4, 5.26, TideType::High),
            event(5, 4.0, TideType::Normal),
            event(10, -0.34, TideType::Low),
        ];
        let slots = select_tides(&events).unwrap();

        assert_eq!(slots.filled(), 2);
        assert_eq!(slots.0[0].time(), "4:00 AM");
        assert_eq!(slots.0[0].type_label(), "HIGH");
        assert_relative_eq!(slots.0[0].height().unwrap(), 5.3);
        assert_eq!(slots.0[1].time(), "10:00 AM");
        assert_eq!(slots.0[1].type_label(), "LOW");
        assert_relative_eq!(slots.0[1].height().unwrap(), -0.3);
    }

    #[test]
    fn test_keeps_input_order() {
        let events = vec![
            event(18, 1.0, TideType::Low),
            event(6, 2.0, TideType::High),
        ];
        let slots = select_tides(&events).unwrap();
        assert_eq!(slots.0[0].time(), "6:00 PM");
        assert_eq!(slots.0[1].time(), "6:00 AM");
    }

    #[test]
    fn test_idempotent() {
        let events = alternating(7);
        assert_eq!(select_tides(&events).unwrap(), select_tides(&events).unwrap());
    }

    #[test]
    fn test_impossible_offset_fails() {
        let mut high = event(14, 1.0, TideType::High);
        high.utc_offset = 1.0e16;
        assert_eq!(
            select_tides(&[high]),
            Err(ForecastError::incomplete("utc offset"))
        );
    }

    #[test]
    fn test_uses_event_offset() {
        let mut high = event(14, 1.0, TideType::High);
        high.utc_offset = -4.0;
        let slots = select_tides(&[high]).unwrap();
        assert_eq!(slots.0[0].time(), "10:00 AM");
    }
}
