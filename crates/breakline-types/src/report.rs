//! The canonical surf report.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::TideType;

/// Number of tide slots in every report.
pub const TIDE_SLOT_COUNT: usize = 4;

/// One tide position in the report.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TideSlot {
    /// No qualifying tide event; every field serializes as `""`.
    #[default]
    Empty,
    /// A selected high or low tide.
    Filled {
        /// Local display time, e.g. "6:32 AM".
        time: String,
        /// Height rounded to one decimal.
        height: f64,
        /// High or low.
        kind: TideType,
    },
}

impl TideSlot {
    /// Returns true for the canonical empty slot.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns the display time, or `""` when empty.
    #[must_use]
    pub fn time(&self) -> &str {
        match self {
            Self::Empty => "",
            Self::Filled { time, .. } => time,
        }
    }

    /// Returns the height, if filled.
    #[must_use]
    pub const fn height(&self) -> Option<f64> {
        match self {
            Self::Empty => None,
            Self::Filled { height, .. } => Some(*height),
        }
    }

    /// Returns the type label, or `""` when empty.
    #[must_use]
    pub const fn type_label(&self) -> &'static str {
        match self {
            Self::Empty => "",
            Self::Filled { kind, .. } => kind.as_str(),
        }
    }
}

/// The fixed set of tide slots, filled left to right.
///
/// Serializes as flat `tide{n}_time`, `tide{n}_height`, `tide{n}_type` keys so
/// it can be flattened into [`SurfReport`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TideSlots(pub [TideSlot; TIDE_SLOT_COUNT]);

impl TideSlots {
    /// Returns the slots as a slice.
    #[must_use]
    pub const fn as_slice(&self) -> &[TideSlot] {
        &self.0
    }

    /// Returns the number of filled slots.
    #[must_use]
    pub fn filled(&self) -> usize {
        self.0.iter().filter(|slot| !slot.is_empty()).count()
    }
}

impl Serialize for TideSlots {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(TIDE_SLOT_COUNT * 3))?;
        for (i, slot) in self.0.iter().enumerate() {
            let n = i + 1;
            map.serialize_entry(&format!("tide{n}_time"), slot.time())?;
            match slot.height() {
                Some(height) => map.serialize_entry(&format!("tide{n}_height"), &height)?,
                None => map.serialize_entry(&format!("tide{n}_height"), "")?,
            }
            map.serialize_entry(&format!("tide{n}_type"), slot.type_label())?;
        }
        map.end()
    }
}

/// Normalized surf conditions for one spot.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SurfReport {
    /// Surf height band, formatted `"{min}-{max}"`.
    pub surf_height: String,
    /// Human description of the surf.
    pub surf_condition: String,
    /// Dominant swell height, one decimal.
    pub swell_height: f64,
    /// Dominant swell period in seconds, as sent upstream.
    #[serde(serialize_with = "whole_or_fraction")]
    pub swell_period: f64,
    /// Dominant swell direction in whole degrees.
    pub swell_direction: i64,
    /// Wind speed, rounded.
    pub wind_speed: i64,
    /// Wind direction in whole degrees.
    pub wind_direction: i64,
    /// Wind relation to the coast.
    pub wind_type: String,
    /// Air temperature, rounded.
    pub temperature: i64,
    /// Spot display name.
    pub location: String,
    /// Local sunrise time.
    pub sunrise: String,
    /// Local sunset time.
    pub sunset: String,
    /// The four tide slots.
    #[serde(flatten)]
    pub tides: TideSlots,
}

/// Writes whole values as integers, so a period of `14` stays `14`.
fn whole_or_fraction<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn report(tides: TideSlots) -> SurfReport {
        SurfReport {
            surf_height: "2-3".into(),
            surf_condition: "Thigh to waist".into(),
            swell_height: 3.3,
            swell_period: 14.0,
            swell_direction: 272,
            wind_speed: 5,
            wind_direction: 90,
            wind_type: "Offshore".into(),
            temperature: 61,
            location: "Ocean Beach".into(),
            sunrise: "6:52 AM".into(),
            sunset: "4:58 PM".into(),
            tides,
        }
    }

    #[test]
    fn test_empty_slots_serialize_as_empty_strings() {
        let value = serde_json::to_value(report(TideSlots::default())).unwrap();
        for n in 1..=4 {
            assert_eq!(value[format!("tide{n}_time")], json!(""));
            assert_eq!(value[format!("tide{n}_height")], json!(""));
            assert_eq!(value[format!("tide{n}_type")], json!(""));
        }
    }

    #[test]
    fn test_report_is_flat() {
        let mut slots = TideSlots::default();
        slots.0[0] = TideSlot::Filled {
            time: "3:15 AM".into(),
            height: 5.2,
            kind: TideType::High,
        };
        let value = serde_json::to_value(report(slots)).unwrap();
        let Value::Object(map) = &value else {
            panic!("report should serialize as an object");
        };

        assert_eq!(map.len(), 12 + 12);
        assert!(map.values().all(|v| !v.is_object() && !v.is_array()));
        assert_eq!(value["tide1_time"], json!("3:15 AM"));
        assert_eq!(value["tide1_height"], json!(5.2));
        assert_eq!(value["tide1_type"], json!("HIGH"));
        assert_eq!(value["tide2_type"], json!(""));
        assert_eq!(value["surf_height"], json!("2-3"));
        assert_eq!(value["swell_direction"], json!(272));
        assert_eq!(value["swell_period"], json!(14));
        assert!(value["swell_period"].is_i64());
    }

    #[test]
    fn test_fractional_period_kept() {
        let mut report = report(TideSlots::default());
        report.swell_period = 12.5;
        let value = serde_json::to_value(report).unwrap();
        assert_eq!(value["swell_period"], json!(12.5));
    }

    #[test]
    fn test_filled_count() {
        let mut slots = TideSlots::default();
        assert_eq!(slots.filled(), 0);
        slots.0[1] = TideSlot::Filled {
            time: "9:00 PM".into(),
            height: -0.3,
            kind: TideType::Low,
        };
        assert_eq!(slots.filled(), 1);
        assert_eq!(slots.as_slice()[1].type_label(), "LOW");
    }
}
