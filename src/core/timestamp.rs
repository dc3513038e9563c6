//! Epoch timestamps from the tracker logs.
//!
//! Early recordings carry 13-digit millisecond timestamps; after the logger
//! switched to microsecond resolution the files carry 16-digit values.
//! Everything is normalized to microseconds internally so both generations
//! of files line up on the same axis.

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{Error, Result};

/// Raw values at or above this are already microseconds.
/// 1e14 µs is May 1973; 1e14 ms is the year 5138 — no study data is near
/// either side of the boundary.
const MICROS_THRESHOLD: i64 = 100_000_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct EpochTimestamp(i64);

impl EpochTimestamp {
    pub fn from_micros(micros: i64) -> Self {
        Self(micros)
    }

    pub fn from_millis(millis: i64) -> Self {
        Self(millis * 1000)
    }

    /// Interpret a raw logged value, detecting the unit from its magnitude.
    pub fn from_raw(value: i64) -> Self {
        if value >= MICROS_THRESHOLD {
            Self::from_micros(value)
        } else {
            Self::from_millis(value)
        }
    }

    pub fn as_micros(&self) -> i64 {
        self.0
    }

    pub fn as_secs_f64(&self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }

    pub fn to_utc(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_micros(self.0).unwrap_or_default()
    }

    /// Localize to a named display timezone.
    pub fn to_zone(&self, tz: Tz) -> DateTime<Tz> {
        self.to_utc().with_timezone(&tz)
    }
}

/// Resolve a timezone name from the config, e.g. `America/Chicago`.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| Error::Timezone(name.to_string()))
}

/// Format used for the summary CSV date columns; round-trips through
/// `parse_summary_date`.
pub const SUMMARY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f %z";

pub fn format_summary_date<T: TimeZone>(date: &DateTime<T>) -> String
where
    T::Offset: std::fmt::Display,
{
    date.format(SUMMARY_DATE_FORMAT).to_string()
}

pub fn parse_summary_date(text: &str) -> Option<DateTime<chrono::FixedOffset>> {
    DateTime::parse_from_str(text, SUMMARY_DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_detection_normalizes_both_generations() {
        // 2020-01-17, once as milliseconds and once as microseconds.
        let millis = EpochTimestamp::from_raw(1_579_287_816_000);
        let micros = EpochTimestamp::from_raw(1_579_287_816_000_000);
        assert_eq!(millis.as_micros(), micros.as_micros());
        assert_eq!(millis.as_secs_f64(), 1_579_287_816.0);
    }

    #[test]
    fn timezone_localization() {
        let ts = EpochTimestamp::from_millis(1_579_287_816_000);
        let tz = parse_timezone("America/Chicago").unwrap();
        let local = ts.to_zone(tz);
        // UTC 18:23:36 is 12:23:36 in Chicago (CST, -0600).
        assert_eq!(local.format("%H:%M:%S").to_string(), "12:23:36");
    }

    #[test]
    fn unknown_timezone_is_an_error() {
        assert!(parse_timezone("Mars/Olympus").is_err());
    }

    #[test]
    fn summary_date_round_trip() {
        let ts = EpochTimestamp::from_millis(1_579_287_816_123);
        let tz = parse_timezone("America/Chicago").unwrap();
        let text = format_summary_date(&ts.to_zone(tz));
        let parsed = parse_summary_date(&text).expect("round trip");
        assert_eq!(parsed.timestamp_millis(), 1_579_287_816_123);
    }
}
