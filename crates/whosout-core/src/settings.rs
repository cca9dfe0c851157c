//! Team-level schedule settings.
//!
//! Office hours and the lunch window are stored as `"HH:MM"` strings — the
//! same representation the persisted state and the exported profile use —
//! and are resolved against a concrete day when the calculator needs them.
//! Malformed strings resolve to `None`; callers degrade instead of failing
//! the whole render pass.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::interval::Interval;

/// A daily time range expressed as `"HH:MM"` endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursRange {
    /// Start of the range, e.g. `"09:00"`.
    pub start: String,
    /// End of the range, e.g. `"17:00"`.
    pub end: String,
}

impl HoursRange {
    /// Creates a range from the given endpoint strings.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Resolves this range against a concrete day.
    ///
    /// Returns `None` if either endpoint fails to parse. The result may be
    /// empty or inverted (`start >= end`); deciding what that means is the
    /// caller's business.
    pub fn span_on(&self, day: NaiveDate) -> Option<Interval> {
        let start = parse_time_of_day(&self.start)?;
        let end = parse_time_of_day(&self.end)?;
        Some(Interval::new(day.and_time(start), day.and_time(end)))
    }
}

/// Parses a `"HH:MM"` time-of-day string.
pub fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").ok()
}

/// Shared team settings: office hours and the lunch window.
///
/// The lunch window is expected to fall inside office hours, but nothing
/// here enforces that — the availability calculator tolerates inverted or
/// out-of-range lunch windows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamSettings {
    /// The working day, e.g. 09:00–17:00.
    pub office_hours: HoursRange,
    /// The lunch window, e.g. 12:30–13:00.
    pub lunch_break: HoursRange,
}

impl Default for TeamSettings {
    fn default() -> Self {
        Self {
            office_hours: HoursRange::new("09:00", "17:00"),
            lunch_break: HoursRange::new("12:30", "13:00"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
    }

    fn dt(h: u32, m: u32) -> NaiveDateTime {
        day().and_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn parses_time_of_day() {
        assert_eq!(
            parse_time_of_day("09:30"),
            NaiveTime::from_hms_opt(9, 30, 0)
        );
        assert_eq!(
            parse_time_of_day(" 17:00 "),
            NaiveTime::from_hms_opt(17, 0, 0)
        );
        assert_eq!(parse_time_of_day("9am"), None);
        assert_eq!(parse_time_of_day(""), None);
        assert_eq!(parse_time_of_day("25:00"), None);
    }

    #[test]
    fn resolves_range_on_day() {
        let range = HoursRange::new("09:00", "17:00");
        let span = range.span_on(day()).unwrap();
        assert_eq!(span.start, dt(9, 0));
        assert_eq!(span.end, dt(17, 0));
    }

    #[test]
    fn malformed_endpoint_resolves_to_none() {
        assert!(HoursRange::new("nine", "17:00").span_on(day()).is_none());
        assert!(HoursRange::new("09:00", "").span_on(day()).is_none());
    }

    #[test]
    fn inverted_range_is_passed_through() {
        let span = HoursRange::new("17:00", "09:00").span_on(day()).unwrap();
        assert!(span.is_empty());
    }

    #[test]
    fn default_settings() {
        let settings = TeamSettings::default();
        assert_eq!(settings.office_hours, HoursRange::new("09:00", "17:00"));
        assert_eq!(settings.lunch_break, HoursRange::new("12:30", "13:00"));
    }

    #[test]
    fn serde_uses_camel_case() {
        let settings = TeamSettings::default();
        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains("\"officeHours\""));
        assert!(json.contains("\"lunchBreak\""));

        let parsed: TeamSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings, parsed);
    }

    #[test]
    fn serde_fills_missing_fields_with_defaults() {
        let parsed: TeamSettings =
            serde_json::from_str(r#"{"officeHours":{"start":"08:00","end":"16:00"}}"#).unwrap();
        assert_eq!(parsed.office_hours, HoursRange::new("08:00", "16:00"));
        assert_eq!(parsed.lunch_break, HoursRange::new("12:30", "13:00"));
    }
}
