//! Localizing wire timestamps into the display time zone.
//!
//! The availability view shows a single wall-clock timeline; every zoned
//! wire timestamp is converted to that display zone before it reaches the
//! splitter. One malformed timestamp skips its item — it must never sink the
//! rest of the fetch.

use chrono::{NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use tracing::warn;
use whosout_core::ScheduleItem;

use crate::schedule::{RawScheduleItem, ScheduleTime};

/// Wire timestamp layout: `yyyy-MM-ddTHH:mm:ss` with optional fractional
/// seconds (the service pads to seven digits).
const WIRE_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Resolves a wire timestamp to wall time in the display zone.
///
/// Returns `None` if the timestamp string or the zone name fails to parse.
/// Ambiguous local times (the fall-back hour) resolve to their earliest
/// mapping; nonexistent ones (the spring-forward gap) are rejected.
pub fn localize(time: &ScheduleTime, display_zone: Tz) -> Option<NaiveDateTime> {
    let naive = NaiveDateTime::parse_from_str(&time.date_time, WIRE_DATETIME_FORMAT).ok()?;
    let source_zone: Tz = time.time_zone.parse().ok()?;
    let zoned = source_zone.from_local_datetime(&naive).earliest()?;
    Some(zoned.with_timezone(&display_zone).naive_local())
}

/// Converts one raw schedule item into a localized [`ScheduleItem`].
///
/// Returns `None` when the item's status does not block availability or when
/// either timestamp cannot be localized (logged and skipped).
pub fn localize_item(
    raw: &RawScheduleItem,
    display_zone: Tz,
    person_email: &str,
    person_name: &str,
) -> Option<ScheduleItem> {
    let status = raw.status.blocking_status()?;

    let Some(start) = localize(&raw.start, display_zone) else {
        warn!(
            person = person_email,
            start = %raw.start.date_time,
            zone = %raw.start.time_zone,
            "skipping schedule item with unparseable start"
        );
        return None;
    };
    let Some(end) = localize(&raw.end, display_zone) else {
        warn!(
            person = person_email,
            end = %raw.end.date_time,
            zone = %raw.end.time_zone,
            "skipping schedule item with unparseable end"
        );
        return None;
    };

    Some(ScheduleItem {
        person_email: person_email.to_string(),
        person_name: person_name.to_string(),
        subject: raw.subject.clone(),
        status,
        start,
        end,
    })
}
