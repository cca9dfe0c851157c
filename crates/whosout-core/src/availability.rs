//! Computing a day's free intervals from its busy events.
//!
//! The working day splits into two base periods around the lunch window
//! (morning and afternoon). Busy events overlapping office hours are merged
//! into a minimal disjoint set and subtracted from the base periods; what
//! remains, minus anything shorter than the configured minimum, is the day's
//! availability.

use chrono::{NaiveDate, TimeDelta};
use tracing::debug;

use crate::event::Event;
use crate::interval::{Interval, merge_intervals};
use crate::settings::TeamSettings;

/// Computes the free intervals for one day.
///
/// `day_events` are the day's blocking events for the people under
/// consideration — both busy and out-of-office, including slices hidden from
/// display. Any full-day event makes the whole day unavailable, before
/// anything else is considered.
///
/// Malformed office hours degrade to an empty result for the day; a
/// malformed lunch window degrades to treating the whole office span as one
/// base period. Neither aborts the render pass.
///
/// When the day has no blocking events at all, the bare base periods are
/// returned as-is, without the minimum-duration filter.
pub fn available_intervals(
    day: NaiveDate,
    day_events: &[Event],
    settings: &TeamSettings,
    min_duration_minutes: i64,
) -> Vec<Interval> {
    // A full-day absence or booking blanks the day outright.
    if day_events.iter().any(|e| e.is_full_day) {
        return Vec::new();
    }

    let Some(office) = settings.office_hours.span_on(day) else {
        debug!(%day, "office hours failed to resolve, no availability");
        return Vec::new();
    };
    if office.is_empty() {
        return Vec::new();
    }

    let base_periods = base_periods(&office, settings.lunch_break.span_on(day));

    if day_events.is_empty() {
        return base_periods;
    }

    // Busy spans that can affect office hours; full-day events always count.
    let busy: Vec<Interval> = day_events
        .iter()
        .filter(|e| e.is_full_day || !(e.end <= office.start || e.start >= office.end))
        .map(Event::interval)
        .collect();
    let busy = merge_intervals(busy);

    let mut free = Vec::new();
    for period in &base_periods {
        subtract_into(period, &busy, &mut free);
    }

    let min_duration = TimeDelta::minutes(min_duration_minutes);
    free.retain(|iv| !iv.is_empty() && iv.duration() >= min_duration);
    free
}

/// Splits office hours into morning and afternoon around the lunch window.
///
/// A lunch window touching or crossing an office boundary drops the
/// corresponding period rather than producing a negative-length one; an
/// unresolvable lunch leaves the office span whole.
fn base_periods(office: &Interval, lunch: Option<Interval>) -> Vec<Interval> {
    let Some(lunch) = lunch else {
        return vec![*office];
    };

    let mut periods = Vec::with_capacity(2);
    if office.start < lunch.start {
        periods.push(Interval::new(office.start, lunch.start.min(office.end)));
    }
    if lunch.end < office.end {
        periods.push(Interval::new(lunch.end.max(office.start), office.end));
    }
    periods
}

/// Subtracts the merged busy set from one base period, appending the gaps.
///
/// Walks the period left to right: for every busy interval that intersects
/// it, the gap before the busy span (if any) is emitted and the cursor jumps
/// to the busy span's end; the remaining tail is emitted last.
fn subtract_into(period: &Interval, busy: &[Interval], out: &mut Vec<Interval>) {
    let mut cursor = period.start;

    for block in busy {
        if block.start >= period.end {
            continue;
        }
        if block.end <= cursor {
            continue;
        }
        if block.start > cursor {
            out.push(Interval::new(cursor, block.start));
        }
        cursor = block.end;
        if cursor >= period.end {
            break;
        }
    }

    if cursor < period.end {
        out.push(Interval::new(cursor, period.end));
    }
}
