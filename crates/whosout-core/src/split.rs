//! Splitting source calendar items into per-day event slices.
//!
//! A source item may span several calendar days; the stored event list holds
//! one slice per day so that every rendered day can reason about its own
//! events independently. Each slice carries its own fingerprint id and its
//! own full-day classification.
//!
//! The full-day heuristic is a tolerance band, not a midnight-to-midnight
//! check: a span counts as full-day when it lasts at least 23 hours, starts
//! in the 00:xx–01:xx hours, and ends in the 23:xx hour. Real calendar data
//! rounded through time zones rarely hits exact midnight boundaries.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta, Timelike};

use crate::event::{Event, ScheduleItem};

/// Minimum span for the full-day classification.
const FULL_DAY_MIN_HOURS: i64 = 23;
/// Latest start hour-of-day for the full-day classification.
const FULL_DAY_MAX_START_HOUR: u32 = 1;
/// Earliest end hour-of-day for the full-day classification.
const FULL_DAY_MIN_END_HOUR: u32 = 23;

/// Splits one localized source item into per-day [`Event`] slices.
///
/// - Zero-duration items signal no real commitment and are discarded.
/// - A single-day item yields one event; if it classifies as full-day its
///   bounds snap to the day's midnight boundaries.
/// - A multi-day item yields one slice per calendar day: the first keeps the
///   original start, the last keeps the original end, interior days cover
///   the whole day. Every slice is re-evaluated against the full-day
///   heuristic on its own. Slices left with zero duration (an item ending
///   exactly at midnight) are dropped.
pub fn split_schedule_item(item: &ScheduleItem) -> Vec<Event> {
    if item.end <= item.start {
        return Vec::new();
    }

    let subject = item.effective_subject().to_string();
    let start_day = item.start.date();
    let end_day = item.end.date();

    if start_day == end_day {
        let full_day = is_full_day_span(item.start, item.end);
        let (start, end) = if full_day {
            (day_start(start_day), day_end(start_day))
        } else {
            (item.start, item.end)
        };
        return vec![Event::new(
            subject,
            start,
            end,
            &item.person_email,
            &item.person_name,
            item.status,
            full_day,
        )];
    }

    let mut slices = Vec::new();
    let mut day = start_day;
    loop {
        let is_first = day == start_day;
        let is_last = day == end_day;

        let slice_start = if is_first { item.start } else { day_start(day) };
        let slice_end = if is_last { item.end } else { day_end(day) };

        if slice_start < slice_end {
            let full_day = slice_end - slice_start >= TimeDelta::hours(FULL_DAY_MIN_HOURS)
                && (!is_first || item.start.hour() <= FULL_DAY_MAX_START_HOUR)
                && (!is_last || item.end.hour() >= FULL_DAY_MIN_END_HOUR);
            let (start, end) = if full_day {
                (day_start(day), day_end(day))
            } else {
                (slice_start, slice_end)
            };
            slices.push(Event::new(
                subject.clone(),
                start,
                end,
                &item.person_email,
                &item.person_name,
                item.status,
                full_day,
            ));
        }

        if is_last {
            break;
        }
        day = day.succ_opt().expect("valid successor date");
    }

    slices
}

/// The full-day tolerance band applied to a single-day span.
fn is_full_day_span(start: NaiveDateTime, end: NaiveDateTime) -> bool {
    end - start >= TimeDelta::hours(FULL_DAY_MIN_HOURS)
        && start.hour() <= FULL_DAY_MAX_START_HOUR
        && end.hour() >= FULL_DAY_MIN_END_HOUR
}

fn day_start(day: NaiveDate) -> NaiveDateTime {
    day.and_hms_opt(0, 0, 0).expect("valid time")
}

/// The exclusive end of a day: the following midnight.
fn day_end(day: NaiveDate) -> NaiveDateTime {
    day_start(day.succ_opt().expect("valid successor date"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventStatus;

    fn dt(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn item(start: NaiveDateTime, end: NaiveDateTime, status: EventStatus) -> ScheduleItem {
        ScheduleItem {
            person_email: "kim@example.com".into(),
            person_name: "Kim".into(),
            subject: Some("Conference".into()),
            status,
            start,
            end,
        }
    }

    mod single_day {
        use super::*;

        #[test]
        fn zero_duration_is_discarded() {
            let it = item(dt(3, 9, 0), dt(3, 9, 0), EventStatus::Busy);
            assert!(split_schedule_item(&it).is_empty());
        }

        #[test]
        fn inverted_item_is_discarded() {
            let it = item(dt(3, 10, 0), dt(3, 9, 0), EventStatus::Busy);
            assert!(split_schedule_item(&it).is_empty());
        }

        #[test]
        fn partial_day_keeps_original_bounds() {
            let it = item(dt(3, 9, 0), dt(3, 10, 30), EventStatus::Busy);
            let events = split_schedule_item(&it);

            assert_eq!(events.len(), 1);
            assert_eq!(events[0].start, dt(3, 9, 0));
            assert_eq!(events[0].end, dt(3, 10, 30));
            assert!(!events[0].is_full_day);
            assert_eq!(events[0].subject, "Conference");
        }

        #[test]
        fn full_day_snaps_to_midnight_bounds() {
            // 00:30 to 23:45 is inside the tolerance band.
            let it = item(dt(3, 0, 30), dt(3, 23, 45), EventStatus::OutOfOffice);
            let events = split_schedule_item(&it);

            assert_eq!(events.len(), 1);
            assert!(events[0].is_full_day);
            assert_eq!(events[0].start, dt(3, 0, 0));
            assert_eq!(events[0].end, dt(4, 0, 0));
        }

        #[test]
        fn span_ending_before_the_band_is_not_full_day() {
            // Starts at midnight but ends 22:59: misses both the 23-hour
            // minimum and the 23:xx end hour.
            let it = item(dt(3, 0, 0), dt(3, 22, 59), EventStatus::Busy);
            let events = split_schedule_item(&it);
            assert!(!events[0].is_full_day);
        }

        #[test]
        fn tolerance_band_accepts_near_midnight_bounds() {
            // 01:xx start and 23:xx end still classify as full-day.
            let it = item(dt(3, 1, 0), dt(4, 0, 0), EventStatus::Busy);
            let events = split_schedule_item(&it);
            // Ends exactly at midnight, so this is a two-day span whose
            // second slice is empty; the first covers 23 hours from 01:00.
            assert_eq!(events.len(), 1);
            assert!(events[0].is_full_day);
            assert_eq!(events[0].start, dt(3, 0, 0));
            assert_eq!(events[0].end, dt(4, 0, 0));
        }

        #[test]
        fn missing_subject_falls_back_by_status() {
            let mut it = item(dt(3, 9, 0), dt(3, 10, 0), EventStatus::OutOfOffice);
            it.subject = None;
            let events = split_schedule_item(&it);
            assert_eq!(events[0].subject, "Out of Office");
        }
    }

    mod multi_day {
        use super::*;

        #[test]
        fn evening_to_early_morning_yields_three_slices() {
            // Day 3 22:00 through day 5 02:00.
            let it = item(dt(3, 22, 0), dt(5, 2, 0), EventStatus::OutOfOffice);
            let events = split_schedule_item(&it);

            assert_eq!(events.len(), 3);

            assert_eq!(events[0].start, dt(3, 22, 0));
            assert_eq!(events[0].end, dt(4, 0, 0));
            assert!(!events[0].is_full_day);

            assert_eq!(events[1].start, dt(4, 0, 0));
            assert_eq!(events[1].end, dt(5, 0, 0));
            assert!(events[1].is_full_day);

            assert_eq!(events[2].start, dt(5, 0, 0));
            assert_eq!(events[2].end, dt(5, 2, 0));
            assert!(!events[2].is_full_day);
        }

        #[test]
        fn early_start_makes_first_slice_full_day() {
            // Starts 01:00 on day 3, runs into day 4 afternoon.
            let it = item(dt(3, 1, 0), dt(4, 15, 0), EventStatus::OutOfOffice);
            let events = split_schedule_item(&it);

            assert_eq!(events.len(), 2);
            assert!(events[0].is_full_day);
            assert_eq!(events[0].start, dt(3, 0, 0));
            assert_eq!(events[0].end, dt(4, 0, 0));
            assert!(!events[1].is_full_day);
            assert_eq!(events[1].end, dt(4, 15, 0));
        }

        #[test]
        fn midnight_exact_end_contributes_no_last_slice() {
            // Ends exactly at day 5 midnight: day 5 gets nothing.
            let it = item(dt(3, 10, 0), dt(5, 0, 0), EventStatus::Busy);
            let events = split_schedule_item(&it);

            assert_eq!(events.len(), 2);
            assert_eq!(events[0].start, dt(3, 10, 0));
            assert_eq!(events[0].end, dt(4, 0, 0));
            assert!(!events[0].is_full_day);
            assert!(events[1].is_full_day);
            assert_eq!(events[1].end, dt(5, 0, 0));
        }

        #[test]
        fn slice_ids_never_collide() {
            let it = item(dt(3, 1, 0), dt(6, 23, 30), EventStatus::OutOfOffice);
            let events = split_schedule_item(&it);

            let mut ids: Vec<_> = events.iter().map(|e| e.id.clone()).collect();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), events.len());
        }

        #[test]
        fn slices_are_independently_fingerprinted() {
            let it = item(dt(3, 22, 0), dt(5, 2, 0), EventStatus::OutOfOffice);
            let events = split_schedule_item(&it);

            for event in &events {
                assert!(event.id.starts_with(&format!(
                    "{}|{}",
                    event.start.format("%Y-%m-%dT%H:%M:%S"),
                    event.end.format("%Y-%m-%dT%H:%M:%S")
                )));
            }
        }
    }
}
