//! Re-merging overlapping out-of-office events after splitting.
//!
//! A person who is away Monday–Wednesday on one calendar entry and
//! Wednesday–Friday on another is away Monday–Friday; once the splitter and
//! the fetch have produced per-day slices, overlapping out-of-office events
//! for the same person are folded back into one. Busy events never merge —
//! two meetings are still two meetings.

use crate::event::{Event, EventStatus};

/// Separator used when concatenating merged subjects.
const SUBJECT_SEPARATOR: &str = ", ";

/// Folds overlapping same-person out-of-office events into single events.
///
/// Events are processed in input order. Each out-of-office event either
/// merges into the first already-accumulated out-of-office event of the same
/// person whose interval overlaps it inclusively (boundary touch counts), or
/// is appended as-is. Busy events pass through untouched.
///
/// Merging widens the surviving event to the union of both spans, appends
/// the incoming subject with exact duplicates removed (order-preserving,
/// first occurrence kept), and recomputes the fingerprint id.
///
/// This is a linear scan per event — quadratic in the worst case, which is
/// fine at team-sized event volumes and much easier to follow than an
/// index-based merge. Running the output through again is a no-op: merged
/// same-person events are disjoint and non-touching.
pub fn normalize_events(events: Vec<Event>) -> Vec<Event> {
    let mut merged: Vec<Event> = Vec::with_capacity(events.len());

    for event in events {
        if event.status != EventStatus::OutOfOffice {
            merged.push(event);
            continue;
        }

        let overlapping = merged.iter().position(|existing| {
            existing.status == EventStatus::OutOfOffice
                && existing.person_email == event.person_email
                && existing.start <= event.end
                && existing.end >= event.start
        });

        match overlapping {
            Some(index) => absorb(&mut merged[index], &event),
            None => merged.push(event),
        }
    }

    merged
}

/// Widens `existing` to cover `incoming` and folds in its subject.
fn absorb(existing: &mut Event, incoming: &Event) {
    existing.start = existing.start.min(incoming.start);
    existing.end = existing.end.max(incoming.end);

    let mut subjects: Vec<&str> = existing.subject.split(SUBJECT_SEPARATOR).collect();
    for part in incoming.subject.split(SUBJECT_SEPARATOR) {
        if !subjects.contains(&part) {
            subjects.push(part);
        }
    }
    existing.subject = subjects.join(SUBJECT_SEPARATOR);

    existing.refresh_id();
}
