//! Event types for the merged availability view.
//!
//! This module provides:
//! - [`EventStatus`]: the two calendar statuses that block availability
//! - [`ScheduleItem`]: one localized source calendar item, the splitter's input
//! - [`Event`]: a per-day event slice with a deterministic fingerprint id

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::interval::Interval;

/// The calendar status of a blocking event.
///
/// The directory service reports more statuses (`free`, `tentative`,
/// `workingElsewhere`); only these two reach the core — everything else is
/// ignored at the fetch boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventStatus {
    /// A scheduled commitment; the person is around but booked.
    #[serde(rename = "busy")]
    Busy,
    /// The person is away for an extended reason.
    #[serde(rename = "oof")]
    OutOfOffice,
}

impl EventStatus {
    /// The wire/persistence spelling of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Busy => "busy",
            Self::OutOfOffice => "oof",
        }
    }

    /// The default subject for an event that arrived without one.
    pub fn default_subject(&self) -> &'static str {
        match self {
            Self::Busy => "Busy",
            Self::OutOfOffice => "Out of Office",
        }
    }
}

/// One source calendar item, already localized to the display time zone.
///
/// This is what the splitter consumes: the fetch layer has resolved the
/// person, mapped the wire status, and converted both timestamps to
/// display-zone wall time. It may still span several calendar days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleItem {
    /// Address of the person this item belongs to.
    pub person_email: String,
    /// Resolved display name for the person.
    pub person_name: String,
    /// The item subject; `None` falls back to a status-derived subject.
    pub subject: Option<String>,
    /// Blocking status of the item.
    pub status: EventStatus,
    /// Localized start.
    pub start: NaiveDateTime,
    /// Localized end.
    pub end: NaiveDateTime,
}

impl ScheduleItem {
    /// Returns the effective subject, falling back by status.
    pub fn effective_subject(&self) -> &str {
        self.subject
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| self.status.default_subject())
    }
}

/// A single per-day event slice in the stored event list.
///
/// Events are produced by the splitter and are immutable afterwards, except
/// for the normalizer's out-of-office merge which widens the bounds, extends
/// the subject, and recomputes the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Deterministic fingerprint of `(start, end, subject, status, person)`;
    /// the de-duplication key.
    pub id: String,
    /// The event subject (possibly a merged, comma-joined list).
    pub subject: String,
    /// Localized start of this slice.
    pub start: NaiveDateTime,
    /// Localized end of this slice (exclusive).
    pub end: NaiveDateTime,
    /// Address of the person this event belongs to.
    pub person_email: String,
    /// Display name for the person.
    pub person_name: String,
    /// Blocking status.
    pub status: EventStatus,
    /// Whether this slice effectively covers its whole calendar day.
    pub is_full_day: bool,
}

impl Event {
    /// Creates an event, deriving its id from the identifying fields.
    pub fn new(
        subject: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
        person_email: impl Into<String>,
        person_name: impl Into<String>,
        status: EventStatus,
        is_full_day: bool,
    ) -> Self {
        let subject = subject.into();
        let person_email = person_email.into();
        let id = fingerprint(start, end, &subject, status, &person_email);
        Self {
            id,
            subject,
            start,
            end,
            person_email,
            person_name: person_name.into(),
            status,
            is_full_day,
        }
    }

    /// The `[start, end)` span of this event.
    pub fn interval(&self) -> Interval {
        Interval::new(self.start, self.end)
    }

    /// Recomputes the fingerprint id from the current fields.
    ///
    /// Called after a merge mutates the identifying fields.
    pub fn refresh_id(&mut self) {
        self.id = fingerprint(
            self.start,
            self.end,
            &self.subject,
            self.status,
            &self.person_email,
        );
    }
}

/// Deterministic event identity: the identifying fields joined with `|`.
///
/// A plain concatenation, not a hash — identical inputs always produce the
/// same id, and the field order is part of the persisted-data contract.
pub fn fingerprint(
    start: NaiveDateTime,
    end: NaiveDateTime,
    subject: &str,
    status: EventStatus,
    person_email: &str,
) -> String {
    format!(
        "{}|{}|{}|{}|{}",
        start.format("%Y-%m-%dT%H:%M:%S"),
        end.format("%Y-%m-%dT%H:%M:%S"),
        subject,
        status.as_str(),
        person_email
    )
}
