//! Wire types for free/busy schedule responses.
//!
//! The directory service reports, per requested person, a list of schedule
//! items with zoned timestamps and a free/busy status. Only `busy` and `oof`
//! items carry into the core; everything else is dropped at this boundary.

use serde::{Deserialize, Serialize};
use whosout_core::EventStatus;

/// A free/busy status as the directory service reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FreeBusyStatus {
    /// The slot is free.
    Free,
    /// Tentatively accepted; not treated as blocking.
    Tentative,
    /// A scheduled commitment.
    Busy,
    /// Out of office.
    Oof,
    /// Working from another location; not treated as blocking.
    WorkingElsewhere,
}

impl FreeBusyStatus {
    /// Maps this wire status to a blocking core status, or `None` for
    /// statuses that do not affect availability.
    pub fn blocking_status(&self) -> Option<EventStatus> {
        match self {
            Self::Busy => Some(EventStatus::Busy),
            Self::Oof => Some(EventStatus::OutOfOffice),
            Self::Free | Self::Tentative | Self::WorkingElsewhere => None,
        }
    }
}

/// A zoned timestamp as transmitted on the wire.
///
/// `date_time` is a zone-less `yyyy-MM-ddTHH:mm:ss[.fffffff]` string;
/// `time_zone` names the zone it should be interpreted in (an IANA
/// identifier or `UTC`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleTime {
    /// The local timestamp string.
    pub date_time: String,
    /// The zone the timestamp is expressed in.
    pub time_zone: String,
}

impl ScheduleTime {
    /// Creates a schedule time from its parts.
    pub fn new(date_time: impl Into<String>, time_zone: impl Into<String>) -> Self {
        Self {
            date_time: date_time.into(),
            time_zone: time_zone.into(),
        }
    }
}

/// One schedule item for one person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawScheduleItem {
    /// When the item starts.
    pub start: ScheduleTime,
    /// When the item ends.
    pub end: ScheduleTime,
    /// The item subject, if the service exposes one.
    #[serde(default)]
    pub subject: Option<String>,
    /// The free/busy status of the item.
    pub status: FreeBusyStatus,
}

/// The schedule of one requested person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonSchedule {
    /// The address the schedule was requested for.
    pub schedule_id: String,
    /// The person's schedule items within the requested window.
    #[serde(default)]
    pub schedule_items: Vec<RawScheduleItem>,
}
