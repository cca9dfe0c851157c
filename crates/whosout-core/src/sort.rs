//! Ordering a day's mixed display list.
//!
//! A rendered day shows three kinds of items: the lunch block, derived
//! availability blocks, and the visible busy/out-of-office events. They are
//! ordered so that lunch lands in its natural chronological position even
//! when an event straddles it: items that are "mainly before lunch" sort
//! ahead of everything else, and start time breaks ties within each group.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::interval::Interval;

/// One entry in a rendered day: lunch, a free block, or a visible event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DisplayItem {
    /// The team lunch window.
    Lunch {
        /// The lunch span on this day.
        interval: Interval,
    },
    /// A derived free block.
    Available {
        /// The free span.
        interval: Interval,
    },
    /// A visible busy or out-of-office event.
    Event(Event),
}

impl DisplayItem {
    /// Start of this item.
    pub fn start(&self) -> NaiveDateTime {
        match self {
            Self::Lunch { interval } | Self::Available { interval } => interval.start,
            Self::Event(event) => event.start,
        }
    }

    /// End of this item.
    pub fn end(&self) -> NaiveDateTime {
        match self {
            Self::Lunch { interval } | Self::Available { interval } => interval.end,
            Self::Event(event) => event.end,
        }
    }
}

/// Builds the ordered display list for one day.
///
/// `events` must already be visibility-filtered by the caller; availability
/// comes from the calculator. When the lunch window is unresolvable the
/// lunch item is omitted and the list falls back to a plain start-time sort.
pub fn sort_day(
    lunch: Option<Interval>,
    availability: &[Interval],
    events: &[Event],
) -> Vec<DisplayItem> {
    let mut items: Vec<DisplayItem> = events
        .iter()
        .cloned()
        .map(DisplayItem::Event)
        .collect();
    items.extend(
        availability
            .iter()
            .map(|iv| DisplayItem::Available { interval: *iv }),
    );
    if let Some(lunch) = lunch {
        items.push(DisplayItem::Lunch { interval: lunch });
    }

    match lunch {
        Some(lunch) => {
            // Stable sort: mainly-before-lunch items first, then by start.
            items.sort_by(|a, b| {
                let a_before = mainly_before_lunch(a, &lunch);
                let b_before = mainly_before_lunch(b, &lunch);
                b_before
                    .cmp(&a_before)
                    .then_with(|| a.start().cmp(&b.start()))
            });
        }
        None => items.sort_by_key(DisplayItem::start),
    }

    items
}

/// The majority-overlap heuristic anchoring items around the lunch window.
///
/// An item is mainly before lunch if it ends at or before lunch's end, or if
/// it starts before lunch's end and the portion hanging past lunch's end is
/// shorter than the stretch from the item's start to lunch's end.
fn mainly_before_lunch(item: &DisplayItem, lunch: &Interval) -> bool {
    item.end() <= lunch.end
        || (item.start() < lunch.end && item.end() - lunch.end < lunch.end - item.start())
}
