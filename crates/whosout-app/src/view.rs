//! Building the per-day display lists.
//!
//! A rendered range is a list of weekday views. Each day pulls the visible
//! people's events for that date, derives availability from all of them
//! (hidden statuses still block time), and hands lunch + availability +
//! visible events to the core sorter.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use whosout_core::{DisplayItem, Event, available_intervals, sort_day};

use crate::state::AppState;

/// The display languages the view supports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    /// English (United States).
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    /// Dutch (Netherlands).
    #[serde(rename = "nl-NL")]
    NlNl,
}

/// The label strings for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    pub available: &'static str,
    pub lunch: &'static str,
    pub all_day: &'static str,
    pub out_of_office: &'static str,
    pub busy: &'static str,
    pub load_previous_week: &'static str,
    /// Suffix for whole hours in duration strings.
    pub hour_suffix: &'static str,
}

const EN_US: Labels = Labels {
    available: "Available",
    lunch: "Lunch",
    all_day: "All day",
    out_of_office: "Out of Office",
    busy: "Busy",
    load_previous_week: "Load previous week",
    hour_suffix: "h",
};

const NL_NL: Labels = Labels {
    available: "Beschikbaar",
    lunch: "Lunch",
    all_day: "Hele dag",
    out_of_office: "Out of Office",
    busy: "Bezet",
    load_previous_week: "Vorige week laden",
    hour_suffix: "u",
};

impl Language {
    /// Returns the label table for this language.
    pub fn labels(&self) -> &'static Labels {
        match self {
            Self::EnUs => &EN_US,
            Self::NlNl => &NL_NL,
        }
    }
}

/// Renders a duration in minutes for display.
///
/// Anything spanning a full day or more renders as the all-day label.
pub fn format_duration(total_minutes: i64, language: Language) -> String {
    let labels = language.labels();
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours >= 24 {
        return labels.all_day.to_string();
    }
    if hours == 0 {
        return format!("{minutes}m");
    }
    if minutes == 0 {
        return format!("{hours}{}", labels.hour_suffix);
    }
    format!("{hours}{} {minutes}m", labels.hour_suffix)
}

/// One rendered day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayView {
    /// The calendar day.
    pub date: NaiveDate,
    /// The ordered display list: lunch, availability, visible events.
    pub items: Vec<DisplayItem>,
    /// Whether any visible event landed on this day.
    pub has_events: bool,
}

/// Builds the ordered display list for every weekday in `[from, to]`.
///
/// Weekends are skipped entirely. Events of hidden people are ignored;
/// events with a hidden status still feed the availability calculation but
/// stay out of the display list.
pub fn day_views(state: &AppState, from: NaiveDate, to: NaiveDate) -> Vec<DayView> {
    let mut views = Vec::new();
    let mut day = from;

    while day <= to {
        if !is_weekend(day) {
            views.push(day_view(state, day));
        }
        let Some(next) = day.succ_opt() else { break };
        day = next;
    }

    views
}

/// Builds the display list for a single day.
pub fn day_view(state: &AppState, date: NaiveDate) -> DayView {
    // Everything that blocks time on this day, hidden statuses included.
    let day_events: Vec<Event> = state
        .events
        .iter()
        .filter(|e| state.is_visible(&e.person_email) && e.start.date() == date)
        .cloned()
        .collect();

    let visible_events: Vec<Event> = day_events
        .iter()
        .filter(|e| !state.is_hidden(e.status))
        .cloned()
        .collect();

    let availability = available_intervals(
        date,
        &day_events,
        &state.team_settings,
        state.min_duration,
    );
    let lunch = state.team_settings.lunch_break.span_on(date);

    let has_events = !visible_events.is_empty();
    DayView {
        date,
        items: sort_day(lunch, &availability, &visible_events),
        has_events,
    }
}

fn is_weekend(day: NaiveDate) -> bool {
    matches!(day.weekday(), Weekday::Sat | Weekday::Sun)
}
