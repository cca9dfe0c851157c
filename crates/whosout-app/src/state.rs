//! The application state struct.
//!
//! Everything the UI layer needs lives in one owned [`AppState`] value:
//! the team roster, visibility and tag filters, the display-name cache, the
//! stored event list, and the team settings. Core functions receive data
//! from it and return data; nothing reaches into ambient globals.
//!
//! The struct doubles as the persisted document (see `store`), so its serde
//! field names follow the shape the original deployment wrote.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use whosout_core::{Event, EventStatus, TeamSettings};

use crate::view::Language;

/// Default minimum duration, in minutes, for a gap to count as available.
const DEFAULT_MIN_DURATION: i64 = 30;

/// The whole application state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppState {
    /// Every tracked address.
    pub emails: Vec<String>,
    /// Addresses currently shown in the view.
    pub visible_emails: Vec<String>,
    /// Tags assigned per address.
    pub employee_tags: BTreeMap<String, Vec<String>>,
    /// Tags currently selected as a filter.
    pub selected_tags: Vec<String>,
    /// Cache of resolved display names.
    pub display_names: BTreeMap<String, String>,
    /// The stored, normalized event list.
    pub events: Vec<Event>,
    /// Office hours and lunch window.
    pub team_settings: TeamSettings,
    /// Event statuses hidden from display (they still affect availability).
    pub hidden_event_types: Vec<EventStatus>,
    /// Minimum duration in minutes for an availability gap to be shown.
    pub min_duration: i64,
    /// Display language.
    pub language: Language,
    /// First day of the loaded range.
    pub start_date: NaiveDate,
    /// Last day of the loaded range.
    pub end_date: NaiveDate,
}

impl Default for AppState {
    fn default() -> Self {
        let today = Local::now().date_naive();
        Self {
            emails: Vec::new(),
            visible_emails: Vec::new(),
            employee_tags: BTreeMap::new(),
            selected_tags: Vec::new(),
            display_names: BTreeMap::new(),
            events: Vec::new(),
            team_settings: TeamSettings::default(),
            hidden_event_types: vec![EventStatus::Busy],
            min_duration: DEFAULT_MIN_DURATION,
            language: Language::default(),
            start_date: today,
            end_date: today,
        }
    }
}

impl AppState {
    /// Fixes up state loaded from disk: the view always reopens on today,
    /// and a state written before visibility existed shows everyone.
    pub fn rehydrate(&mut self, today: NaiveDate) {
        self.start_date = today;
        if self.end_date < today {
            self.end_date = today;
        }
        if self.visible_emails.is_empty() && !self.emails.is_empty() {
            self.visible_emails = self.emails.clone();
        }
    }

    // --- roster ---------------------------------------------------------

    /// Adds an address to the roster; it becomes visible immediately.
    pub fn add_email(&mut self, email: &str) {
        if !self.emails.iter().any(|e| e == email) {
            self.emails.push(email.to_string());
        }
        if !self.visible_emails.iter().any(|e| e == email) {
            self.visible_emails.push(email.to_string());
        }
        self.employee_tags.entry(email.to_string()).or_default();
    }

    /// Removes an address and everything attached to it.
    pub fn remove_email(&mut self, email: &str) {
        self.emails.retain(|e| e != email);
        self.visible_emails.retain(|e| e != email);
        self.employee_tags.remove(email);
        self.display_names.remove(email);
    }

    /// Replaces the roster wholesale.
    pub fn set_emails(&mut self, emails: Vec<String>) {
        self.emails = emails;
    }

    /// Shows or hides one person.
    pub fn toggle_email_visibility(&mut self, email: &str) {
        if self.visible_emails.iter().any(|e| e == email) {
            self.visible_emails.retain(|e| e != email);
        } else {
            self.visible_emails.push(email.to_string());
        }
    }

    /// Returns true if the person is currently shown.
    pub fn is_visible(&self, email: &str) -> bool {
        self.visible_emails.iter().any(|e| e == email)
    }

    // --- tags -----------------------------------------------------------

    /// Assigns a tag to a person.
    pub fn add_tag(&mut self, email: &str, tag: &str) {
        let tags = self.employee_tags.entry(email.to_string()).or_default();
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }

    /// Removes a tag from a person.
    pub fn remove_tag(&mut self, email: &str, tag: &str) {
        if let Some(tags) = self.employee_tags.get_mut(email) {
            tags.retain(|t| t != tag);
        }
    }

    /// Toggles a tag filter and recomputes who is visible.
    ///
    /// With no tags selected everyone is visible; otherwise only people
    /// carrying at least one selected tag are.
    pub fn toggle_tag_selection(&mut self, tag: &str) {
        if self.selected_tags.iter().any(|t| t == tag) {
            self.selected_tags.retain(|t| t != tag);
        } else {
            self.selected_tags.push(tag.to_string());
        }

        self.visible_emails = if self.selected_tags.is_empty() {
            self.emails.clone()
        } else {
            self.emails
                .iter()
                .filter(|email| {
                    self.employee_tags
                        .get(*email)
                        .is_some_and(|tags| tags.iter().any(|t| self.selected_tags.contains(t)))
                })
                .cloned()
                .collect()
        };
    }

    /// Every tag in use, sorted and de-duplicated.
    pub fn all_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self
            .employee_tags
            .values()
            .flat_map(|tags| tags.iter().cloned())
            .collect();
        tags.sort();
        tags.dedup();
        tags
    }

    // --- display names --------------------------------------------------

    /// Caches a resolved display name.
    pub fn set_display_name(&mut self, email: &str, name: &str) {
        self.display_names
            .insert(email.to_string(), name.to_string());
    }

    // --- events ---------------------------------------------------------

    /// Replaces the stored event list.
    pub fn set_events(&mut self, events: Vec<Event>) {
        self.events = events;
    }

    /// Adds events fetched for an earlier window.
    ///
    /// Duplicates (same id and person) keep their first occurrence; the
    /// list stays sorted by start date.
    pub fn prepend_events(&mut self, new_events: Vec<Event>) {
        let existing = std::mem::take(&mut self.events);
        self.events = merged_event_list(new_events, existing);
    }

    /// Adds events fetched for a later window.
    pub fn append_events(&mut self, new_events: Vec<Event>) {
        let existing = std::mem::take(&mut self.events);
        self.events = merged_event_list(existing, new_events);
    }

    // --- settings -------------------------------------------------------

    /// Replaces the team settings.
    pub fn set_team_settings(&mut self, settings: TeamSettings) {
        self.team_settings = settings;
    }

    /// Sets the availability minimum duration, in minutes.
    pub fn set_min_duration(&mut self, minutes: i64) {
        self.min_duration = minutes;
    }

    /// Shows or hides one event status in the display list.
    pub fn toggle_event_type_visibility(&mut self, status: EventStatus) {
        if self.hidden_event_types.contains(&status) {
            self.hidden_event_types.retain(|s| *s != status);
        } else {
            self.hidden_event_types.push(status);
        }
    }

    /// Returns true if the status is hidden from display.
    pub fn is_hidden(&self, status: EventStatus) -> bool {
        self.hidden_event_types.contains(&status)
    }

    /// Sets the display language.
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Sets the loaded date range.
    pub fn set_date_range(&mut self, start: NaiveDate, end: NaiveDate) {
        self.start_date = start;
        self.end_date = end;
    }
}

/// Concatenates two event lists, dropping later duplicates and sorting by
/// start date (stable, so same-day order is preserved).
fn merged_event_list(first: Vec<Event>, second: Vec<Event>) -> Vec<Event> {
    let mut merged: Vec<Event> = Vec::with_capacity(first.len() + second.len());
    for event in first.into_iter().chain(second) {
        let duplicate = merged
            .iter()
            .any(|e| e.id == event.id && e.person_email == event.person_email);
        if !duplicate {
            merged.push(event);
        }
    }
    merged.sort_by_key(|e| e.start.date());
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn dt(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn event(subject: &str, d: u32, h1: u32, h2: u32, email: &str) -> Event {
        Event::new(
            subject,
            dt(d, h1),
            dt(d, h2),
            email,
            email.split('@').next().unwrap(),
            EventStatus::Busy,
            false,
        )
    }

    #[test]
    fn defaults_match_the_deployed_configuration() {
        let state = AppState::default();
        assert_eq!(state.min_duration, 30);
        assert_eq!(state.hidden_event_types, vec![EventStatus::Busy]);
        assert_eq!(state.language, Language::EnUs);
        assert!(state.emails.is_empty());
    }

    mod roster {
        use super::*;

        #[test]
        fn add_email_is_idempotent_and_visible() {
            let mut state = AppState::default();
            state.add_email("kim@example.com");
            state.add_email("kim@example.com");

            assert_eq!(state.emails, vec!["kim@example.com"]);
            assert_eq!(state.visible_emails, vec!["kim@example.com"]);
            assert!(state.employee_tags.contains_key("kim@example.com"));
        }

        #[test]
        fn add_email_keeps_existing_tags() {
            let mut state = AppState::default();
            state.add_email("kim@example.com");
            state.add_tag("kim@example.com", "backend");
            state.add_email("kim@example.com");

            assert_eq!(
                state.employee_tags["kim@example.com"],
                vec!["backend".to_string()]
            );
        }

        #[test]
        fn remove_email_scrubs_everything() {
            let mut state = AppState::default();
            state.add_email("kim@example.com");
            state.add_tag("kim@example.com", "backend");
            state.set_display_name("kim@example.com", "Kim Jansen");

            state.remove_email("kim@example.com");

            assert!(state.emails.is_empty());
            assert!(state.visible_emails.is_empty());
            assert!(state.employee_tags.is_empty());
            assert!(state.display_names.is_empty());
        }

        #[test]
        fn visibility_toggles() {
            let mut state = AppState::default();
            state.add_email("kim@example.com");

            state.toggle_email_visibility("kim@example.com");
            assert!(!state.is_visible("kim@example.com"));

            state.toggle_email_visibility("kim@example.com");
            assert!(state.is_visible("kim@example.com"));
        }
    }

    mod tags {
        use super::*;

        fn team() -> AppState {
            let mut state = AppState::default();
            state.add_email("kim@example.com");
            state.add_email("lee@example.com");
            state.add_email("ana@example.com");
            state.add_tag("kim@example.com", "backend");
            state.add_tag("lee@example.com", "frontend");
            state.add_tag("ana@example.com", "backend");
            state
        }

        #[test]
        fn selecting_a_tag_filters_visibility() {
            let mut state = team();
            state.toggle_tag_selection("backend");

            assert_eq!(
                state.visible_emails,
                vec!["kim@example.com", "ana@example.com"]
            );
        }

        #[test]
        fn deselecting_the_last_tag_shows_everyone() {
            let mut state = team();
            state.toggle_tag_selection("backend");
            state.toggle_tag_selection("backend");

            assert_eq!(state.visible_emails.len(), 3);
        }

        #[test]
        fn multiple_selected_tags_union() {
            let mut state = team();
            state.toggle_tag_selection("backend");
            state.toggle_tag_selection("frontend");

            assert_eq!(state.visible_emails.len(), 3);
        }

        #[test]
        fn all_tags_is_sorted_and_unique() {
            let state = team();
            assert_eq!(state.all_tags(), vec!["backend", "frontend"]);
        }
    }

    mod events {
        use super::*;

        #[test]
        fn append_dedupes_by_id_and_person() {
            let mut state = AppState::default();
            let a = event("Standup", 3, 9, 10, "kim@example.com");

            state.set_events(vec![a.clone()]);
            state.append_events(vec![a.clone(), event("Review", 3, 14, 15, "kim@example.com")]);

            assert_eq!(state.events.len(), 2);
        }

        #[test]
        fn same_id_different_person_is_kept() {
            // Identical meetings for two people have distinct fingerprints
            // already, but the dedup key is (id, person) regardless.
            let mut state = AppState::default();
            let a = event("Standup", 3, 9, 10, "kim@example.com");
            let b = event("Standup", 3, 9, 10, "lee@example.com");

            state.append_events(vec![a, b]);
            assert_eq!(state.events.len(), 2);
        }

        #[test]
        fn prepend_sorts_by_start_date() {
            let mut state = AppState::default();
            state.set_events(vec![event("Later", 10, 9, 10, "kim@example.com")]);
            state.prepend_events(vec![event("Earlier", 4, 9, 10, "kim@example.com")]);

            assert_eq!(state.events[0].subject, "Earlier");
            assert_eq!(state.events[1].subject, "Later");
        }

        #[test]
        fn first_occurrence_wins() {
            let mut state = AppState::default();
            let mut stale = event("Standup", 3, 9, 10, "kim@example.com");
            stale.person_name = "Old Name".into();
            let fresh = {
                let mut e = stale.clone();
                e.person_name = "New Name".into();
                e
            };

            state.set_events(vec![fresh]);
            state.append_events(vec![stale]);

            assert_eq!(state.events.len(), 1);
            assert_eq!(state.events[0].person_name, "New Name");
        }
    }

    mod settings {
        use super::*;

        #[test]
        fn event_type_visibility_toggles() {
            let mut state = AppState::default();
            assert!(state.is_hidden(EventStatus::Busy));

            state.toggle_event_type_visibility(EventStatus::Busy);
            assert!(!state.is_hidden(EventStatus::Busy));

            state.toggle_event_type_visibility(EventStatus::OutOfOffice);
            assert!(state.is_hidden(EventStatus::OutOfOffice));
        }
    }

    mod persistence_shape {
        use super::*;

        #[test]
        fn serde_uses_the_persisted_field_names() {
            let state = AppState::default();
            let json = serde_json::to_string(&state).unwrap();

            for field in [
                "\"emails\"",
                "\"visibleEmails\"",
                "\"employeeTags\"",
                "\"displayNames\"",
                "\"teamSettings\"",
                "\"hiddenEventTypes\"",
                "\"minDuration\"",
                "\"language\"",
            ] {
                assert!(json.contains(field), "missing {field} in {json}");
            }
        }

        #[test]
        fn missing_fields_fill_with_defaults() {
            let state: AppState =
                serde_json::from_str(r#"{"emails": ["kim@example.com"]}"#).unwrap();
            assert_eq!(state.emails, vec!["kim@example.com"]);
            assert_eq!(state.min_duration, 30);
        }

        #[test]
        fn rehydrate_resets_the_view_window() {
            let mut state: AppState =
                serde_json::from_str(r#"{"emails": ["kim@example.com"]}"#).unwrap();
            let today = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();

            state.rehydrate(today);

            assert_eq!(state.start_date, today);
            assert!(state.end_date >= today);
            assert_eq!(state.visible_emails, vec!["kim@example.com"]);
        }
    }
}
