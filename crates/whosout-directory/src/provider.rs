//! DirectoryProvider trait definition.
//!
//! This module defines the [`DirectoryProvider`] trait, the seam between
//! the availability pipeline and whatever actually talks to the directory
//! service. Authentication flows and HTTP transport live behind this trait
//! and never leak into the core.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use chrono::NaiveDate;

use crate::error::{DirectoryError, DirectoryResult};
use crate::schedule::PersonSchedule;

/// The date window of a schedule fetch, inclusive on both ends.
///
/// Transports map the dates to zoned day bounds themselves; the pipeline
/// only reasons in calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchWindow {
    /// First day of the window.
    pub start: NaiveDate,
    /// Last day of the window.
    pub end: NaiveDate,
}

impl FetchWindow {
    /// Creates a fetch window.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Number of days covered, inclusive.
    pub fn day_count(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// A boxed future for async trait methods.
///
/// Boxed futures keep the trait object-safe, so the pipeline can hold a
/// `dyn DirectoryProvider` without caring which backend is wired in.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The abstraction over the directory/calendar service.
///
/// Implementations fetch free/busy schedules for a set of people and
/// resolve addresses to display names. Both operations are fallible as a
/// whole; per-person name resolution failures are expected and the caller
/// falls back to deriving a name from the address.
pub trait DirectoryProvider: Send + Sync {
    /// Returns the name of this provider (e.g. `"graph"`, `"static"`).
    fn name(&self) -> &str;

    /// Fetches free/busy schedules for the given people over the window.
    ///
    /// # Errors
    ///
    /// Returns a [`DirectoryError`] on transport, auth, or response-shape
    /// failures. A failure covers the whole window: the caller commits no
    /// partial event list.
    fn fetch_schedules(
        &self,
        emails: &[String],
        window: &FetchWindow,
    ) -> BoxFuture<'_, DirectoryResult<Vec<PersonSchedule>>>;

    /// Resolves an address to a display name.
    fn lookup_display_name(&self, email: &str) -> BoxFuture<'_, DirectoryResult<String>>;
}

/// Derives a display name from an address when the directory cannot.
///
/// The local part of the address is better than showing nothing, and much
/// better than failing the fetch.
pub fn fallback_display_name(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}

/// An in-memory directory for tests and offline use.
///
/// Holds canned schedules and display names; unknown addresses resolve to a
/// not-found error so callers exercise their fallback path.
#[derive(Debug, Default)]
pub struct StaticDirectory {
    schedules: HashMap<String, PersonSchedule>,
    display_names: HashMap<String, String>,
}

impl StaticDirectory {
    /// Creates an empty static directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a person's schedule.
    pub fn with_schedule(mut self, schedule: PersonSchedule) -> Self {
        self.schedules.insert(schedule.schedule_id.clone(), schedule);
        self
    }

    /// Adds a display name.
    pub fn with_display_name(
        mut self,
        email: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        self.display_names.insert(email.into(), name.into());
        self
    }
}

impl DirectoryProvider for StaticDirectory {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch_schedules(
        &self,
        emails: &[String],
        _window: &FetchWindow,
    ) -> BoxFuture<'_, DirectoryResult<Vec<PersonSchedule>>> {
        let schedules: Vec<PersonSchedule> = emails
            .iter()
            .map(|email| {
                self.schedules.get(email).cloned().unwrap_or(PersonSchedule {
                    schedule_id: email.clone(),
                    schedule_items: Vec::new(),
                })
            })
            .collect();
        Box::pin(async move { Ok(schedules) })
    }

    fn lookup_display_name(&self, email: &str) -> BoxFuture<'_, DirectoryResult<String>> {
        let result = self
            .display_names
            .get(email)
            .cloned()
            .ok_or_else(|| DirectoryError::not_found(format!("no directory entry for {email}")));
        Box::pin(async move { result })
    }
}

/// A provider that fails every call with a fixed error code.
///
/// Useful as a placeholder when a real provider fails to initialize, and in
/// tests for the nothing-committed-on-failure contract.
#[derive(Debug)]
pub struct UnavailableDirectory {
    reason: String,
}

impl UnavailableDirectory {
    /// Creates a provider that always fails with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl DirectoryProvider for UnavailableDirectory {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn fetch_schedules(
        &self,
        _emails: &[String],
        _window: &FetchWindow,
    ) -> BoxFuture<'_, DirectoryResult<Vec<PersonSchedule>>> {
        let error = DirectoryError::configuration(self.reason.clone()).with_service(self.name());
        Box::pin(async move { Err(error) })
    }

    fn lookup_display_name(&self, _email: &str) -> BoxFuture<'_, DirectoryResult<String>> {
        let error = DirectoryError::configuration(self.reason.clone()).with_service(self.name());
        Box::pin(async move { Err(error) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{FreeBusyStatus, RawScheduleItem, ScheduleTime};

    fn window() -> FetchWindow {
        FetchWindow::new(
            NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
        )
    }

    fn kim_schedule() -> PersonSchedule {
        PersonSchedule {
            schedule_id: "kim@example.com".into(),
            schedule_items: vec![RawScheduleItem {
                start: ScheduleTime::new("2025-03-03T08:00:00", "UTC"),
                end: ScheduleTime::new("2025-03-03T09:00:00", "UTC"),
                subject: Some("Standup".into()),
                status: FreeBusyStatus::Busy,
            }],
        }
    }

    #[test]
    fn window_day_count_is_inclusive() {
        assert_eq!(window().day_count(), 12);
    }

    #[test]
    fn fallback_name_is_the_local_part() {
        assert_eq!(fallback_display_name("kim@example.com"), "kim");
        assert_eq!(fallback_display_name("no-at-sign"), "no-at-sign");
    }

    #[tokio::test]
    async fn static_directory_returns_known_schedules() {
        let provider = StaticDirectory::new()
            .with_schedule(kim_schedule())
            .with_display_name("kim@example.com", "Kim Jansen");

        let schedules = provider
            .fetch_schedules(
                &["kim@example.com".into(), "lee@example.com".into()],
                &window(),
            )
            .await
            .unwrap();

        assert_eq!(schedules.len(), 2);
        assert_eq!(schedules[0].schedule_items.len(), 1);
        // Unknown people come back with empty schedules, not errors.
        assert!(schedules[1].schedule_items.is_empty());
    }

    #[tokio::test]
    async fn static_directory_resolves_names() {
        let provider = StaticDirectory::new().with_display_name("kim@example.com", "Kim Jansen");

        let name = provider.lookup_display_name("kim@example.com").await.unwrap();
        assert_eq!(name, "Kim Jansen");

        let missing = provider.lookup_display_name("lee@example.com").await;
        assert!(missing.is_err());
    }

    #[tokio::test]
    async fn unavailable_directory_fails_everything() {
        let provider = UnavailableDirectory::new("no credentials configured");
        assert!(provider
            .fetch_schedules(&["kim@example.com".into()], &window())
            .await
            .is_err());
        assert!(provider.lookup_display_name("kim@example.com").await.is_err());
    }
}
