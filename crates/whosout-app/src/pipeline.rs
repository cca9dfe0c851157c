//! The fetch-and-normalize pass.
//!
//! One pass covers one date window: fetch everyone's schedules, resolve
//! display names, localize and split each item, then normalize the whole
//! batch. A pass either succeeds with a complete event list or fails as a
//! unit — no partial results are ever committed.
//!
//! Passes are serialized by [`InflightGuard`]: at most one in flight, a
//! second trigger while one is outstanding is a no-op, never queued. There
//! is no cancellation; an in-flight pass always runs to completion.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono_tz::Tz;
use tracing::{debug, warn};
use whosout_core::{Event, normalize_events, split_schedule_item};
use whosout_directory::{
    DirectoryProvider, DirectoryResult, FetchWindow, fallback_display_name, localize_item,
};

/// The result of a successful fetch pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
    /// The normalized events for the window, ready to store.
    pub events: Vec<Event>,
    /// Display names the directory resolved during this pass.
    ///
    /// Fallback-derived names are not included; only real directory answers
    /// are worth caching.
    pub resolved_names: BTreeMap<String, String>,
}

/// Fetches and normalizes one window of schedule data.
///
/// `name_cache` holds previously resolved display names; people missing
/// from it are looked up, and a failed lookup falls back to the local part
/// of the address without failing the pass.
///
/// # Errors
///
/// Returns the provider's error when the schedule fetch itself fails. The
/// caller commits nothing in that case; retrying is the user's move.
pub async fn fetch_window(
    provider: &dyn DirectoryProvider,
    emails: &[String],
    window: FetchWindow,
    display_zone: Tz,
    name_cache: &BTreeMap<String, String>,
) -> DirectoryResult<FetchOutcome> {
    let schedules = provider.fetch_schedules(emails, &window).await?;

    let mut resolved_names = BTreeMap::new();
    let mut events: Vec<Event> = Vec::new();

    for schedule in &schedules {
        let email = &schedule.schedule_id;
        let name = match name_cache.get(email) {
            Some(name) => name.clone(),
            None => match provider.lookup_display_name(email).await {
                Ok(name) => {
                    resolved_names.insert(email.clone(), name.clone());
                    name
                }
                Err(err) => {
                    warn!(person = %email, error = %err, "display name lookup failed, deriving from address");
                    fallback_display_name(email)
                }
            },
        };

        for raw in &schedule.schedule_items {
            if let Some(item) = localize_item(raw, display_zone, email, &name) {
                events.extend(split_schedule_item(&item));
            }
        }
    }

    let events = normalize_events(events);
    debug!(
        people = schedules.len(),
        events = events.len(),
        from = %window.start,
        to = %window.end,
        "fetch window normalized"
    );

    Ok(FetchOutcome {
        events,
        resolved_names,
    })
}

/// Serializes fetch passes: at most one in flight at a time.
///
/// Clones share the same flag, so every trigger site can hold its own
/// handle.
#[derive(Debug, Clone, Default)]
pub struct InflightGuard {
    busy: Arc<AtomicBool>,
}

impl InflightGuard {
    /// Creates an idle guard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tries to start a pass.
    ///
    /// Returns `None` while another pass is outstanding — the caller drops
    /// the trigger on the floor rather than queueing it.
    pub fn try_begin(&self) -> Option<InflightPass> {
        self.busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| InflightPass {
                busy: Arc::clone(&self.busy),
            })
    }

    /// Returns true while a pass is outstanding.
    pub fn is_inflight(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }
}

/// An in-flight pass; dropping it releases the guard.
#[derive(Debug)]
pub struct InflightPass {
    busy: Arc<AtomicBool>,
}

impl Drop for InflightPass {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::SeqCst);
    }
}
