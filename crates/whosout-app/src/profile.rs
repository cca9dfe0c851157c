//! Exporting and importing the shareable team profile.
//!
//! A profile is a JSON document someone exports and a colleague drops into
//! their own instance. Import is additive — it merges into existing state —
//! and atomic: a document without a well-formed `emails` array is rejected
//! wholesale with a single error and nothing is applied.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use whosout_core::{EventStatus, TeamSettings};

use crate::error::AppError;
use crate::state::AppState;
use crate::view::Language;

/// The shareable settings document.
///
/// `emails` is the only required field; everything else is carried when
/// present and ignored when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamProfile {
    /// The tracked addresses.
    pub emails: Vec<String>,
    /// Which addresses were visible at export time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_emails: Option<Vec<String>>,
    /// The display-name cache.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_names: Option<BTreeMap<String, String>>,
    /// Tag assignments per address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_tags: Option<BTreeMap<String, Vec<String>>>,
    /// Hidden event statuses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden_event_types: Option<Vec<EventStatus>>,
    /// Office hours and lunch window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_settings: Option<TeamSettings>,
    /// Display language.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
}

/// Captures the current state as a full profile document.
pub fn export_profile(state: &AppState) -> TeamProfile {
    TeamProfile {
        emails: state.emails.clone(),
        visible_emails: Some(state.visible_emails.clone()),
        display_names: Some(state.display_names.clone()),
        employee_tags: Some(state.employee_tags.clone()),
        hidden_event_types: Some(state.hidden_event_types.clone()),
        team_settings: Some(state.team_settings.clone()),
        language: Some(state.language),
    }
}

/// Serializes the current state as a profile JSON document.
pub fn export_json(state: &AppState) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(&export_profile(state))?)
}

/// Parses and applies a profile document.
///
/// The document is parsed in full before anything is applied; a malformed
/// document (including a missing `emails` array) rejects the import with a
/// single error and leaves the state untouched. Application is additive:
/// emails join the roster, tags merge in, and team settings and language
/// replace the current values when present.
///
/// # Errors
///
/// Returns [`AppError::InvalidProfile`] on any parse failure.
pub fn import_profile(state: &mut AppState, json: &str) -> Result<(), AppError> {
    let profile: TeamProfile = serde_json::from_str(json)
        .map_err(|e| AppError::InvalidProfile(e.to_string()))?;

    for email in &profile.emails {
        state.add_email(email);
    }
    if let Some(tags) = &profile.employee_tags {
        for (email, email_tags) in tags {
            for tag in email_tags {
                state.add_tag(email, tag);
            }
        }
    }
    if let Some(settings) = profile.team_settings {
        state.set_team_settings(settings);
    }
    if let Some(language) = profile.language {
        state.set_language(language);
    }

    debug!(emails = profile.emails.len(), "profile imported");
    Ok(())
}
