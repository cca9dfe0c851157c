//! JSON persistence of the application state.
//!
//! The whole [`AppState`] persists as one JSON document, loaded at startup
//! and written back by the caller on every mutation. A missing file means a
//! fresh start; a corrupt file is an error the caller surfaces rather than
//! silently discarding someone's roster.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Loads and saves the persisted application state.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// Creates a store over the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store over the default path.
    pub fn at_default_path() -> Self {
        Self::new(default_state_path())
    }

    /// The file this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the state, rehydrating it against `today`.
    ///
    /// A missing file yields the default state.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self, today: NaiveDate) -> Result<AppState, AppError> {
        let mut state = if self.path.exists() {
            let content = fs::read_to_string(&self.path)?;
            serde_json::from_str(&content)?
        } else {
            debug!(path = %self.path.display(), "no state file, starting fresh");
            AppState::default()
        };
        state.rehydrate(today);
        Ok(state)
    }

    /// Writes the state, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn save(&self, state: &AppState) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, content)?;
        debug!(path = %self.path.display(), "state saved");
        Ok(())
    }
}

/// The default state file location: `<config_dir>/whosout/state.json`.
pub fn default_state_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("whosout")
        .join("state.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path().join("state.json"));

        let state = store.load(today()).unwrap();
        assert!(state.emails.is_empty());
        assert_eq!(state.start_date, today());
    }

    #[test]
    fn save_then_load_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path().join("nested").join("state.json"));

        let mut state = AppState::default();
        state.add_email("kim@example.com");
        state.add_tag("kim@example.com", "backend");
        state.set_display_name("kim@example.com", "Kim Jansen");
        state.set_min_duration(15);
        store.save(&state).unwrap();

        let loaded = store.load(today()).unwrap();
        assert_eq!(loaded.emails, state.emails);
        assert_eq!(loaded.employee_tags, state.employee_tags);
        assert_eq!(loaded.display_names, state.display_names);
        assert_eq!(loaded.min_duration, 15);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{ not json").unwrap();

        let store = StateStore::new(path);
        assert!(matches!(
            store.load(today()),
            Err(AppError::MalformedState(_))
        ));
    }

    #[test]
    fn default_path_is_under_whosout() {
        let path = default_state_path();
        assert!(path.to_string_lossy().contains("whosout"));
        assert!(path.to_string_lossy().ends_with("state.json"));
    }
}
