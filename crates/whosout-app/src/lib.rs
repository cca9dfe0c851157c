//! Application layer: state, persistence, profiles, fetch pipeline, day views

pub mod error;
pub mod pipeline;
pub mod profile;
pub mod state;
pub mod store;
pub mod view;

pub use error::AppError;
pub use pipeline::{FetchOutcome, InflightGuard, InflightPass, fetch_window};
pub use profile::{TeamProfile, export_json, export_profile, import_profile};
pub use state::AppState;
pub use store::{StateStore, default_state_path};
pub use view::{DayView, Labels, Language, day_view, day_views, format_duration};
