//! Core types and interval algebra: events, settings, availability, sorting

pub mod availability;
pub mod event;
pub mod interval;
pub mod normalize;
pub mod settings;
pub mod sort;
pub mod split;
pub mod tracing;

pub use availability::available_intervals;
pub use event::{Event, EventStatus, ScheduleItem, fingerprint};
pub use interval::{Interval, merge_intervals};
pub use normalize::normalize_events;
pub use settings::{HoursRange, TeamSettings, parse_time_of_day};
pub use sort::{DisplayItem, sort_day};
pub use split::split_schedule_item;
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
