//! Directory-service seam: schedule wire types, localization, provider trait

pub mod error;
pub mod localize;
pub mod provider;
pub mod schedule;

pub use error::{DirectoryError, DirectoryErrorCode, DirectoryResult};
pub use localize::{localize, localize_item};
pub use provider::{
    BoxFuture, DirectoryProvider, FetchWindow, StaticDirectory, UnavailableDirectory,
    fallback_display_name,
};
pub use schedule::{FreeBusyStatus, PersonSchedule, RawScheduleItem, ScheduleTime};
