//! Application-level error type.

use thiserror::Error;

/// Errors from state persistence and profile import.
#[derive(Debug, Error)]
pub enum AppError {
    /// Reading or writing the state file failed.
    #[error("failed to access state file: {0}")]
    Io(#[from] std::io::Error),

    /// The state file exists but could not be parsed.
    #[error("malformed state file: {0}")]
    MalformedState(#[from] serde_json::Error),

    /// An imported profile document was rejected.
    ///
    /// Import is atomic: a rejected document changes nothing.
    #[error("invalid profile: {0}")]
    InvalidProfile(String),
}
