//! Error types for the shared crate

use thiserror::Error;

/// Malformed display input (times, dates)
///
/// Only the strict `parse_*` helpers in [`crate::format`] return this.
/// Renderers go through the `*_label` helpers, which absorb it into a
/// placeholder so printing is never blocked by a bad timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Invalid time: {0:?}")]
    InvalidTime(String),

    #[error("Invalid date: {0:?}")]
    InvalidDate(String),
}

/// Result type for formatting operations
pub type FormatResult<T> = Result<T, FormatError>;
