//! Shared types for the hoadon receipt engine
//!
//! Invoice data model, process-wide settings and the display formatters
//! used by every renderer. Nothing in here performs I/O.

pub mod error;
pub mod format;
pub mod models;
pub mod util;

// Re-exports
pub use error::{FormatError, FormatResult};
pub use models::*;
pub use serde::{Deserialize, Serialize};
