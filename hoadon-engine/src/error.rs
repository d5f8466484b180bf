//! Engine error types

use hoadon_printer::{EncodingError, OutputFormat};
use thiserror::Error;

use crate::dispatcher::Attempt;

#[derive(Debug, Error)]
pub enum PrintError {
    /// Nothing to print
    #[error("Order has no items")]
    EmptyOrder,

    /// A render requested directly by the caller failed
    #[error(transparent)]
    Render(#[from] EncodingError),

    /// Chain step pairs a renderer with a channel that carries another format
    #[error("Channel {channel} carries {expected} output, paired renderer produces {got}")]
    ChainMismatch {
        channel: &'static str,
        expected: OutputFormat,
        got: OutputFormat,
    },

    /// Every channel in the chain failed or was unavailable
    #[error("All print channels failed ({} attempts)", .attempts.len())]
    Exhausted { attempts: Vec<Attempt> },
}

pub type PrintResult<T> = Result<T, PrintError>;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Item name is empty")]
    BlankName,

    #[error("Quantity must be at least 1")]
    ZeroQuantity,

    #[error("Unit price must be greater than 0")]
    ZeroPrice,

    #[error("Item not found: {0}")]
    NotFound(String),
}

pub type OrderResult<T> = Result<T, OrderError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Settings I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
