//! Error types for the printer library

use thiserror::Error;

/// Command stream could not be built
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// QR store-data length field is 16 bits and must also cover the
    /// 3-byte sub-command header
    #[error("QR payload too long: {len} bytes (max {max})")]
    QrPayloadTooLong { len: usize, max: usize },

    /// Module size outside 1..=16 dots
    #[error("Invalid QR module size: {0}")]
    QrModuleSize(u8),

    /// Unknown code page label
    #[error("Unknown code page: {0}")]
    UnknownCodePage(String),

    /// Logo could not be loaded or rasterized
    #[error("Logo image error: {0}")]
    Image(String),
}

/// Result type for encoding operations
pub type EncodingResult<T> = Result<T, EncodingError>;

/// A handoff or presentation call failed synchronously
///
/// There is no delivery feedback. `Ok` from a channel only means the host
/// accepted the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    /// Host has no external print handler for this kind of handoff
    #[error("Handoff not supported: {0}")]
    Unsupported(String),

    /// Host refused or failed the call
    #[error("Host refused: {0}")]
    Refused(String),

    /// Channel was handed an output it cannot carry
    #[error("Channel {channel} cannot carry {format} output")]
    WrongFormat {
        channel: &'static str,
        format: &'static str,
    },
}

/// Result type for channel operations
pub type ChannelResult<T> = Result<T, ChannelError>;
