//! # hoadon-printer
//!
//! ESC/POS receipt printing primitives - low-level capabilities only.
//!
//! ## Scope
//!
//! This crate handles HOW to print:
//! - Fixed-width text layout (pad, two-column, dividers)
//! - ESC/POS command building, including the QR block
//! - Code page selection for printer text
//! - Handoff channels (RawBT scheme URIs, print surface)
//!
//! Business logic (WHAT to print) lives in `hoadon-engine`.
//!
//! ## Example
//!
//! ```ignore
//! use hoadon_printer::{EscPosBuilder, QrErrorLevel, Scale};
//!
//! let mut builder = EscPosBuilder::new(48);
//! builder.center();
//! builder.scale(Scale::DoubleSize);
//! builder.line("LALA QUÁN");
//! builder.reset_size();
//! builder.divider();
//! builder.qr_code("2|99|0905886007|...", 8, QrErrorLevel::M)?;
//! builder.feed(3).cut_partial();
//! let bytes = builder.build();
//! ```

mod channel;
mod encoding;
mod error;
mod escpos;
pub mod layout;
mod output;

// Re-exports
pub use channel::{
    Channel, DEFAULT_SETTLE, Host, PrintSurfaceChannel, RAWBT_PACKAGE, RawBtBase64Channel,
    RawBtIntentChannel, RawBtTextChannel, base64_uri, intent_uri, text_uri,
};
pub use encoding::CodePage;
pub use error::{ChannelError, ChannelResult, EncodingError, EncodingResult};
pub use escpos::{EscPosBuilder, QR_MAX_PAYLOAD, QrErrorLevel, Scale, qr_block};
pub use layout::{Align, dashed_line, ellipsize, pad, two_column};
pub use output::{OutputFormat, RenderOutput};

#[cfg(feature = "logo")]
pub use escpos::raster_logo;
