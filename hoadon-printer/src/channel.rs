//! Handoff channels
//!
//! A channel turns a rendered receipt into a request the host can carry
//! out: a scheme URI for an installed print handler (RawBT on Android),
//! or a document shown on a print surface. Channels are fire-and-forget.
//! `Ok(())` means the host took the request; whether paper came out is
//! not observable from here.

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tracing::{info, instrument};

use crate::error::{ChannelError, ChannelResult};
use crate::output::{OutputFormat, RenderOutput};

/// RawBT package on Android
pub const RAWBT_PACKAGE: &str = "ru.a402d.rawbtprinter";

/// Default wait between showing the print surface and triggering print
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(500);

/// Platform services a channel calls into
///
/// Implemented by the embedding application. Every call is synchronous
/// and returns as soon as the platform has accepted (or refused) it.
pub trait Host {
    /// Whether an external print handler can receive scheme URIs
    fn supports_handoff(&self) -> bool;

    /// Launch a scheme URI
    fn open_uri(&self, uri: &str) -> ChannelResult<()>;

    /// Show a document on a new print surface
    fn present(&self, document: &str) -> ChannelResult<()>;

    /// Invoke the native print action of the surface shown last
    fn print_presented(&self) -> ChannelResult<()>;
}

/// One delivery route
pub trait Channel {
    fn name(&self) -> &'static str;

    /// Output this channel carries
    fn format(&self) -> OutputFormat;

    /// Whether the channel needs [`Host::supports_handoff`]
    fn requires_handoff(&self) -> bool;

    /// Hand the output to the host, once
    fn deliver(&self, host: &dyn Host, output: &RenderOutput) -> ChannelResult<()>;
}

/// `rawbt:base64,<data>`
pub fn base64_uri(bytes: &[u8]) -> String {
    format!("rawbt:base64,{}", STANDARD.encode(bytes))
}

/// `rawbt:<percent-encoded text>`
pub fn text_uri(text: &str) -> String {
    format!("rawbt:{}", urlencoding::encode(text))
}

/// Android intent URI carrying base64 data for RawBT
pub fn intent_uri(bytes: &[u8]) -> String {
    format!(
        "intent://print#Intent;scheme=rawbt;package={};S.data={};end",
        RAWBT_PACKAGE,
        STANDARD.encode(bytes)
    )
}

fn wrong_format(channel: &'static str, output: &RenderOutput) -> ChannelError {
    ChannelError::WrongFormat {
        channel,
        format: output.format().as_str(),
    }
}

fn ensure_handoff(host: &dyn Host) -> ChannelResult<()> {
    if host.supports_handoff() {
        Ok(())
    } else {
        Err(ChannelError::Unsupported("no external print handler".to_string()))
    }
}

/// ESC/POS bytes, base64 in a `rawbt:` URI
#[derive(Debug, Clone, Copy, Default)]
pub struct RawBtBase64Channel;

impl Channel for RawBtBase64Channel {
    fn name(&self) -> &'static str {
        "rawbt-base64"
    }

    fn format(&self) -> OutputFormat {
        OutputFormat::Escpos
    }

    fn requires_handoff(&self) -> bool {
        true
    }

    #[instrument(skip_all, fields(channel = self.name(), bytes = output.len()))]
    fn deliver(&self, host: &dyn Host, output: &RenderOutput) -> ChannelResult<()> {
        let RenderOutput::Escpos(bytes) = output else {
            return Err(wrong_format(self.name(), output));
        };
        ensure_handoff(host)?;
        host.open_uri(&base64_uri(bytes))?;
        info!("handed off to print handler");
        Ok(())
    }
}

/// ESC/POS bytes through an Android intent URI
#[derive(Debug, Clone, Copy, Default)]
pub struct RawBtIntentChannel;

impl Channel for RawBtIntentChannel {
    fn name(&self) -> &'static str {
        "rawbt-intent"
    }

    fn format(&self) -> OutputFormat {
        OutputFormat::Escpos
    }

    fn requires_handoff(&self) -> bool {
        true
    }

    #[instrument(skip_all, fields(channel = self.name(), bytes = output.len()))]
    fn deliver(&self, host: &dyn Host, output: &RenderOutput) -> ChannelResult<()> {
        let RenderOutput::Escpos(bytes) = output else {
            return Err(wrong_format(self.name(), output));
        };
        ensure_handoff(host)?;
        host.open_uri(&intent_uri(bytes))?;
        info!("handed off via intent");
        Ok(())
    }
}

/// Plain text, percent-encoded in a `rawbt:` URI
#[derive(Debug, Clone, Copy, Default)]
pub struct RawBtTextChannel;

impl Channel for RawBtTextChannel {
    fn name(&self) -> &'static str {
        "rawbt-text"
    }

    fn format(&self) -> OutputFormat {
        OutputFormat::Text
    }

    fn requires_handoff(&self) -> bool {
        true
    }

    #[instrument(skip_all, fields(channel = self.name(), bytes = output.len()))]
    fn deliver(&self, host: &dyn Host, output: &RenderOutput) -> ChannelResult<()> {
        let RenderOutput::Text(text) = output else {
            return Err(wrong_format(self.name(), output));
        };
        ensure_handoff(host)?;
        host.open_uri(&text_uri(text))?;
        info!("handed off text to print handler");
        Ok(())
    }
}

/// Markup shown on a print surface; the user confirms the print dialog
#[derive(Debug, Clone, Copy)]
pub struct PrintSurfaceChannel {
    settle: Duration,
}

impl PrintSurfaceChannel {
    pub fn new(settle: Duration) -> Self {
        Self { settle }
    }

    pub fn settle(&self) -> Duration {
        self.settle
    }
}

impl Default for PrintSurfaceChannel {
    fn default() -> Self {
        Self::new(DEFAULT_SETTLE)
    }
}

impl Channel for PrintSurfaceChannel {
    fn name(&self) -> &'static str {
        "print-surface"
    }

    fn format(&self) -> OutputFormat {
        OutputFormat::Markup
    }

    fn requires_handoff(&self) -> bool {
        false
    }

    #[instrument(skip_all, fields(channel = self.name(), bytes = output.len()))]
    fn deliver(&self, host: &dyn Host, output: &RenderOutput) -> ChannelResult<()> {
        let RenderOutput::Markup(document) = output else {
            return Err(wrong_format(self.name(), output));
        };
        host.present(document)?;
        if !self.settle.is_zero() {
            std::thread::sleep(self.settle);
        }
        host.print_presented()?;
        info!("print dialog opened");
        Ok(())
    }
}
