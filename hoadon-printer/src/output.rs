//! Rendered receipt, ready for a channel

use std::fmt;

/// Which renderer produced an output (and which one a channel needs)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// ESC/POS command stream
    Escpos,
    /// Fixed-width plain text, no control bytes
    Text,
    /// Self-contained HTML document
    Markup,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Escpos => "escpos",
            OutputFormat::Text => "text",
            OutputFormat::Markup => "markup",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one render; consumed by a single delivery attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutput {
    Escpos(Vec<u8>),
    Text(String),
    Markup(String),
}

impl RenderOutput {
    pub fn format(&self) -> OutputFormat {
        match self {
            RenderOutput::Escpos(_) => OutputFormat::Escpos,
            RenderOutput::Text(_) => OutputFormat::Text,
            RenderOutput::Markup(_) => OutputFormat::Markup,
        }
    }

    /// Size in bytes
    pub fn len(&self) -> usize {
        match self {
            RenderOutput::Escpos(b) => b.len(),
            RenderOutput::Text(s) | RenderOutput::Markup(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            RenderOutput::Escpos(b) => b,
            RenderOutput::Text(s) | RenderOutput::Markup(s) => s.as_bytes(),
        }
    }
}
