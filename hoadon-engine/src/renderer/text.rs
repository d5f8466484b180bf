//! Plain-text receipt renderer
//!
//! Fixed 48-column block for handoff targets that take text instead of a
//! command stream. No control bytes, no cut.

use hoadon_printer::layout::{Align, dashed_line, pad, two_column};
use hoadon_printer::{EncodingResult, OutputFormat, RenderOutput};
use shared::{AppSettings, Invoice};
use tracing::instrument;

use super::{ITEM_HEADER, PaymentCode, ReceiptContent, Renderer};
use crate::config::PAPER_WIDTH;

/// Plain-text renderer
#[derive(Debug, Clone)]
pub struct TextRenderer {
    width: usize,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self { width: PAPER_WIDTH }
    }

    #[instrument(skip_all, fields(invoice = %invoice.info.invoice_number))]
    pub fn render_text(&self, invoice: &Invoice, settings: &AppSettings) -> String {
        let c = ReceiptContent::build(invoice, settings);
        let mut lines: Vec<String> = Vec::new();

        // Store
        lines.push(self.center(&c.store_name));
        lines.push(self.center(&c.store_address));
        if let Some(phone) = &c.store_phone {
            lines.push(self.center(phone));
        }
        lines.push(dashed_line(self.width));

        // Title
        lines.push(self.center(c.title));
        lines.push(self.center(&c.number_line));
        lines.push(String::new());
        for (left, right) in &c.meta {
            lines.push(two_column(left, right, self.width));
        }
        lines.push(dashed_line(self.width));

        // Items
        lines.push(ITEM_HEADER.line());
        lines.push(dashed_line(self.width));
        for row in &c.rows {
            lines.push(row.cells().concat());
        }
        lines.push(dashed_line(self.width));

        // Totals
        for (label, amount) in [&c.subtotal, &c.grand_total] {
            lines.push(two_column(label, amount, self.width));
        }
        lines.push(dashed_line(self.width));

        // Payment; the text transport cannot carry a code, only the notice
        lines.push(self.center(&c.bank_name));
        lines.push(self.center(&c.account_name));
        lines.push(self.center(&c.account_number));
        lines.push(self.center(&c.bank_phone));
        if let PaymentCode::Placeholder(text) = &c.payment {
            lines.push(self.center(text));
        }
        lines.push(String::new());

        // Footer
        lines.push(self.center(&c.vat_note));
        lines.push(dashed_line(self.width));
        lines.push(self.center(&c.thank_you));

        let mut out = lines.join("\n");
        out.push('\n');
        tracing::debug!(lines = lines.len(), "text rendered");
        out
    }

    fn center(&self, text: &str) -> String {
        pad(text, self.width, Align::Center)
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for TextRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Text
    }

    fn render(&self, invoice: &Invoice, settings: &AppSettings) -> EncodingResult<RenderOutput> {
        Ok(RenderOutput::Text(self.render_text(invoice, settings)))
    }
}
