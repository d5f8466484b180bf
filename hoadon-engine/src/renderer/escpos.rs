//! ESC/POS receipt renderer
//!
//! Renders an invoice into the command stream for the 80mm profile.

use hoadon_printer::layout::two_column;
use hoadon_printer::{
    CodePage, EncodingResult, EscPosBuilder, OutputFormat, QrErrorLevel, RenderOutput, Scale,
};
use shared::{AppSettings, Invoice};
use tracing::instrument;

use super::{ITEM_HEADER, ReceiptContent, Renderer};
use crate::config::{EngineConfig, PAPER_WIDTH};

/// ESC/POS renderer
pub struct EscPosRenderer {
    width: usize,
    code_page: CodePage,
    qr_module_size: u8,
    qr_level: QrErrorLevel,
    feed_lines: u8,
}

impl EscPosRenderer {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            width: PAPER_WIDTH,
            code_page: config.code_page,
            qr_module_size: config.qr_module_size,
            qr_level: config.qr_level,
            feed_lines: config.feed_lines,
        }
    }

    /// Render to raw bytes
    #[instrument(skip_all, fields(invoice = %invoice.info.invoice_number))]
    pub fn render_bytes(&self, invoice: &Invoice, settings: &AppSettings) -> EncodingResult<Vec<u8>> {
        let c = ReceiptContent::build(invoice, settings);
        let mut b = EscPosBuilder::with_code_page(self.width, self.code_page);

        self.render_store(&mut b, &c);
        b.divider();
        self.render_title(&mut b, &c);
        b.divider();
        self.render_items(&mut b, &c);
        b.divider();
        self.render_totals(&mut b, &c);
        b.divider();
        self.render_payment(&mut b, &c)?;
        self.render_footer(&mut b, &c);

        let bytes = b.build();
        tracing::debug!(bytes = bytes.len(), "escpos rendered");
        Ok(bytes)
    }

    fn render_store(&self, b: &mut EscPosBuilder, c: &ReceiptContent) {
        b.center();
        self.render_logo(b, c);
        b.bold();
        b.scale(Scale::DoubleSize);
        b.line(&c.store_name);
        b.reset_size();
        b.bold_off();
        b.line(&c.store_address);
        if let Some(phone) = &c.store_phone {
            b.line(phone);
        }
    }

    #[cfg(feature = "logo")]
    fn render_logo(&self, b: &mut EscPosBuilder, c: &ReceiptContent) {
        let Some(path) = &c.logo else {
            return;
        };
        match hoadon_printer::raster_logo(path) {
            Ok(raster) => {
                b.raw(&raster);
            }
            Err(e) => tracing::warn!(error = %e, "logo skipped"),
        }
    }

    #[cfg(not(feature = "logo"))]
    fn render_logo(&self, _b: &mut EscPosBuilder, _c: &ReceiptContent) {}

    fn render_title(&self, b: &mut EscPosBuilder, c: &ReceiptContent) {
        b.bold();
        b.scale(Scale::DoubleHeight);
        b.line(c.title);
        b.reset_size();
        b.bold_off();
        b.line(&c.number_line);

        b.left();
        for (left, right) in &c.meta {
            b.line(&two_column(left, right, self.width));
        }
    }

    fn render_items(&self, b: &mut EscPosBuilder, c: &ReceiptContent) {
        b.bold();
        b.line(&ITEM_HEADER.line());
        b.bold_off();
        b.divider();

        for row in &c.rows {
            let [index, name, qty, price, total] = row.cells();
            b.text(&index);
            b.text(&name);
            b.text(&qty);
            b.text(&price);
            b.bold();
            b.text(&total);
            b.bold_off();
            b.newline();
        }
    }

    fn render_totals(&self, b: &mut EscPosBuilder, c: &ReceiptContent) {
        let (label, amount) = &c.subtotal;
        b.line(&two_column(label, amount, self.width));

        let (label, amount) = &c.grand_total;
        b.bold();
        b.scale(Scale::DoubleHeight);
        b.line(&two_column(label, amount, self.width));
        b.reset_size();
        b.bold_off();
    }

    fn render_payment(&self, b: &mut EscPosBuilder, c: &ReceiptContent) -> EncodingResult<()> {
        b.center();
        b.line(&c.bank_name);
        b.bold();
        b.line(&c.account_name);
        b.bold_off();
        b.line(&c.account_number);
        b.line(&c.bank_phone);
        b.newline();

        b.qr_code(&c.payload.descriptor(), self.qr_module_size, self.qr_level)?;
        b.newline();
        b.newline();
        Ok(())
    }

    fn render_footer(&self, b: &mut EscPosBuilder, c: &ReceiptContent) {
        b.line(&c.vat_note);
        b.divider();
        b.bold();
        b.line(&c.thank_you);
        b.bold_off();

        // Feed and cut
        b.feed(self.feed_lines);
        b.cut_partial();
    }
}

impl Default for EscPosRenderer {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl Renderer for EscPosRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Escpos
    }

    fn render(&self, invoice: &Invoice, settings: &AppSettings) -> EncodingResult<RenderOutput> {
        self.render_bytes(invoice, settings).map(RenderOutput::Escpos)
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;
    use hoadon_printer::{EncodingError, qr_block};
    use shared::OrderItem;

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    #[test]
    fn test_stream_starts_with_init_and_ends_with_feed_cut() {
        let data = EscPosRenderer::default()
            .render_bytes(&coffee(), &settings())
            .unwrap();
        assert_eq!(&data[..2], &[0x1B, 0x40]);
        assert!(data.ends_with(&[0x1B, 0x64, 0x03, 0x1D, 0x56, 0x01]));
    }

    #[test]
    fn test_embeds_qr_block_for_descriptor() {
        let data = EscPosRenderer::default()
            .render_bytes(&coffee(), &settings())
            .unwrap();
        let descriptor = "2|99|0905886007|TRAN THI THUY|VPBank|40000|#AB12C 5|transfer";
        let block = qr_block(descriptor.as_bytes(), 8, QrErrorLevel::M).unwrap();
        assert!(find(&data, &block).is_some());
    }

    #[test]
    fn test_item_line_with_bold_total() {
        let data = EscPosRenderer::default()
            .render_bytes(&coffee(), &settings())
            .unwrap();
        let mut expected = "1   Cà phê               2      20,000".as_bytes().to_vec();
        expected.extend_from_slice(&[0x1B, 0x45, 0x01]);
        expected.extend_from_slice(b"    40,000");
        expected.extend_from_slice(&[0x1B, 0x45, 0x00, b'\n']);
        assert!(find(&data, &expected).is_some());
    }

    #[test]
    fn test_section_order() {
        let data = EscPosRenderer::default()
            .render_bytes(&coffee(), &settings())
            .unwrap();
        let s = settings();
        let positions: Vec<usize> = [
            s.store.name.as_str(),
            "HÓA ĐƠN THANH TOÁN",
            "Mã HĐ: #AB12C",
            "Cà phê",
            "Tổng tiền:",
            "TRAN THI THUY",
            s.vat_note.as_str(),
            s.thank_you_message.as_str(),
        ]
        .iter()
        .map(|needle| find(&data, needle.as_bytes()).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_zero_total_still_embeds_qr() {
        let inv = invoice(vec![OrderItem::new("1", "Nước lọc", 1, 0)]);
        assert_eq!(inv.total(), 0);
        let data = EscPosRenderer::default()
            .render_bytes(&inv, &settings())
            .unwrap();
        let descriptor = "2|99|0905886007|TRAN THI THUY|VPBank|0|#AB12C 5|transfer";
        let block = qr_block(descriptor.as_bytes(), 8, QrErrorLevel::M).unwrap();
        assert!(find(&data, &block).is_some());
        assert!(find(&data, super::super::NO_PAYMENT_PLACEHOLDER.as_bytes()).is_none());
    }

    #[test]
    fn test_oversized_descriptor_is_rejected() {
        let mut inv = invoice(vec![OrderItem::new("1", "x", 1, 1000)]);
        inv.info.invoice_number = "#".repeat(70_000);
        let err = EscPosRenderer::default()
            .render_bytes(&inv, &settings())
            .unwrap_err();
        assert!(matches!(err, EncodingError::QrPayloadTooLong { .. }));
    }

    #[test]
    fn test_legacy_code_page() {
        let config = EngineConfig {
            code_page: CodePage::from_label("windows-1258").unwrap(),
            ..EngineConfig::default()
        };
        let data = EscPosRenderer::new(&config)
            .render_bytes(&coffee(), &settings())
            .unwrap();
        // "Cà" with à as a single 0xE0 byte
        assert!(find(&data, &[b'C', 0xE0, b' ', b'p', b'h']).is_some());
    }
}
