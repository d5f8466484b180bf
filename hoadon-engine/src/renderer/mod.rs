//! Receipt renderers
//!
//! Three renderers share one content model. [`ReceiptContent`] is built
//! once per render from the invoice and settings, so the ESC/POS, text and
//! HTML outputs carry the same strings in the same order; the renderers
//! only decide how each block looks.

mod escpos;
mod markup;
mod text;

pub use escpos::EscPosRenderer;
pub use markup::MarkupRenderer;
pub use text::TextRenderer;

use hoadon_printer::layout::{Align, ellipsize, pad};
use hoadon_printer::{EncodingResult, OutputFormat, RenderOutput};
use shared::format::{date_label, format_amount, time_label};
use shared::{AppSettings, Invoice};

use crate::payment::PaymentPayload;

// Item table columns; they add up to the 48-column paper width.
pub const COL_INDEX: usize = 4;
pub const COL_NAME: usize = 20;
pub const COL_QTY: usize = 4;
pub const COL_PRICE: usize = 10;
pub const COL_TOTAL: usize = 10;

pub const TITLE: &str = "HÓA ĐƠN THANH TOÁN";
pub const CURRENCY_SUFFIX: &str = " đ";
/// Shown instead of a payment code when there is nothing to pay
pub const NO_PAYMENT_PLACEHOLDER: &str = "Không có số tiền cần thanh toán";

/// Turns an invoice into one output format
pub trait Renderer {
    fn format(&self) -> OutputFormat;

    fn render(&self, invoice: &Invoice, settings: &AppSettings) -> EncodingResult<RenderOutput>;
}

/// One row of the item table, already formatted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    pub index: String,
    pub name: String,
    pub quantity: String,
    pub unit_price: String,
    pub total: String,
}

impl ItemRow {
    /// Fixed-width cells; the name is cut with `..` past [`COL_NAME`]
    pub fn cells(&self) -> [String; 5] {
        [
            pad(&self.index, COL_INDEX, Align::Start),
            ellipsize(&self.name, COL_NAME),
            pad(&self.quantity, COL_QTY, Align::Center),
            pad(&self.unit_price, COL_PRICE, Align::End),
            pad(&self.total, COL_TOTAL, Align::End),
        ]
    }
}

/// Column headings, in cell order
pub const ITEM_HEADER: ItemHeader = ItemHeader(["STT", "Tên món", "SL", "Đơn giá", "T.Tiền"]);

pub struct ItemHeader(pub [&'static str; 5]);

impl ItemHeader {
    pub fn line(&self) -> String {
        let [i, n, q, p, t] = self.0;
        format!(
            "{}{}{}{}{}",
            pad(i, COL_INDEX, Align::Start),
            pad(n, COL_NAME, Align::Start),
            pad(q, COL_QTY, Align::Center),
            pad(p, COL_PRICE, Align::End),
            pad(t, COL_TOTAL, Align::End)
        )
    }
}

/// What the HTML and text receipts show in the payment code slot
///
/// The ESC/POS receipt always embeds [`ReceiptContent::payload`]; only the
/// image request is avoided when there is nothing to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentCode {
    Qr,
    /// Total is zero; no image is requested
    Placeholder(&'static str),
}

/// Everything a receipt shows, in print order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptContent {
    // 1. store identity
    pub store_name: String,
    pub logo: Option<String>,
    pub store_address: String,
    pub store_phone: Option<String>,
    // 3. title
    pub title: &'static str,
    pub number_line: String,
    // 4. metadata rows
    pub meta: [(String, String); 3],
    // 6. items
    pub rows: Vec<ItemRow>,
    // 8. totals
    pub subtotal: (&'static str, String),
    pub grand_total: (&'static str, String),
    // 10. payment
    pub bank_name: String,
    pub account_name: String,
    pub account_number: String,
    pub bank_phone: String,
    pub payload: PaymentPayload,
    pub payment: PaymentCode,
    // 11, 13
    pub vat_note: String,
    pub thank_you: String,
}

impl ReceiptContent {
    pub fn build(invoice: &Invoice, settings: &AppSettings) -> Self {
        let store = &invoice.store;
        let info = &invoice.info;
        let bank = &invoice.bank;

        let rows = invoice
            .items()
            .iter()
            .enumerate()
            .map(|(i, item)| ItemRow {
                index: (i + 1).to_string(),
                name: clean(item.name()),
                quantity: item.quantity().to_string(),
                unit_price: format_amount(item.unit_price()),
                total: format_amount(item.total()),
            })
            .collect();

        let payment = if invoice.total() == 0 {
            PaymentCode::Placeholder(NO_PAYMENT_PLACEHOLDER)
        } else {
            PaymentCode::Qr
        };

        Self {
            store_name: clean(&store.name),
            logo: store.logo().map(str::to_string),
            store_address: clean(&store.address),
            store_phone: store.phone().map(|p| format!("ĐT: {}", clean(p))),
            title: TITLE,
            number_line: format!("Số HĐ: {}", clean(&info.invoice_number)),
            meta: [
                (
                    format!("Mã HĐ: {}", clean(&info.invoice_number)),
                    format!("TN: {}", clean(&info.cashier)),
                ),
                (
                    format!("Bàn: {}", clean(&info.table)),
                    format!("Ngày: {}", date_label(&info.date)),
                ),
                (
                    format!("Giờ vào: {}", time_label(&info.check_in_time)),
                    format!("Giờ ra: {}", time_label(&info.check_out_time)),
                ),
            ],
            rows,
            subtotal: ("Thành tiền:", money(invoice.subtotal())),
            grand_total: ("Tổng tiền:", money(invoice.total())),
            bank_name: clean(&bank.bank_name),
            account_name: clean(&bank.account_name),
            account_number: clean(&bank.account_number),
            bank_phone: clean(&bank.phone),
            payload: PaymentPayload::for_invoice(invoice),
            payment,
            vat_note: clean(&settings.vat_note),
            thank_you: clean(&settings.thank_you_message),
        }
    }
}

/// Control characters in user text would become printer commands (or
/// break the plain-text contract); they print as spaces.
fn clean(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

fn money(amount: u64) -> String {
    format!("{}{}", format_amount(amount), CURRENCY_SUFFIX)
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use hoadon_printer::layout::text_width;

    #[test]
    fn test_item_row_cells() {
        let content = ReceiptContent::build(&coffee(), &settings());
        let cells = content.rows[0].cells();
        assert_eq!(cells[0], "1   ");
        assert_eq!(cells[1], "Cà phê              ");
        assert_eq!(cells[2], " 2  ");
        assert_eq!(cells[3], "    20,000");
        assert_eq!(cells[4], "    40,000");
        assert_eq!(text_width(&cells.concat()), 48);
    }

    #[test]
    fn test_long_name_is_ellipsized() {
        let name = "Sinh tố bơ sữa dừa non"; // 22 chars
        let inv = invoice(vec![shared::OrderItem::new("1", name, 1, 1000)]);
        let content = ReceiptContent::build(&inv, &settings());
        let cell = &content.rows[0].cells()[1];
        assert_eq!(text_width(cell), COL_NAME);
        assert!(cell.ends_with(".."));
    }

    #[test]
    fn test_header_line_width() {
        assert_eq!(text_width(&ITEM_HEADER.line()), 48);
    }

    #[test]
    fn test_zero_total_has_placeholder() {
        let content = ReceiptContent::build(&invoice(vec![]), &settings());
        assert_eq!(content.payment, PaymentCode::Placeholder(NO_PAYMENT_PLACEHOLDER));
    }

    #[test]
    fn test_content_fields() {
        let content = ReceiptContent::build(&coffee(), &settings());
        assert_eq!(content.number_line, "Số HĐ: #AB12C");
        assert_eq!(content.meta[1].1, "Ngày: 16/10/2026");
        assert_eq!(content.meta[2].0, "Giờ vào: 18:30");
        assert_eq!(content.grand_total.1, "40,000 đ");
        assert_eq!(content.store_phone.as_deref(), Some("ĐT: 0905886007"));
        assert_eq!(content.payment, PaymentCode::Qr);
        assert_eq!(content.payload.amount, 40000);
        assert_eq!(content.payload.description, "#AB12C 5");
    }

    #[test]
    fn test_control_characters_are_blanked() {
        let inv = invoice(vec![shared::OrderItem::new("1", "Trà\x1B@\nđá", 1, 1000)]);
        let content = ReceiptContent::build(&inv, &settings());
        assert_eq!(content.rows[0].name, "Trà @ đá");
    }

    #[test]
    fn test_bad_times_use_placeholders() {
        let mut inv = coffee();
        inv.info.check_in_time = "??".to_string();
        inv.info.date = String::new();
        let content = ReceiptContent::build(&inv, &settings());
        assert_eq!(content.meta[2].0, "Giờ vào: --:--");
        assert_eq!(content.meta[1].1, "Ngày: --/--/----");
    }
}
