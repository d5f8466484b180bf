//! HTML receipt renderer
//!
//! Self-contained 80mm document for the print surface. The payment code is
//! an `<img>` pointing at the external QR image service; with nothing to
//! pay no image is requested at all.

use hoadon_printer::{EncodingResult, OutputFormat, RenderOutput};
use shared::{AppSettings, Invoice};
use tracing::instrument;

use super::{ITEM_HEADER, PaymentCode, ReceiptContent, Renderer};
use crate::config::EngineConfig;
use crate::payment::QrImageEndpoint;

const STYLE: &str = r#"    @page { size: 80mm auto; margin: 0; }
    * { margin: 0; padding: 0; box-sizing: border-box; }
    body {
      font-family: 'Courier New', monospace;
      font-size: 12px;
      line-height: 1.3;
      width: 80mm;
      padding: 5mm;
      background: white;
      color: black;
    }
    .center { text-align: center; }
    .bold { font-weight: bold; }
    .title { font-size: 16px; font-weight: bold; margin: 5px 0; }
    .small { font-size: 10px; }
    .muted { color: #666; }
    .divider { border-top: 1px dashed #000; margin: 8px 0; }
    table { width: 100%; border-collapse: collapse; font-size: 11px; }
    th, td { padding: 3px 2px; text-align: left; }
    th { border-bottom: 1px solid #000; }
    .qty { text-align: center; }
    .price, .total { text-align: right; }
    td.total { font-weight: bold; }
    .grand-total { font-size: 14px; font-weight: bold; }
    .logo { height: 40px; margin-bottom: 5px; }
    .qr-code { width: 100px; height: 100px; margin: 10px auto; display: block; }
    .qr-placeholder { margin: 10px auto; padding: 8px; border: 1px dashed #000; font-size: 11px; }
    .info-row { display: flex; justify-content: space-between; font-size: 11px; }
"#;

/// HTML renderer
#[derive(Debug, Clone, Default)]
pub struct MarkupRenderer {
    endpoint: QrImageEndpoint,
}

impl MarkupRenderer {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            endpoint: config.qr_endpoint.clone(),
        }
    }

    pub fn with_endpoint(endpoint: QrImageEndpoint) -> Self {
        Self { endpoint }
    }

    #[instrument(skip_all, fields(invoice = %invoice.info.invoice_number))]
    pub fn render_html(&self, invoice: &Invoice, settings: &AppSettings) -> String {
        let c = ReceiptContent::build(invoice, settings);
        let mut html = String::with_capacity(4096);

        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n  <meta charset=\"UTF-8\">\n");
        html.push_str(&format!(
            "  <title>Hóa đơn {}</title>\n",
            escape(&invoice.info.invoice_number)
        ));
        html.push_str("  <style>\n");
        html.push_str(STYLE);
        html.push_str("  </style>\n</head>\n<body>\n");

        // Store
        html.push_str("  <div class=\"center\">\n");
        if let Some(logo) = &c.logo {
            html.push_str(&format!(
                "    <img src=\"{}\" class=\"logo\" alt=\"\">\n",
                escape(logo)
            ));
        }
        html.push_str(&div("title", &c.store_name));
        html.push_str(&div("small", &c.store_address));
        if let Some(phone) = &c.store_phone {
            html.push_str(&div("small", phone));
        }
        html.push_str("  </div>\n");
        html.push_str(DIVIDER);

        // Title
        html.push_str("  <div class=\"center\">\n");
        html.push_str(&div("title", c.title));
        html.push_str(&div("small", &c.number_line));
        html.push_str("  </div>\n");
        html.push_str("  <div style=\"margin: 8px 0;\">\n");
        for (left, right) in &c.meta {
            html.push_str(&info_row("info-row", left, right));
        }
        html.push_str("  </div>\n");
        html.push_str(DIVIDER);

        // Items
        let [h_index, h_name, h_qty, h_price, h_total] = ITEM_HEADER.0;
        html.push_str("  <table>\n    <thead>\n      <tr>\n");
        html.push_str(&format!("        <th>{}</th>\n", escape(h_index)));
        html.push_str(&format!("        <th>{}</th>\n", escape(h_name)));
        html.push_str(&format!("        <th class=\"qty\">{}</th>\n", escape(h_qty)));
        html.push_str(&format!("        <th class=\"price\">{}</th>\n", escape(h_price)));
        html.push_str(&format!("        <th class=\"total\">{}</th>\n", escape(h_total)));
        html.push_str("      </tr>\n    </thead>\n    <tbody>\n");
        for row in &c.rows {
            html.push_str("      <tr>\n");
            html.push_str(&format!("        <td>{}</td>\n", escape(&row.index)));
            html.push_str(&format!("        <td>{}</td>\n", escape(&row.name)));
            html.push_str(&format!("        <td class=\"qty\">{}</td>\n", escape(&row.quantity)));
            html.push_str(&format!(
                "        <td class=\"price\">{}</td>\n",
                escape(&row.unit_price)
            ));
            html.push_str(&format!("        <td class=\"total\">{}</td>\n", escape(&row.total)));
            html.push_str("      </tr>\n");
        }
        html.push_str("    </tbody>\n  </table>\n");
        html.push_str(DIVIDER);

        // Totals
        html.push_str("  <div>\n");
        html.push_str(&info_row("info-row", c.subtotal.0, &c.subtotal.1));
        html.push_str(&info_row("info-row grand-total", c.grand_total.0, &c.grand_total.1));
        html.push_str("  </div>\n");
        html.push_str(DIVIDER);

        // Payment
        html.push_str("  <div class=\"center\" style=\"margin: 10px 0;\">\n");
        html.push_str(&div("small muted", &c.bank_name));
        html.push_str(&div("bold", &c.account_name));
        html.push_str(&div("small", &c.account_number));
        html.push_str(&div("small", &c.bank_phone));
        match &c.payment {
            PaymentCode::Qr => {
                html.push_str(&format!(
                    "    <img src=\"{}\" class=\"qr-code\" alt=\"QR Thanh toán\">\n",
                    escape(&c.payload.image_url(&self.endpoint))
                ));
            }
            PaymentCode::Placeholder(text) => {
                html.push_str(&div("qr-placeholder", text));
            }
        }
        html.push_str("  </div>\n");

        // Footer
        html.push_str(&div("center small muted", &c.vat_note));
        html.push_str(DIVIDER);
        html.push_str(&div("center bold", &c.thank_you));
        html.push_str("</body>\n</html>\n");

        tracing::debug!(bytes = html.len(), "markup rendered");
        html
    }
}

impl Renderer for MarkupRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Markup
    }

    fn render(&self, invoice: &Invoice, settings: &AppSettings) -> EncodingResult<RenderOutput> {
        Ok(RenderOutput::Markup(self.render_html(invoice, settings)))
    }
}

const DIVIDER: &str = "  <div class=\"divider\"></div>\n";

fn div(class: &str, text: &str) -> String {
    format!("    <div class=\"{}\">{}</div>\n", class, escape(text))
}

fn info_row(class: &str, left: &str, right: &str) -> String {
    format!(
        "    <div class=\"{}\"><span>{}</span><span>{}</span></div>\n",
        class,
        escape(left),
        escape(right)
    )
}

/// Escape text for element content and double-quoted attributes
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::super::NO_PAYMENT_PLACEHOLDER;
    use super::super::fixtures::*;
    use super::*;
    use shared::OrderItem;

    #[test]
    fn test_qr_image_url() {
        let html = MarkupRenderer::default().render_html(&coffee(), &settings());
        assert!(html.contains(
            "<img src=\"https://img.vietqr.io/image/970432-0905886007-compact2.png?amount=40000&amp;addInfo=%23AB12C%205\" class=\"qr-code\""
        ));
        assert!(!html.contains("qr-placeholder\">"));
    }

    #[test]
    fn test_zero_total_omits_qr_request() {
        let html = MarkupRenderer::default().render_html(&invoice(vec![]), &settings());
        assert!(!html.contains("img.vietqr.io"));
        assert!(!html.contains("class=\"qr-code\""));
        assert!(html.contains(&format!(
            "<div class=\"qr-placeholder\">{}</div>",
            NO_PAYMENT_PLACEHOLDER
        )));
    }

    #[test]
    fn test_custom_endpoint() {
        let renderer = MarkupRenderer::with_endpoint(QrImageEndpoint {
            base_url: "https://qr.example.test/".to_string(),
            template: "print".to_string(),
        });
        let html = renderer.render_html(&coffee(), &settings());
        assert!(html.contains("https://qr.example.test/970432-0905886007-print.png?amount=40000"));
    }

    #[test]
    fn test_item_row_and_totals() {
        let html = MarkupRenderer::default().render_html(&coffee(), &settings());
        assert!(html.contains("<td>Cà phê</td>"));
        assert!(html.contains("<td class=\"total\">40,000</td>"));
        assert!(html.contains("<span>Tổng tiền:</span><span>40,000 đ</span>"));
        assert!(html.contains("<title>Hóa đơn #AB12C</title>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let inv = invoice(vec![OrderItem::new("1", "<b>Trà & \"chanh\"</b>", 1, 5000)]);
        let html = MarkupRenderer::default().render_html(&inv, &settings());
        assert!(html.contains("<td>&lt;b&gt;Trà &amp; &quot;chanh&quot;&lt;/b&gt;</td>"));
        assert!(!html.contains("<b>Trà"));
    }

    #[test]
    fn test_logo_only_when_present() {
        let html = MarkupRenderer::default().render_html(&coffee(), &settings());
        assert!(!html.contains("class=\"logo\""));

        let mut inv = coffee();
        inv.store.logo = Some("data:image/png;base64,AAAA".to_string());
        let html = MarkupRenderer::default().render_html(&inv, &settings());
        assert!(html.contains("<img src=\"data:image/png;base64,AAAA\" class=\"logo\""));
    }
}
