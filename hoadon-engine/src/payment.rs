//! Payment payload builder
//!
//! Resolves the bank display name to its NAPAS bank id and builds the
//! transfer descriptor in two forms: a QR image URL for the HTML receipt
//! and the raw pipe-delimited string embedded in the ESC/POS QR block.
//! Output depends only on the inputs.

use shared::{BankInfo, Invoice};

/// Bank id used when the display name is not in [`BANK_IDS`]
pub const DEFAULT_BANK_ID: &str = "970432";

/// Bank display name → bank id
pub const BANK_IDS: &[(&str, &str)] = &[
    ("VPBank", "970432"),
    ("Vietcombank", "970436"),
    ("Techcombank", "970407"),
    ("BIDV", "970418"),
    ("Agribank", "970405"),
    ("MB Bank", "970422"),
    ("ACB", "970416"),
    ("Sacombank", "970403"),
    ("VietinBank", "970415"),
    ("TPBank", "970423"),
    ("SHB", "970443"),
    ("VIB", "970441"),
    ("HDBank", "970437"),
    ("OCB", "970448"),
    ("SeABank", "970440"),
    ("MSB", "970426"),
    ("Eximbank", "970431"),
    ("LienVietPostBank", "970449"),
    ("Nam A Bank", "970428"),
    ("PVcomBank", "970412"),
];

/// Look up the bank id for a display name
///
/// Unknown names are not an error; they map to [`DEFAULT_BANK_ID`].
pub fn resolve_bank_id(bank_name: &str) -> &'static str {
    let name = bank_name.trim();
    BANK_IDS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, id)| *id)
        .unwrap_or_else(|| {
            tracing::debug!(bank = name, "bank not in table, using default id");
            DEFAULT_BANK_ID
        })
}

/// External QR image service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrImageEndpoint {
    pub base_url: String,
    pub template: String,
}

impl Default for QrImageEndpoint {
    fn default() -> Self {
        Self {
            base_url: "https://img.vietqr.io/image".to_string(),
            template: "compact2".to_string(),
        }
    }
}

/// Transfer descriptor for one invoice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentPayload {
    pub bank_id: &'static str,
    pub bank_name: String,
    pub account_name: String,
    pub account_number: String,
    pub amount: u64,
    pub description: String,
}

impl PaymentPayload {
    pub fn new(bank: &BankInfo, amount: u64, description: impl Into<String>) -> Self {
        Self {
            bank_id: resolve_bank_id(&bank.bank_name),
            bank_name: bank.bank_name.clone(),
            account_name: bank.account_name.clone(),
            account_number: bank.account_number.trim().to_string(),
            amount,
            description: description.into(),
        }
    }

    /// Payload for an invoice's grand total; the description is the
    /// invoice number followed by the table label when there is one
    pub fn for_invoice(invoice: &Invoice) -> Self {
        let info = &invoice.info;
        let table = info.table.trim();
        let description = if table.is_empty() {
            info.invoice_number.clone()
        } else {
            format!("{} {}", info.invoice_number, table)
        };
        Self::new(&invoice.bank, invoice.total(), description)
    }

    /// `{base}/{bankId}-{account}-{template}.png?amount=..&addInfo=..`
    pub fn image_url(&self, endpoint: &QrImageEndpoint) -> String {
        format!(
            "{}/{}-{}-{}.png?amount={}&addInfo={}",
            endpoint.base_url.trim_end_matches('/'),
            self.bank_id,
            urlencoding::encode(&self.account_number),
            endpoint.template,
            self.amount,
            urlencoding::encode(&self.description)
        )
    }

    /// Raw descriptor for the printer's QR block
    ///
    /// `2|99|account|holder|bank|amount|description|transfer`. A `|` inside
    /// a field would shift every later field, so it is replaced by a space.
    pub fn descriptor(&self) -> String {
        format!(
            "2|99|{}|{}|{}|{}|{}|transfer",
            field(&self.account_number),
            field(&self.account_name),
            field(&self.bank_name),
            self.amount,
            field(&self.description)
        )
    }
}

fn field(s: &str) -> String {
    s.replace('|', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank(name: &str) -> BankInfo {
        BankInfo {
            bank_name: name.to_string(),
            account_name: "TRAN THI THUY".to_string(),
            account_number: "0905886007".to_string(),
            phone: "0905886007".to_string(),
        }
    }

    #[test]
    fn test_known_banks_resolve() {
        assert_eq!(resolve_bank_id("Vietcombank"), "970436");
        assert_eq!(resolve_bank_id(" MB Bank "), "970422");
        assert_eq!(resolve_bank_id("PVcomBank"), "970412");
    }

    #[test]
    fn test_unknown_bank_uses_default() {
        assert_eq!(resolve_bank_id("Ngân hàng Mặt Trăng"), DEFAULT_BANK_ID);
        assert_eq!(resolve_bank_id(""), "970432");
    }

    #[test]
    fn test_image_url() {
        let p = PaymentPayload::new(&bank("Techcombank"), 40000, "#AB12C Bàn 5");
        assert_eq!(
            p.image_url(&QrImageEndpoint::default()),
            "https://img.vietqr.io/image/970407-0905886007-compact2.png?amount=40000&addInfo=%23AB12C%20B%C3%A0n%205"
        );
    }

    #[test]
    fn test_descriptor() {
        let p = PaymentPayload::new(&bank("VPBank"), 40000, "#AB12C");
        assert_eq!(
            p.descriptor(),
            "2|99|0905886007|TRAN THI THUY|VPBank|40000|#AB12C|transfer"
        );
    }

    #[test]
    fn test_descriptor_keeps_field_count() {
        let p = PaymentPayload::new(&bank("VPBank"), 1, "a|b");
        assert_eq!(p.descriptor().split('|').count(), 8);
    }

    #[test]
    fn test_payload_is_deterministic() {
        let a = PaymentPayload::new(&bank("ACB"), 123456, "#X Bàn 1");
        let b = PaymentPayload::new(&bank("ACB"), 123456, "#X Bàn 1");
        assert_eq!(a.descriptor().as_bytes(), b.descriptor().as_bytes());
        let ep = QrImageEndpoint::default();
        assert_eq!(a.image_url(&ep), b.image_url(&ep));
    }
}
