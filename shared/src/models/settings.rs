//! Application settings
//!
//! Built once at the composition root and passed down by reference.

use serde::{Deserialize, Serialize};

use super::{BankInfo, StoreInfo};

/// Process-wide receipt settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub store: StoreInfo,
    pub bank: BankInfo,
    pub default_cashier: String,
    /// VAT disclaimer printed under the payment block
    pub vat_note: String,
    pub thank_you_message: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            store: StoreInfo {
                name: "LALA QUÁN".to_string(),
                address: "02 Lê Thanh Nghị, Hải Châu, Đà Nẵng".to_string(),
                phone: Some("0905886007".to_string()),
                logo: None,
            },
            bank: BankInfo {
                bank_name: "VPBank".to_string(),
                account_name: "TRAN THI THUY".to_string(),
                account_number: "0905886007".to_string(),
                phone: "0905886007".to_string(),
            },
            default_cashier: "Thu ngân".to_string(),
            vat_note: "Giá trên chưa bao gồm VAT".to_string(),
            thank_you_message: "Cảm ơn Quý Khách và Hẹn gặp lại!".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let s: AppSettings = serde_json::from_str(r#"{"defaultCashier":"Lan"}"#).unwrap();
        assert_eq!(s.default_cashier, "Lan");
        assert_eq!(s.bank.bank_name, "VPBank");
        assert_eq!(s.vat_note, AppSettings::default().vat_note);
    }
}
