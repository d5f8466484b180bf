//! Bank Info Model

use serde::{Deserialize, Serialize};

/// Transfer destination shown in the payment block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankInfo {
    /// Display name, resolved to a bank identifier for payment codes
    pub bank_name: String,
    /// Account holder
    pub account_name: String,
    pub account_number: String,
    #[serde(default)]
    pub phone: String,
}
