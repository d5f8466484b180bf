//! Invoice Model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{AppSettings, BankInfo, OrderItem, StoreInfo};
use crate::format::{format_date, format_time};
use crate::util::invoice_number;

/// Invoice header fields
///
/// Times and dates are display strings as entered on the order screen;
/// renderers normalize them through [`crate::format::time_label`] and
/// [`crate::format::date_label`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceInfo {
    pub invoice_number: String,
    pub cashier: String,
    /// Table or room label
    #[serde(default)]
    pub table: String,
    #[serde(default)]
    pub check_in_time: String,
    #[serde(default)]
    pub check_out_time: String,
    #[serde(default)]
    pub date: String,
}

impl InvoiceInfo {
    /// Header for a new order: fresh number, default cashier, no table,
    /// check-in and check-out both at `now`
    pub fn fresh(settings: &AppSettings, now: NaiveDateTime) -> Self {
        let time = format_time(now.time());
        Self {
            invoice_number: invoice_number(),
            cashier: settings.default_cashier.clone(),
            table: String::new(),
            check_in_time: time.clone(),
            check_out_time: time,
            date: format_date(now.date()),
        }
    }

    /// Stamp the check-out time (done right before printing)
    pub fn check_out_at(&mut self, now: NaiveDateTime) {
        self.check_out_time = format_time(now.time());
    }
}

/// Invoice aggregate
///
/// `subtotal` is the sum of the item totals and `total` equals `subtotal`.
/// Both are derived on construction and on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "InvoiceRecord", into = "InvoiceRecord")]
pub struct Invoice {
    pub store: StoreInfo,
    pub bank: BankInfo,
    pub info: InvoiceInfo,
    items: Vec<OrderItem>,
    subtotal: u64,
    total: u64,
    pub note: String,
}

impl Invoice {
    pub fn new(
        store: StoreInfo,
        bank: BankInfo,
        info: InvoiceInfo,
        items: Vec<OrderItem>,
        note: impl Into<String>,
    ) -> Self {
        let subtotal = items.iter().fold(0u64, |acc, i| acc.saturating_add(i.total()));
        Self {
            store,
            bank,
            info,
            items,
            subtotal,
            // Tax and discounts would adjust this.
            total: subtotal,
            note: note.into(),
        }
    }

    /// Assemble an invoice from the current order state and settings
    pub fn assemble(settings: &AppSettings, info: InvoiceInfo, items: Vec<OrderItem>) -> Self {
        Self::new(
            settings.store.clone(),
            settings.bank.clone(),
            info,
            items,
            settings.vat_note.clone(),
        )
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn subtotal(&self) -> u64 {
        self.subtotal
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InvoiceRecord {
    store: StoreInfo,
    bank: BankInfo,
    info: InvoiceInfo,
    #[serde(default)]
    items: Vec<OrderItem>,
    #[serde(default)]
    subtotal: u64,
    #[serde(default)]
    total: u64,
    #[serde(default)]
    note: String,
}

impl From<InvoiceRecord> for Invoice {
    fn from(r: InvoiceRecord) -> Self {
        Invoice::new(r.store, r.bank, r.info, r.items, r.note)
    }
}

impl From<Invoice> for InvoiceRecord {
    fn from(i: Invoice) -> Self {
        Self {
            store: i.store,
            bank: i.bank,
            info: i.info,
            items: i.items,
            subtotal: i.subtotal,
            total: i.total,
            note: i.note,
        }
    }
}
