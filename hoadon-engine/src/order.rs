//! Order being entered at the counter
//!
//! Owned by the order-entry side; the engine only turns it into an
//! [`Invoice`] at print time.

use shared::util::item_id;
use shared::{AppSettings, Invoice, InvoiceInfo, OrderItem};

use crate::error::{OrderError, OrderResult};

#[derive(Debug, Clone, Default)]
pub struct OrderDraft {
    items: Vec<OrderItem>,
}

impl OrderDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn subtotal(&self) -> u64 {
        self.items
            .iter()
            .map(OrderItem::total)
            .fold(0u64, u64::saturating_add)
    }

    /// Add a line; blank names, zero quantity and zero price are refused
    pub fn add(&mut self, name: &str, quantity: u32, unit_price: u64) -> OrderResult<&OrderItem> {
        let name = validate(name, quantity, unit_price)?;
        self.items
            .push(OrderItem::new(item_id(), name, quantity, unit_price));
        let index = self.items.len() - 1;
        Ok(&self.items[index])
    }

    pub fn remove(&mut self, id: &str) -> OrderResult<OrderItem> {
        let pos = self.position(id)?;
        Ok(self.items.remove(pos))
    }

    /// Replace name, quantity and price of a line
    pub fn edit(&mut self, id: &str, name: &str, quantity: u32, unit_price: u64) -> OrderResult<()> {
        let pos = self.position(id)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(OrderError::BlankName);
        }
        let item = &mut self.items[pos];
        item.set_name(name);
        item.set_quantity(quantity);
        item.set_unit_price(unit_price);
        Ok(())
    }

    /// `+1` / `-1` buttons; quantity stays at least 1
    pub fn adjust_quantity(&mut self, id: &str, delta: i64) -> OrderResult<()> {
        let pos = self.position(id)?;
        self.items[pos].adjust_quantity(delta);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Snapshot the draft into an invoice
    pub fn to_invoice(&self, settings: &AppSettings, info: InvoiceInfo) -> Invoice {
        Invoice::assemble(settings, info, self.items.clone())
    }

    fn position(&self, id: &str) -> OrderResult<usize> {
        self.items
            .iter()
            .position(|i| i.id() == id)
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }
}

fn validate(name: &str, quantity: u32, unit_price: u64) -> OrderResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(OrderError::BlankName);
    }
    if quantity == 0 {
        return Err(OrderError::ZeroQuantity);
    }
    if unit_price == 0 {
        return Err(OrderError::ZeroPrice);
    }
    Ok(name)
}
