//! Order Item Model

use serde::{Deserialize, Serialize};

/// One line of an order
///
/// `total` is always `quantity × unit_price`. It is recomputed by every
/// mutator and on deserialization, so a stale total coming from outside
/// never reaches a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "OrderItemRecord", into = "OrderItemRecord")]
pub struct OrderItem {
    id: String,
    name: String,
    quantity: u32,
    unit_price: u64,
    total: u64,
}

impl OrderItem {
    /// Create an item. `quantity` is clamped to at least 1.
    pub fn new(id: impl Into<String>, name: impl Into<String>, quantity: u32, unit_price: u64) -> Self {
        let quantity = quantity.max(1);
        Self {
            id: id.into(),
            name: name.into(),
            quantity,
            unit_price,
            total: line_total(quantity, unit_price),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Price per unit in the smallest currency unit
    pub fn unit_price(&self) -> u64 {
        self.unit_price
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity.max(1);
        self.total = line_total(self.quantity, self.unit_price);
    }

    pub fn set_unit_price(&mut self, unit_price: u64) {
        self.unit_price = unit_price;
        self.total = line_total(self.quantity, self.unit_price);
    }

    /// Add `delta` to the quantity, never dropping below 1
    pub fn adjust_quantity(&mut self, delta: i64) {
        let next = i64::from(self.quantity)
            .saturating_add(delta)
            .clamp(1, i64::from(u32::MAX));
        self.set_quantity(next as u32);
    }
}

fn line_total(quantity: u32, unit_price: u64) -> u64 {
    u64::from(quantity).saturating_mul(unit_price)
}

/// Wire shape of [`OrderItem`]; `total` is accepted but ignored on input
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderItemRecord {
    id: String,
    name: String,
    quantity: u32,
    unit_price: u64,
    #[serde(default)]
    total: u64,
}

impl From<OrderItemRecord> for OrderItem {
    fn from(r: OrderItemRecord) -> Self {
        OrderItem::new(r.id, r.name, r.quantity, r.unit_price)
    }
}

impl From<OrderItem> for OrderItemRecord {
    fn from(i: OrderItem) -> Self {
        Self {
            id: i.id,
            name: i.name,
            quantity: i.quantity,
            unit_price: i.unit_price,
            total: i.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_total_follows_mutations() {
        let mut item = OrderItem::new("a", "Cà phê", 2, 20000);
        assert_eq!(item.total(), 40000);

        item.set_quantity(3);
        assert_eq!(item.total(), 60000);

        item.set_unit_price(25000);
        assert_eq!(item.total(), 75000);

        item.adjust_quantity(-10);
        assert_eq!(item.quantity(), 1);
        assert_eq!(item.total(), 25000);
    }

    #[test]
    fn test_adjust_quantity_saturates() {
        let mut item = OrderItem::new("a", "Trà", 5, 1000);
        item.adjust_quantity(i64::MAX);
        assert_eq!(item.quantity(), u32::MAX);

        item.adjust_quantity(i64::MIN);
        assert_eq!(item.quantity(), 1);
    }

    #[test]
    fn test_zero_quantity_is_clamped() {
        let item = OrderItem::new("a", "Trà", 0, 10000);
        assert_eq!(item.quantity(), 1);
        assert_eq!(item.total(), 10000);
    }

    #[test]
    fn test_deserialize_recomputes_stale_total() {
        let json = r#"{"id":"x","name":"Bạc xỉu","quantity":2,"unitPrice":30000,"total":1}"#;
        let item: OrderItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.total(), 60000);

        let back = serde_json::to_value(&item).unwrap();
        assert_eq!(back["total"], 60000);
        assert_eq!(back["unitPrice"], 30000);
    }

    proptest! {
        #[test]
        fn prop_total_is_quantity_times_price(q in 1u32..1000, p in 0u64..10_000_000) {
            let item = OrderItem::new("p", "x", q, p);
            prop_assert_eq!(item.total(), u64::from(q) * p);
        }
    }
}
