//! Data models
//!
//! Serialized camelCase so the JSON handed over by the order-entry side
//! deserializes as-is.

pub mod bank_info;
pub mod invoice;
pub mod order_item;
pub mod settings;
pub mod store_info;

// Re-exports
pub use bank_info::*;
pub use invoice::*;
pub use order_item::*;
pub use settings::*;
pub use store_info::*;
