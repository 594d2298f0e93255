//! Core types for Tavolo.
//!
//! Wire field names follow the gateway's spreadsheet-backed contract
//! (`orderId`, `itemsJSON`, `activeStatus`, ...), so these types serialize
//! directly into request payloads and out of response envelopes.

pub mod catalog;
pub mod identity;
pub mod order;

pub use catalog::{Category, NewProduct, Product};
pub use identity::{ParseRoleError, Role, User};
pub use order::{NewOrder, Order, OrderStatus, ParseOrderStatusError, PaymentStatus};
