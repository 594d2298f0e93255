//! Order types persisted by the gateway.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::{Cart, LineItem};

/// Customer-visible lifecycle of an order.
///
/// Transitions are owned by the admin status-update operation; customers
/// only ever read this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// All statuses in lifecycle order, for admin select inputs.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Processing,
        Self::Delivered,
        Self::Cancelled,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing an order status string.
#[derive(Debug, Error)]
#[error("invalid order status: {0}")]
pub struct ParseOrderStatusError(String);

impl std::str::FromStr for OrderStatus {
    type Err = ParseOrderStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Processing" => Ok(Self::Processing),
            "Delivered" => Ok(Self::Delivered),
            "Cancelled" => Ok(Self::Cancelled),
            other => Err(ParseOrderStatusError(other.to_string())),
        }
    }
}

/// Settlement state. Payment collection happens outside this system; orders
/// are created `Pending` and the gateway owns any later change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Paid => write!(f, "Paid"),
        }
    }
}

/// An order as returned by the gateway.
///
/// The line-item snapshot is stored as a JSON string column
/// (`itemsJSON`) and is immutable once submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "orderId")]
    pub order_id: String,
    #[serde(rename = "customerId")]
    pub customer_id: String,
    /// Present on admin listings, absent on per-customer queries.
    #[serde(rename = "customerName", default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(rename = "itemsJSON")]
    pub items_json: String,
    #[serde(rename = "totalPrice")]
    pub total_price: Decimal,
    #[serde(rename = "paymentStatus", default)]
    pub payment_status: PaymentStatus,
    #[serde(rename = "orderStatus")]
    pub order_status: OrderStatus,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// The line-item snapshot captured at submission time.
    ///
    /// A snapshot that fails to parse renders as an empty list rather than
    /// an error; the order header (total, status, timestamp) is still
    /// meaningful on its own.
    #[must_use]
    pub fn line_items(&self) -> Vec<LineItem> {
        serde_json::from_str(&self.items_json).unwrap_or_default()
    }
}

/// Payload for creating an order; the gateway assigns the id and timestamp.
#[derive(Debug, Clone, Serialize)]
pub struct NewOrder {
    #[serde(rename = "customerId")]
    pub customer_id: String,
    #[serde(rename = "itemsJSON")]
    pub items_json: String,
    #[serde(rename = "totalPrice")]
    pub total_price: Decimal,
    #[serde(rename = "paymentStatus")]
    pub payment_status: PaymentStatus,
    #[serde(rename = "orderStatus")]
    pub order_status: OrderStatus,
}

impl NewOrder {
    /// Snapshot a cart for submission. Both status fields start `Pending`.
    ///
    /// # Errors
    ///
    /// Returns an error if the line items cannot be serialized.
    pub fn from_cart(customer_id: impl Into<String>, cart: &Cart) -> Result<Self, serde_json::Error> {
        Ok(Self {
            customer_id: customer_id.into(),
            items_json: serde_json::to_string(cart.items())?,
            total_price: cart.total(),
            payment_status: PaymentStatus::Pending,
            order_status: OrderStatus::Pending,
        })
    }
}
