use crate::model::{ProductId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Type-safe identifier for Orders. `OrderId(0)` means "unset".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Lifecycle state of an order.
///
/// Free text: `pending` and `paid` carry meaning, any other value is stored as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Pending,
    Paid,
    Other(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Other(status) => status.as_str(),
        }
    }
}

impl From<String> for OrderStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "pending" => OrderStatus::Pending,
            "paid" => OrderStatus::Paid,
            _ => OrderStatus::Other(status),
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(status: &str) -> Self {
        status.to_string().into()
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Other(status) => status,
            known => known.as_str().to_string(),
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a customer order.
///
/// `total_price` is always `quantity × unit price` where the unit price is the one
/// read when the quantity was last set. Later product price changes do not move it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub status: OrderStatus,
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Sets a new quantity and reprices the order at `unit_price`.
    pub fn reprice(&mut self, quantity: u32, unit_price: f64) {
        self.quantity = quantity;
        self.total_price = total_price(quantity, unit_price);
    }
}

/// Price of `quantity` units at `unit_price`.
pub fn total_price(quantity: u32, unit_price: f64) -> f64 {
    f64::from(quantity) * unit_price
}

/// A validated order ready to be stored. The store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub status: OrderStatus,
    pub total_price: f64,
}

/// Order placement request. Unset ids and a quantity of 0 mean "not provided".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderCreate {
    #[serde(default)]
    pub user_id: UserId,
    #[serde(default)]
    pub product_id: ProductId,
    #[serde(default)]
    pub quantity: i64,
}

/// Order update request. Absent fields, a quantity of 0 and an empty status are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderUpdate {
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Read-only listing row joining an order with its user and product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDetail {
    pub id: OrderId,
    pub user_id: UserId,
    pub username: String,
    #[serde(rename = "fullname")]
    pub full_name: String,
    pub product_id: ProductId,
    pub product_name: String,
    pub unit_price: f64,
    pub quantity: u32,
    pub status: OrderStatus,
    pub total_price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accepts_any_text() {
        assert_eq!(OrderStatus::from("pending"), OrderStatus::Pending);
        assert_eq!(OrderStatus::from("paid"), OrderStatus::Paid);
        assert_eq!(
            OrderStatus::from("shipped"),
            OrderStatus::Other("shipped".to_string())
        );
        // Matching is exact
        assert_eq!(
            OrderStatus::from("PAID"),
            OrderStatus::Other("PAID".to_string())
        );
        assert_eq!(OrderStatus::from("on hold").to_string(), "on hold");
    }

    #[test]
    fn test_status_serializes_as_plain_string() {
        assert_eq!(serde_json::to_string(&OrderStatus::Paid).unwrap(), "\"paid\"");
        let status: OrderStatus = serde_json::from_str("\"shipped\"").unwrap();
        assert_eq!(status, OrderStatus::Other("shipped".into()));
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"shipped\"");
    }

    #[test]
    fn test_reprice_uses_given_unit_price() {
        let now = Utc::now();
        let mut order = Order {
            id: OrderId(1),
            user_id: UserId(1),
            product_id: ProductId(1),
            quantity: 2,
            status: OrderStatus::Pending,
            total_price: 20.0,
            created_at: now,
            updated_at: now,
        };
        order.reprice(5, 12.5);
        assert_eq!(order.quantity, 5);
        assert_eq!(order.total_price, 62.5);
    }
}
