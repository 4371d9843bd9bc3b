//! Orders

use std::{fmt, str::FromStr};

use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    cart::CartLine,
    prices::Price,
    products::UnknownVariantError,
    sorting::{SortValue, Sortable},
};

/// Order identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Create an order identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrderId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Fulfilment status of an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Placed, not yet shipped.
    #[default]
    #[serde(alias = "pending")]
    Pending,

    /// Handed to the carrier.
    #[serde(alias = "shipped")]
    Shipped,

    /// Received by the customer.
    #[serde(alias = "delivered")]
    Delivered,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [OrderStatus; 3] = [
        OrderStatus::Pending,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
    ];

    /// Name as stored and sent over the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariantError {
                kind: "order status",
                value: s.to_string(),
            })
    }
}

/// Order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order identifier
    pub id: OrderId,

    /// Customer display name
    pub customer_name: String,

    /// Cart lines as they were when the order was placed.
    #[serde(default)]
    pub items: Vec<CartLine>,

    /// Order total
    pub total: Price,

    /// Fulfilment status
    pub status: OrderStatus,

    /// Date the order was placed
    pub date: Date,
}

/// New Order Data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    /// Customer display name
    pub customer_name: String,

    /// Cart lines being ordered
    pub items: Vec<CartLine>,

    /// Order total
    pub total: Price,

    /// Initial status
    pub status: OrderStatus,

    /// Date the order was placed
    pub date: Date,
}

impl NewOrder {
    /// Attach an identifier, producing the stored order.
    pub fn with_id(self, id: OrderId) -> Order {
        Order {
            id,
            customer_name: self.customer_name,
            items: self.items,
            total: self.total,
            status: self.status,
            date: self.date,
        }
    }
}

impl Sortable for Order {
    fn sort_value(&self, key: &str) -> Option<SortValue<'_>> {
        match key {
            "id" => Some(SortValue::Text(self.id.as_str())),
            "customerName" => Some(SortValue::Text(&self.customer_name)),
            "total" => Some(SortValue::Number(Decimal::from(self.total.minor_units()))),
            "status" => Some(SortValue::Text(self.status.as_str())),
            "date" => Some(SortValue::Date(self.date)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn status_accepts_lowercase_wire_values() -> TestResult {
        let status: OrderStatus = serde_norway::from_str("pending")?;

        assert_eq!(status, OrderStatus::Pending);

        Ok(())
    }

    #[test]
    fn status_parses_from_cli_input() -> TestResult {
        assert_eq!("shipped".parse::<OrderStatus>()?, OrderStatus::Shipped);
        assert!("lost".parse::<OrderStatus>().is_err());

        Ok(())
    }

    #[test]
    fn new_order_with_id_keeps_fields() {
        let order = NewOrder {
            customer_name: "Ada".to_string(),
            items: Vec::new(),
            total: Price::new(500),
            status: OrderStatus::Pending,
            date: Date::constant(2024, 5, 1),
        }
        .with_id(OrderId::new("o-1"));

        assert_eq!(order.id.as_str(), "o-1");
        assert_eq!(order.total, Price::new(500));
        assert_eq!(order.date, Date::constant(2024, 5, 1));
    }
}
