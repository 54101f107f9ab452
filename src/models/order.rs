//! Order and line-item models.
//!
//! `Order::total` is a cached projection of its items. The field is
//! private and recomputed at every mutation point (construction,
//! deserialization, `set_items`) so it can never drift from
//! `Σ quantity × unit_price`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{OrderId, OrderItemId, OrderStatus, UserId};

/// A single product line within an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Unique identifier within the order.
    pub id: OrderItemId,
    /// Product display name.
    pub product_name: String,
    /// Number of units ordered (positive).
    pub quantity: u32,
    /// Price per unit (non-negative).
    pub unit_price: f64,
}

impl OrderItem {
    /// Returns the monetary value of this line (`quantity × unit_price`).
    #[inline]
    #[must_use]
    pub fn line_total(&self) -> f64 {
        f64::from(self.quantity) * self.unit_price
    }
}

/// Sums the line totals of a slice of items.
fn items_total(items: &[OrderItem]) -> f64 {
    items.iter().map(OrderItem::line_total).sum()
}

/// A customer order.
///
/// Fields are private so that `total` stays consistent with `items`;
/// reads go through the accessor methods and mutations through
/// [`Order::set_status`] / [`Order::set_items`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "OrderRecord")]
pub struct Order {
    /// Unique identifier.
    id: OrderId,
    /// Weak reference to the ordering user (not enforced).
    user_id: UserId,
    /// Fulfilment state.
    status: OrderStatus,
    /// Ordered product lines.
    items: Vec<OrderItem>,
    /// Cached sum of line totals; kept consistent with `items`.
    total: f64,
    /// Creation timestamp.
    created_at: DateTime<Utc>,
}

/// Raw wire shape of an [`Order`].
///
/// The fixture stores `total` redundantly; it is discarded on ingest
/// and recomputed from `items`, so a stale value in the fixture cannot
/// violate the invariant.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderRecord {
    /// Unique identifier.
    id: OrderId,
    /// Weak reference to the ordering user.
    user_id: UserId,
    /// Fulfilment state.
    status: OrderStatus,
    /// Ordered product lines.
    items: Vec<OrderItem>,
    /// Stored total, ignored in favour of recomputation.
    #[serde(default)]
    #[allow(dead_code, reason = "read from the wire, superseded by recomputation")]
    total: f64,
    /// Creation timestamp.
    created_at: DateTime<Utc>,
}

impl From<OrderRecord> for Order {
    #[inline]
    fn from(record: OrderRecord) -> Self {
        Self::new(
            record.id,
            record.user_id,
            record.status,
            record.items,
            record.created_at,
        )
    }
}

impl Order {
    /// Creates an order, computing `total` from the given items.
    #[inline]
    #[must_use]
    pub fn new(
        id: OrderId,
        user_id: UserId,
        status: OrderStatus,
        items: Vec<OrderItem>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let total = items_total(&items);
        Self {
            id,
            user_id,
            status,
            items,
            total,
            created_at,
        }
    }

    /// Returns the order identifier.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> &OrderId {
        &self.id
    }

    /// Returns the identifier of the ordering user.
    #[inline]
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the fulfilment state.
    #[inline]
    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        self.status
    }

    /// Returns the product lines.
    #[inline]
    #[must_use]
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Returns the order value (`Σ quantity × unit_price`).
    #[inline]
    #[must_use]
    pub const fn total(&self) -> f64 {
        self.total
    }

    /// Returns the creation timestamp.
    #[inline]
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Sets the fulfilment state.
    #[inline]
    pub const fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
    }

    /// Replaces the product lines, recomputing `total`.
    #[inline]
    pub fn set_items(&mut self, items: Vec<OrderItem>) {
        self.total = items_total(&items);
        self.items = items;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Creates a line item.
    fn item(id: &str, quantity: u32, unit_price: f64) -> OrderItem {
        OrderItem {
            id: OrderItemId::new(id.to_owned()),
            product_name: format!("Product {id}"),
            quantity,
            unit_price,
        }
    }

    /// Creates an order from items.
    fn order(items: Vec<OrderItem>) -> Order {
        Order::new(
            OrderId::new("o-1".to_owned()),
            UserId::new("u-1".to_owned()),
            OrderStatus::Pending,
            items,
            DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        )
    }

    #[test]
    fn new_computes_total_from_items() {
        let order = order(vec![item("i-1", 2, 10.0), item("i-2", 1, 5.5)]);
        assert!((order.total() - 25.5).abs() < f64::EPSILON);
    }

    #[test]
    fn set_items_recomputes_total() {
        let mut order = order(vec![item("i-1", 1, 100.0)]);
        order.set_items(vec![item("i-1", 3, 100.0)]);
        assert!((order.total() - 300.0).abs() < f64::EPSILON);
        order.set_items(Vec::new());
        assert!(order.total().abs() < f64::EPSILON);
    }

    #[test]
    fn deserialize_recomputes_stale_total() {
        // The fixture claims a total of 999, but the items sum to 20.
        let json = r#"{
            "id": "o-1",
            "userId": "u-1",
            "status": "processing",
            "items": [
                {"id": "i-1", "productName": "Widget", "quantity": 2, "unitPrice": 10.0}
            ],
            "total": 999.0,
            "createdAt": "2024-02-01T00:00:00Z"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert!((order.total() - 20.0).abs() < f64::EPSILON);
        assert_eq!(order.status(), OrderStatus::Processing);
        assert_eq!(order.items().len(), 1);
    }

    #[test]
    fn deserialize_without_total_field() {
        let json = r#"{
            "id": "o-2",
            "userId": "u-1",
            "status": "pending",
            "items": [],
            "createdAt": "2024-02-01T00:00:00Z"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert!(order.total().abs() < f64::EPSILON);
    }

    #[test]
    fn serialize_roundtrip() {
        let order = order(vec![item("i-1", 4, 2.5)]);
        let json = serde_json::to_string(&order).unwrap();
        assert!(json.contains(r#""userId""#));
        assert!(json.contains(r#""productName""#));
        let deserialized: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, order);
    }

    #[test]
    fn set_status_changes_only_status() {
        let mut updated = order(vec![item("i-1", 1, 7.0)]);
        let before = updated.clone();
        updated.set_status(OrderStatus::Completed);
        assert_eq!(updated.status(), OrderStatus::Completed);
        assert_eq!(updated.items(), before.items());
        assert!((updated.total() - before.total()).abs() < f64::EPSILON);
    }
}
