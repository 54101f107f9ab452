//! Seller commission model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CommissionId, CommissionStatus, OrderId, UserId};

/// A commission owed to a seller for one order.
///
/// Both `user_id` and `order_id` are weak references: they name other
/// entities without enforced referential integrity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commission {
    /// Unique identifier.
    pub id: CommissionId,
    /// Weak reference to the earning seller.
    pub user_id: UserId,
    /// Weak reference to the originating order.
    pub order_id: OrderId,
    /// Commission value.
    pub amount: f64,
    /// Payout state.
    pub status: CommissionStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_commission() {
        let json = r#"{
            "id": "c-1",
            "userId": "u-2",
            "orderId": "o-3",
            "amount": 42.5,
            "status": "pending",
            "createdAt": "2024-03-01T12:00:00Z"
        }"#;
        let commission: Commission = serde_json::from_str(json).unwrap();
        assert_eq!(commission.id, CommissionId::new("c-1".to_owned()));
        assert_eq!(commission.user_id, UserId::new("u-2".to_owned()));
        assert_eq!(commission.order_id, OrderId::new("o-3".to_owned()));
        assert!((commission.amount - 42.5).abs() < f64::EPSILON);
        assert_eq!(commission.status, CommissionStatus::Pending);
    }

    #[test]
    fn serialize_roundtrip() {
        let commission = Commission {
            id: CommissionId::new("c-1".to_owned()),
            user_id: UserId::new("u-1".to_owned()),
            order_id: OrderId::new("o-1".to_owned()),
            amount: 10.0,
            status: CommissionStatus::Paid,
            created_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        };
        let json = serde_json::to_string(&commission).unwrap();
        assert!(json.contains(r#""orderId""#));
        let deserialized: Commission = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, commission);
    }
}
