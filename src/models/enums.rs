//! Enumeration types for constrained entity values.

use serde::{Deserialize, Serialize};

/// Role a user plays in the back office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserRole {
    /// Back-office administrator.
    Admin,
    /// Seller earning commissions on orders.
    Seller,
    /// Ordinary customer.
    Customer,
}

/// Activation state of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserStatus {
    /// The account is enabled.
    Active,
    /// The account has been disabled.
    Inactive,
}

impl UserStatus {
    /// Returns the opposite status.
    ///
    /// Applying this twice yields the original value.
    #[inline]
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }
}

/// Fulfilment state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderStatus {
    /// Received but not yet picked up.
    Pending,
    /// Being worked on.
    Processing,
    /// Fulfilled.
    Completed,
    /// Cancelled before fulfilment.
    Cancelled,
}

/// Payout state of a commission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CommissionStatus {
    /// Awaiting payout.
    Pending,
    /// Already paid out.
    Paid,
}
